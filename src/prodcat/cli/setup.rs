use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use prodcat::config::BackendKind;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "prodcat",
    bin_name = "prodcat",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Bounded product catalog with passcode-gated admin", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend to use for this run (seed, file, remote)
    #[arg(long, global = true, value_name = "KIND", help_heading = "Options")]
    pub backend: Option<BackendKind>,

    /// Admin passcode
    #[arg(
        long,
        global = true,
        env = "PRODCAT_PASSCODE",
        hide_env_values = true,
        help_heading = "Options"
    )]
    pub passcode: Option<String>,

    /// Config file (defaults to prodcat.toml in the user config directory)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Browse,
    Admin,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Browse => "Browse Commands:",
            CommandGroup::Admin => "Admin Commands (need --passcode):",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    /// Returns the group for a given command name
    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "view" | "search" | "status" => Some(CommandGroup::Browse),
            "add" | "update" | "delete" | "export" | "import" | "sync" => {
                Some(CommandGroup::Admin)
            }
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Browse, CommandGroup::Admin, CommandGroup::Misc]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("prodcat {version}\n"));
    output.push_str("A bounded product catalog with passcode-gated admin commands\n");
    output.push('\n');
    output.push_str("Usage: prodcat [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<10} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str(
        "      --backend <KIND>     Backend to use for this run (seed, file, remote)\n",
    );
    output.push_str("      --passcode <PASSCODE> Admin passcode [env: PRODCAT_PASSCODE]\n");
    output.push_str("      --config <FILE>      Config file\n");
    output.push_str("  -v, --verbose            Verbose output\n");
    output.push_str("  -h, --help               Print help\n");
    output.push_str("  -V, --version            Print version\n");

    output
}

/// Parses the process arguments, with grouped help at the top level.
pub fn parse() -> Cli {
    let matches = Cli::command()
        .override_help(get_grouped_help())
        .get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

/// Prints help for a command by name
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print!("{}", get_grouped_help());
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Browse(BrowseCommands),

    #[command(flatten)]
    Admin(AdminCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum BrowseCommands {
    /// List products
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only products whose name or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show full details of one or more products
    #[command(alias = "v", display_order = 2)]
    View {
        /// Product ids or list positions (e.g. 1 3 starter-guide)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Print JSON instead of formatted details
        #[arg(long)]
        json: bool,
    },

    /// Search products by name or description
    #[command(display_order = 3)]
    Search {
        /// Search words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Show catalog size, maximum and backend
    #[command(display_order = 4)]
    Status,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Add a product
    #[command(alias = "n", display_order = 10)]
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        /// Usage instructions
        #[arg(long)]
        usage: String,

        /// External link
        #[arg(long)]
        link: String,
    },

    /// Change fields of a product (omitted fields keep their value)
    #[command(alias = "e", display_order = 11)]
    Update {
        /// Product id or list position
        selector: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Usage instructions
        #[arg(long)]
        usage: Option<String>,

        /// External link
        #[arg(long)]
        link: Option<String>,
    },

    /// Delete one or more products
    #[command(alias = "rm", display_order = 12)]
    Delete {
        /// Product ids or list positions
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Export the catalog as interchange text
    #[command(display_order = 13)]
    Export {
        /// Plain JSON array without the `export const` wrapper
        #[arg(long)]
        bare: bool,

        /// Write to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also copy the text to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Replace the catalog with products from interchange text
    #[command(display_order = 14)]
    Import {
        /// File to read; stdin when omitted or "-"
        file: Option<String>,
    },

    /// Reload the catalog from the backend
    #[command(display_order = 15)]
    Sync,
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show the effective configuration
    #[command(display_order = 30)]
    Config {
        /// Print a commented prodcat.toml template instead
        #[arg(long)]
        template: bool,
    },

    /// Print help for prodcat or a subcommand
    #[command(display_order = 31)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}
