use super::render::{
    eprint_messages, print_messages, render_full_products, render_json, render_product_list,
    render_status, render_text_list,
};
use super::setup::{
    parse, print_help_for_command, AdminCommands, BrowseCommands, Cli, Commands, MiscCommands,
};
use prodcat::api::{CmdResult, ProductPatch};
use prodcat::app::AppContext;
use prodcat::clipboard::copy_to_clipboard;
use prodcat::config::CatalogConfig;
use prodcat::error::{CatalogError, Result};
use prodcat::logging;
use prodcat::model::ProductFormData;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

pub fn run() -> Result<()> {
    let cli = parse();
    logging::init(cli.verbose);

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        return handle_help(command.as_deref());
    }

    let config = load_config(&cli)?;

    if let Some(Commands::Misc(MiscCommands::Config { template })) = &cli.command {
        return handle_config(&config, *template);
    }

    let mut ctx = AppContext::initialize(config)?;
    if let Some(passcode) = &cli.passcode {
        ctx.login(passcode);
    }

    let outcome = dispatch(&mut ctx, cli.command);
    ctx.shutdown();
    outcome
}

fn load_config(cli: &Cli) -> Result<CatalogConfig> {
    let mut config = CatalogConfig::load(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        config.backend = Some(backend);
        config.validate()?;
    }
    Ok(config)
}

fn dispatch(ctx: &mut AppContext, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Browse(cmd)) => match cmd {
            BrowseCommands::List { search, json } => handle_list(ctx, search, json),
            BrowseCommands::View { selectors, json } => handle_view(ctx, selectors, json),
            BrowseCommands::Search { term } => handle_search(ctx, term.join(" ")),
            BrowseCommands::Status => handle_status(ctx),
        },
        Some(Commands::Admin(cmd)) => match cmd {
            AdminCommands::Add {
                name,
                description,
                usage,
                link,
            } => handle_add(ctx, ProductFormData::new(name, description, usage, link)),
            AdminCommands::Update {
                selector,
                name,
                description,
                usage,
                link,
            } => {
                let patch = ProductPatch {
                    name,
                    description,
                    usage_instructions: usage,
                    external_link: link,
                };
                handle_update(ctx, selector, patch)
            }
            AdminCommands::Delete { selectors } => handle_delete(ctx, selectors),
            AdminCommands::Export { bare, out, copy } => handle_export(ctx, bare, out, copy),
            AdminCommands::Import { file } => handle_import(ctx, file),
            AdminCommands::Sync => handle_sync(ctx),
        },
        // Handled before the context is built.
        Some(Commands::Misc(_)) => Ok(()),
        None => handle_list(ctx, None, false),
    }
}

fn print_listing(result: &CmdResult, json: bool) -> Result<()> {
    if json {
        print!("{}", render_json(&result.listed_products)?);
    } else {
        print!("{}", render_product_list(&result.listed_products));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: Option<String>, json: bool) -> Result<()> {
    let result = match search {
        Some(term) => ctx.api.search_products(&term)?,
        None => ctx.api.list_products()?,
    };
    print_listing(&result, json)
}

fn handle_view(ctx: &mut AppContext, selectors: Vec<String>, json: bool) -> Result<()> {
    let result = ctx.api.view_products(&selectors)?;
    if json {
        print!("{}", render_json(&result.listed_products)?);
    } else {
        print!("{}", render_full_products(&result.listed_products));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, term: String) -> Result<()> {
    let result = ctx.api.search_products(&term)?;
    print_listing(&result, false)
}

fn handle_status(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    if let Some(status) = &result.status {
        print!("{}", render_status(status));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, form: ProductFormData) -> Result<()> {
    let result = ctx.admin_api()?.add_product(form)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, selector: String, patch: ProductPatch) -> Result<()> {
    let result = ctx.admin_api()?.update_product(&selector, patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.admin_api()?.delete_products(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(
    ctx: &mut AppContext,
    bare: bool,
    out: Option<PathBuf>,
    copy: bool,
) -> Result<()> {
    let result = ctx.admin_api()?.export_catalog(bare)?;
    let text = result.exported.clone().unwrap_or_default();

    match &out {
        Some(path) => {
            fs::write(path, format!("{}\n", text)).map_err(CatalogError::Io)?;
            eprint_messages(&result.messages);
            eprintln!("Wrote {}", path.display());
        }
        None => {
            println!("{}", text);
            eprint_messages(&result.messages);
        }
    }

    if copy {
        match copy_to_clipboard(&text) {
            Ok(()) => eprintln!("Copied to clipboard."),
            Err(e) => eprintln!("Warning: Failed to copy to clipboard: {}", e),
        }
    }
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: Option<String>) -> Result<()> {
    let text = match file.as_deref() {
        Some(path) if path != "-" => fs::read_to_string(path).map_err(CatalogError::Io)?,
        _ => read_stdin()?,
    };

    let result = ctx.admin_api()?.import_catalog(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(CatalogError::Api(
            "Nothing to import: pass a FILE or pipe interchange text on stdin".to_string(),
        ));
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer).map_err(CatalogError::Io)?;
    Ok(buffer)
}

fn handle_sync(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.admin_api()?.sync()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(config: &CatalogConfig, template: bool) -> Result<()> {
    if template {
        print!("{}", CatalogConfig::template());
        return Ok(());
    }

    let lines: Vec<String> = config
        .list_all()
        .into_iter()
        .map(|(key, value)| format!("{} = {}", key, value))
        .collect();
    print!("{}", render_text_list(&lines, "No configuration values."));
    Ok(())
}

fn handle_help(command: Option<&str>) -> Result<()> {
    match command {
        Some(cmd) => print_help_for_command(cmd),
        None => print!("{}", super::setup::get_grouped_help()),
    }
    Ok(())
}
