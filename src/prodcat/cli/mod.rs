//! # CLI Behavior
//!
//! This is **one possible UI client** for prodcat, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## Public and admin commands
//!
//! Browsing (`list`, `view`, `search`, `status`) is open to everyone.
//! Changing the catalog (`add`, `update`, `delete`, `import`, `export`,
//! `sync`) needs the admin passcode, given with `--passcode` or
//! `PRODCAT_PASSCODE`.
//!
//! ### Naked Execution (`prodcat`)
//!
//! Running `prodcat` with no arguments defaults to `prodcat list`.
//!
//! ### Export and import
//!
//! `prodcat export` writes interchange text to stdout (or `--out FILE`,
//! or the clipboard with `--copy`). Messages go to stderr so the text can be
//! piped. `prodcat import` reads a file, or stdin when no file (or `-`) is
//! given, and replaces the whole catalog.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Output formatting (lists, details, messages)
//! - `setup`: Argument parsing via clap, grouped help text

mod commands;
mod render;
pub mod setup;

pub use commands::run;
