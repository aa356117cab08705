//! # Prodcat Architecture
//!
//! Prodcat is a **bounded product catalog library**: a collection of at most
//! `max_products` products, kept in one of several interchangeable backends,
//! plus a text format that lets the whole catalog be copied out and pasted
//! back in. The `prodcat` binary is one client of this library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Application Context (app.rs, session.rs)                   │
//! │  - Builds the configured backend and opens the store        │
//! │  - Gates admin operations behind the passcode               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Selectors, search, capacity warnings, import/export      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - CatalogStore: capacity, uniqueness, change notifications │
//! │  - CatalogBackend: memory, file, remote HTTP                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The codec (`codec.rs`) sits beside the store: `export` reads the store's
//! list, `import` validates text and hands the result to the store's bulk
//! replace.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns
//! `Result<CmdResult>`. It never writes to stdout/stderr and never exits the
//! process. Backends do their own I/O (a file, an HTTP service) but report
//! failures as values.
//!
//! ## Invariants
//!
//! - Product ids are unique across the catalog.
//! - The catalog never holds more than `max_products` products.
//! - A failed backend write leaves the in-memory catalog unchanged.
//!
//! ## Testing Strategy
//!
//! 1. **Commands and store**: unit tests over `MemBackend`.
//! 2. **Codec**: unit tests over literal interchange text.
//! 3. **Backends**: integration tests in `tests/` against temp dirs and a
//!    mock HTTP server.
//! 4. **CLI**: end-to-end tests running the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`app`]: Application context built from configuration
//! - [`codec`]: Interchange text import/export
//! - [`commands`]: Business logic for each command
//! - [`config`]: Configuration loading
//! - [`store`]: The catalog store and its backends
//! - [`model`]: `Product` and `ProductFormData`
//! - [`session`]: Admin passcode gate
//! - [`logging`]: `tracing` subscriber setup
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`error`]: Error types

pub mod api;
pub mod app;
pub mod clipboard;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;
