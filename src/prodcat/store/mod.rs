//! # Storage Layer
//!
//! Two pieces with a clear split:
//!
//! - [`catalog::CatalogStore`] owns the in-memory collection and its rules:
//!   the maximum size, unique ids, rollback on failed writes, and change
//!   notifications. It is the only thing that mutates the catalog.
//! - [`backend::CatalogBackend`] is where the collection is kept between
//!   runs. The store talks to exactly one backend, chosen by configuration.
//!
//! ## Backends
//!
//! - [`mem_backend::MemBackend`]: in-memory, seeded from the built-in
//!   catalog or a seed file. Also the test double for everything above it.
//! - [`fs_backend::FsBackend`]: one pretty-printed JSON array on disk,
//!   rewritten atomically on every change.
//! - [`remote_backend::RemoteBackend`]: a REST service reached over HTTP.
//!
//! ## Write order
//!
//! Every mutation goes to the backend first. The store commits locally only
//! after the backend accepts the change, so the in-memory list never shows a
//! product the backend refused.

pub mod backend;
pub mod catalog;
pub mod fs_backend;
pub mod mem_backend;
pub mod remote_backend;

pub use backend::CatalogBackend;
pub use catalog::{CatalogChange, CatalogStore};
