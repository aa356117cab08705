//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients. It dispatches to `commands::*`, owns the store, and carries the
//! export style chosen by configuration.
//!
//! The facade does no I/O and no presentation: every method returns
//! `Result<CmdResult>` and leaves rendering to the caller.
//!
//! `CatalogApi<B>` is generic over the backend. The binary runs it over a
//! `Box<dyn CatalogBackend>` picked at startup; tests run it over
//! `MemBackend`.

use crate::codec::ExportStyle;
use crate::commands;
use crate::error::Result;
use crate::model::ProductFormData;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::{CatalogChange, CatalogStore};

pub use crate::commands::{
    CatalogStatus, CmdMessage, CmdResult, DisplayProduct, MessageLevel, ProductPatch,
};

pub struct CatalogApi<B: CatalogBackend> {
    store: CatalogStore<B>,
    export_style: ExportStyle,
}

impl<B: CatalogBackend> CatalogApi<B> {
    pub fn new(store: CatalogStore<B>, export_style: ExportStyle) -> Self {
        Self {
            store,
            export_style,
        }
    }

    pub fn store(&self) -> &CatalogStore<B> {
        &self.store
    }

    pub fn export_style(&self) -> &ExportStyle {
        &self.export_style
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&CatalogChange) + 'static) {
        self.store.subscribe(listener);
    }

    pub fn add_product(&mut self, form: ProductFormData) -> Result<CmdResult> {
        commands::add::run(&mut self.store, form)
    }

    pub fn update_product(&mut self, selector: &str, patch: ProductPatch) -> Result<CmdResult> {
        commands::update::run(&mut self.store, selector, patch)
    }

    pub fn delete_products<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, selectors)
    }

    pub fn list_products(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_products<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        commands::view::run(&self.store, selectors)
    }

    pub fn search_products(&self, term: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, term)
    }

    /// Exports with the configured style, or as a bare array when `bare`.
    pub fn export_catalog(&self, bare: bool) -> Result<CmdResult> {
        if bare {
            commands::export::run(&self.store, &ExportStyle::Bare)
        } else {
            commands::export::run(&self.store, &self.export_style)
        }
    }

    pub fn import_catalog(&mut self, text: &str) -> Result<CmdResult> {
        commands::import::run(&mut self.store, text)
    }

    pub fn sync(&mut self) -> Result<CmdResult> {
        commands::sync::run(&mut self.store)
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.store)
    }
}
