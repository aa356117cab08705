//! # Command Layer
//!
//! Each catalog operation lives in its own submodule as a plain function over
//! a [`CatalogStore`](crate::store::catalog::CatalogStore). Commands hold the
//! business rules that sit above the store: selector resolution, search,
//! turning capacity refusals into warnings, and pairing the codec with bulk
//! replacement.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, stderr or clipboard
//! - **Argument parsing**: that's the CLI layer's job
//! - **Access control**: the admin gate is applied by the application context
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `affected_products`: products that were added or changed
//! - `listed_products`: products to display, with their 1-based position
//! - `exported`: interchange text produced by `export`
//! - `status`: catalog counters produced by `status`
//! - `messages`: leveled messages (info, success, warning)
//!
//! Failures are not messages: they come back as `Err(CatalogError)`.
//!
//! ## Testing Strategy
//!
//! Command tests use `MemBackend` so nothing touches the filesystem or the
//! network. This is where most of the behavioural tests live.
//!
//! ## Command Modules
//!
//! - [`add`]: Create a product (respects the maximum)
//! - [`update`]: Patch an existing product
//! - [`delete`]: Remove products
//! - [`list`]: Full listing
//! - [`view`]: Products by selector
//! - [`search`]: Case-insensitive name/description filter
//! - [`export`]: Produce interchange text
//! - [`import`]: Replace the catalog from interchange text
//! - [`sync`]: Reload from the backend
//! - [`status`]: Size, maximum and backend
//! - [`helpers`]: Selector resolution

use crate::model::Product;
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod search;
pub mod status;
pub mod sync;
pub mod update;
pub mod view;

pub use update::ProductPatch;

/// A product paired with its 1-based position in the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayProduct {
    pub index: usize,
    pub product: Product,
}

/// Counters reported by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatus {
    pub count: usize,
    pub max_products: usize,
    pub can_add_more: bool,
    pub backend: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_products: Vec<Product>,
    pub listed_products: Vec<DisplayProduct>,
    pub exported: Option<String>,
    pub status: Option<CatalogStatus>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_products(mut self, products: Vec<DisplayProduct>) -> Self {
        self.listed_products = products;
        self
    }

    pub fn with_exported(mut self, text: String) -> Self {
        self.exported = Some(text);
        self
    }

    pub fn with_status(mut self, status: CatalogStatus) -> Self {
        self.status = Some(status);
        self
    }
}
