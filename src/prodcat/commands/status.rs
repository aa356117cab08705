use crate::commands::{CatalogStatus, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

pub fn run<B: CatalogBackend>(store: &CatalogStore<B>) -> Result<CmdResult> {
    let status = CatalogStatus {
        count: store.len(),
        max_products: store.max_products(),
        can_add_more: store.can_add_more(),
        backend: store.backend_name(),
    };

    let mut result = CmdResult::default();
    if !status.can_add_more {
        result.add_message(CmdMessage::warning(format!(
            "Catalog is full ({} of {}).",
            status.count, status.max_products
        )));
    }
    Ok(result.with_status(status))
}
