use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

pub fn run<B: CatalogBackend>(store: &mut CatalogStore<B>) -> Result<CmdResult> {
    let before = store.len();
    store.sync()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Synced with {} backend: {} products (was {}).",
        store.backend_name(),
        store.len(),
        before
    )));
    Ok(result)
}
