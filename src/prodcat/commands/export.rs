use crate::codec::{self, ExportStyle};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

/// Renders the whole catalog as interchange text.
pub fn run<B: CatalogBackend>(store: &CatalogStore<B>, style: &ExportStyle) -> Result<CmdResult> {
    let text = codec::export(store.list(), style)?;

    let mut result = CmdResult::default().with_exported(text);
    if store.is_empty() {
        result.add_message(CmdMessage::info("Catalog is empty, exported an empty list."));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Exported {} products.",
            store.len()
        )));
    }
    Ok(result)
}
