use crate::codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FormatError, Result};
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

/// Replaces the catalog with the products in `text`.
///
/// All or nothing: any error leaves the catalog exactly as it was. Too many
/// products is a `FormatError::ExceedsMaximum`, same as the codec reports.
pub fn run<B: CatalogBackend>(store: &mut CatalogStore<B>, text: &str) -> Result<CmdResult> {
    let products = codec::import(text, store.max_products())?;
    let previous = store.len();
    let incoming = products.len();

    if !store.import_bulk(products.clone())? {
        return Err(FormatError::ExceedsMaximum {
            count: incoming,
            max: store.max_products(),
        }
        .into());
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} products (replaced {}).",
        incoming, previous
    )));
    result.affected_products = products;
    Ok(result)
}
