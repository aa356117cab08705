use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

use super::helpers::resolve_selectors;

pub fn run<B: CatalogBackend, I: AsRef<str>>(
    store: &mut CatalogStore<B>,
    selectors: &[I],
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for dp in resolved {
        store.delete(&dp.product.id)?;
        result.add_message(CmdMessage::success(format!(
            "Product deleted ({}): {}",
            dp.index, dp.product.name
        )));
        result.affected_products.push(dp.product);
    }

    Ok(result)
}
