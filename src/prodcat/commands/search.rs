use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

use super::helpers::indexed_products;

/// Keeps catalog order; positions stay those of the full listing so they can
/// be used as selectors afterwards.
pub fn run<B: CatalogBackend>(store: &CatalogStore<B>, term: &str) -> Result<CmdResult> {
    let listed = indexed_products(store)
        .into_iter()
        .filter(|dp| dp.product.matches(term))
        .collect();
    Ok(CmdResult::default().with_listed_products(listed))
}
