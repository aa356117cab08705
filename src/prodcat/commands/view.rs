use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

use super::helpers::resolve_selectors;

pub fn run<B: CatalogBackend, I: AsRef<str>>(
    store: &CatalogStore<B>,
    selectors: &[I],
) -> Result<CmdResult> {
    let products = resolve_selectors(store, selectors)?;
    Ok(CmdResult::default().with_listed_products(products))
}
