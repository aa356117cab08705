use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

use super::helpers::indexed_products;

pub fn run<B: CatalogBackend>(store: &CatalogStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_products(indexed_products(store)))
}
