use crate::commands::DisplayProduct;
use crate::error::{CatalogError, Result};
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

/// Pairs every product with its 1-based listing position.
pub fn indexed_products<B: CatalogBackend>(store: &CatalogStore<B>) -> Vec<DisplayProduct> {
    store
        .list()
        .iter()
        .enumerate()
        .map(|(i, product)| DisplayProduct {
            index: i + 1,
            product: product.clone(),
        })
        .collect()
}

/// Resolves one selector: an exact id first, then a 1-based position.
pub fn resolve_selector<B: CatalogBackend>(
    store: &CatalogStore<B>,
    selector: &str,
) -> Result<DisplayProduct> {
    let selector = selector.trim();
    let products = store.list();

    if let Some(pos) = products.iter().position(|p| p.id == selector) {
        return Ok(DisplayProduct {
            index: pos + 1,
            product: products[pos].clone(),
        });
    }

    match selector.parse::<usize>() {
        Ok(n) if n >= 1 && n <= products.len() => Ok(DisplayProduct {
            index: n,
            product: products[n - 1].clone(),
        }),
        Ok(n) => Err(CatalogError::Api(format!(
            "Position {} is out of range (catalog has {} products)",
            n,
            products.len()
        ))),
        Err(_) => Err(CatalogError::NotFound(selector.to_string())),
    }
}

/// Resolves every selector up front, so positions refer to the listing as it
/// was before any mutation. Repeated selectors collapse to one product.
pub fn resolve_selectors<B: CatalogBackend, I: AsRef<str>>(
    store: &CatalogStore<B>,
    selectors: &[I],
) -> Result<Vec<DisplayProduct>> {
    let mut resolved: Vec<DisplayProduct> = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let dp = resolve_selector(store, selector.as_ref())?;
        if !resolved.iter().any(|r| r.product.id == dp.product.id) {
            resolved.push(dp);
        }
    }
    Ok(resolved)
}
