use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ProductFormData;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

pub fn run<B: CatalogBackend>(
    store: &mut CatalogStore<B>,
    form: ProductFormData,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match store.add(form)? {
        Some(product) => {
            result.add_message(CmdMessage::success(format!(
                "Product added ({}): {}",
                store.len(),
                product.name
            )));
            result.affected_products.push(product);
        }
        None => {
            result.add_message(CmdMessage::warning(format!(
                "Catalog is full ({} of {} products). Delete a product before adding another.",
                store.len(),
                store.max_products()
            )));
        }
    }

    Ok(result)
}
