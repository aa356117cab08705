use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ProductFormData;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;

use super::helpers::resolve_selector;

/// Field changes for `update`. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub usage_instructions: Option<String>,
    pub external_link: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.usage_instructions.is_none()
            && self.external_link.is_none()
    }

    /// The form that results from applying this patch to `current`.
    pub fn merge(self, current: ProductFormData) -> ProductFormData {
        ProductFormData {
            name: self.name.unwrap_or(current.name),
            description: self.description.unwrap_or(current.description),
            usage_instructions: self
                .usage_instructions
                .unwrap_or(current.usage_instructions),
            external_link: self.external_link.unwrap_or(current.external_link),
        }
    }
}

impl From<ProductFormData> for ProductPatch {
    fn from(form: ProductFormData) -> Self {
        Self {
            name: Some(form.name),
            description: Some(form.description),
            usage_instructions: Some(form.usage_instructions),
            external_link: Some(form.external_link),
        }
    }
}

pub fn run<B: CatalogBackend>(
    store: &mut CatalogStore<B>,
    selector: &str,
    patch: ProductPatch,
) -> Result<CmdResult> {
    let target = resolve_selector(store, selector)?;
    let mut result = CmdResult::default();

    if patch.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Nothing to change for ({}): {}",
            target.index, target.product.name
        )));
        return Ok(result);
    }

    let form = patch.merge(target.product.form_data());
    store.update(&target.product.id, form)?;

    if let Some(updated) = store.get_by_id(&target.product.id) {
        result.add_message(CmdMessage::success(format!(
            "Product updated ({}): {}",
            target.index, updated.name
        )));
        result.affected_products.push(updated.clone());
    }

    Ok(result)
}
