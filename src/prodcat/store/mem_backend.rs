use super::backend::CatalogBackend;
use crate::codec;
use crate::error::{CatalogError, Result};
use crate::model::{Product, ProductFormData};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};

/// Catalog shipped with the binary, used when no seed file is configured.
const BUILTIN_SEED: &str = r#"export const HARDCODED_PRODUCTS: Product[] = [
  {
    "id": "starter-guide",
    "name": "Starter Guide",
    "description": "A short walkthrough of the catalog and what each product is for.",
    "usageInstructions": "Open the link and follow the steps in order.",
    "externalLink": "https://example.com/guide",
    "createdAt": "2024-01-01T00:00:00Z",
    "updatedAt": "2024-01-01T00:00:00Z"
  },
  {
    "id": "support-desk",
    "name": "Support Desk",
    "description": "Where to ask questions and report problems with any product.",
    "usageInstructions": "Describe what you tried and attach a screenshot.",
    "externalLink": "https://example.com/support",
    "createdAt": "2024-01-01T00:00:00Z",
    "updatedAt": "2024-01-01T00:00:00Z"
  }
];"#;

/// In-memory backend, reseeded every time the process starts.
///
/// Uses `RefCell` for interior mutability since the catalog is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    products: RefCell<Vec<Product>>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(products: Vec<Product>) -> Self {
        Self {
            products: RefCell::new(products),
            simulate_write_error: Cell::new(false),
        }
    }

    /// Seeds from interchange text (a seed file's contents).
    pub fn from_seed_text(text: &str, max_products: usize) -> Result<Self> {
        Ok(Self::seeded(codec::import(text, max_products)?))
    }

    /// Seeds from the catalog compiled into the binary.
    pub fn builtin(max_products: usize) -> Result<Self> {
        let mut products = codec::import(BUILTIN_SEED, usize::MAX)?;
        products.truncate(max_products);
        Ok(Self::seeded(products))
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(CatalogError::Backend("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl CatalogBackend for MemBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn fetch_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.borrow().clone())
    }

    fn insert(&self, product: &Product) -> Result<Product> {
        self.check_writable()?;
        self.products.borrow_mut().push(product.clone());
        Ok(product.clone())
    }

    fn update(
        &self,
        id: &str,
        form: &ProductFormData,
        at: DateTime<Utc>,
    ) -> Result<Option<Product>> {
        self.check_writable()?;
        let mut products = self.products.borrow_mut();
        Ok(products.iter_mut().find(|p| p.id == id).map(|p| {
            p.apply(form, at);
            p.clone()
        }))
    }

    fn remove(&self, id: &str) -> Result<()> {
        self.check_writable()?;
        self.products.borrow_mut().retain(|p| p.id != id);
        Ok(())
    }

    fn replace_all(&self, products: &[Product]) -> Result<()> {
        self.check_writable()?;
        *self.products.borrow_mut() = products.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn test_builtin_seed_parses() {
        let backend = MemBackend::builtin(150).unwrap();
        let products = backend.fetch_all().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "starter-guide");
    }

    #[test]
    fn test_builtin_seed_respects_maximum() {
        let backend = MemBackend::builtin(1).unwrap();
        assert_eq!(backend.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn test_seed_text_is_validated() {
        let result = MemBackend::from_seed_text("[{\"id\":\"x\"}]", 10);
        assert!(matches!(result, Err(CatalogError::Format(_))));
    }

    #[test]
    fn test_update_unknown_id_is_none() {
        let backend = MemBackend::new();
        let result = backend
            .update("missing", &fixtures::form("A"), Utc::now())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_simulated_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        assert!(backend.insert(&fixtures::product("p1", "A")).is_err());
        assert!(backend.fetch_all().unwrap().is_empty());
    }
}
