use crate::error::Result;
use crate::model::{Product, ProductFormData};
use chrono::{DateTime, Utc};

/// Abstract interface for catalog persistence.
/// This trait handles the "where" of storage (memory, file, remote service),
/// while CatalogStore handles the "what" (capacity, uniqueness, notifications).
///
/// Every method takes `&self`: implementations either do stateless I/O or
/// keep their own interior mutability.
pub trait CatalogBackend {
    /// Short name for logs and status output.
    fn name(&self) -> &'static str;

    /// Load the full collection, in backend order.
    fn fetch_all(&self) -> Result<Vec<Product>>;

    /// Persist a new product.
    /// Returns the record as stored, which may carry a backend-assigned id
    /// or timestamps.
    fn insert(&self, product: &Product) -> Result<Product>;

    /// Apply `form` to the product with `id`, stamping `at`.
    /// Returns Ok(None) when the backend does not know the id and treats
    /// that as a no-op.
    fn update(&self, id: &str, form: &ProductFormData, at: DateTime<Utc>)
        -> Result<Option<Product>>;

    /// Remove a product. Unknown ids are not an error.
    fn remove(&self, id: &str) -> Result<()>;

    /// Replace the whole collection.
    fn replace_all(&self, products: &[Product]) -> Result<()>;
}

impl<B: CatalogBackend + ?Sized> CatalogBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn fetch_all(&self) -> Result<Vec<Product>> {
        (**self).fetch_all()
    }

    fn insert(&self, product: &Product) -> Result<Product> {
        (**self).insert(product)
    }

    fn update(
        &self,
        id: &str,
        form: &ProductFormData,
        at: DateTime<Utc>,
    ) -> Result<Option<Product>> {
        (**self).update(id, form, at)
    }

    fn remove(&self, id: &str) -> Result<()> {
        (**self).remove(id)
    }

    fn replace_all(&self, products: &[Product]) -> Result<()> {
        (**self).replace_all(products)
    }
}
