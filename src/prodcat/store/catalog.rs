use super::backend::CatalogBackend;
use crate::error::{CatalogError, Result};
use crate::model::{new_product_id, Product, ProductFormData};
use chrono::Utc;
use std::fmt;

/// What changed in a committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogChange {
    Added(String),
    Updated(String),
    Deleted(String),
    Replaced(usize),
    Synced(usize),
}

impl fmt::Display for CatalogChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogChange::Added(id) => write!(f, "added {}", id),
            CatalogChange::Updated(id) => write!(f, "updated {}", id),
            CatalogChange::Deleted(id) => write!(f, "deleted {}", id),
            CatalogChange::Replaced(n) => write!(f, "replaced with {} products", n),
            CatalogChange::Synced(n) => write!(f, "synced {} products", n),
        }
    }
}

type Listener = Box<dyn FnMut(&CatalogChange)>;

/// The single owner of the product collection.
///
/// Mutations go to the backend first and are committed to the in-memory list
/// only once the backend accepts them, so a failed write leaves the list as
/// it was.
pub struct CatalogStore<B: CatalogBackend> {
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    products: Vec<Product>,
    max_products: usize,
    listeners: Vec<Listener>,
}

impl<B: CatalogBackend> CatalogStore<B> {
    /// Loads the collection from `backend`, keeping at most `max_products`.
    pub fn open(backend: B, max_products: usize) -> Result<Self> {
        let mut store = Self {
            backend,
            products: Vec::new(),
            max_products,
            listeners: Vec::new(),
        };
        store.products = store.load()?;
        Ok(store)
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn max_products(&self) -> usize {
        self.max_products
    }

    pub fn can_add_more(&self) -> bool {
        self.products.len() < self.max_products
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Registers a callback run after every committed change.
    pub fn subscribe(&mut self, listener: impl FnMut(&CatalogChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Adds a product built from `form`.
    ///
    /// Returns Ok(None) without touching anything when the catalog is full.
    pub fn add(&mut self, form: ProductFormData) -> Result<Option<Product>> {
        form.validate()?;

        if !self.can_add_more() {
            tracing::warn!(max = self.max_products, "catalog is full, product not added");
            return Ok(None);
        }

        let draft = Product::from_form(new_product_id(&self.products), &form, Utc::now());
        let stored = self.backend.insert(&draft)?;

        if self.get_by_id(&stored.id).is_some() {
            return Err(CatalogError::Backend(format!(
                "backend returned an id already in the catalog: {}",
                stored.id
            )));
        }

        tracing::debug!(id = %stored.id, name = %stored.name, "product added");
        self.products.push(stored.clone());
        self.notify(CatalogChange::Added(stored.id.clone()));
        Ok(Some(stored))
    }

    /// Replaces every field of `id` except its identity and creation time.
    ///
    /// Unknown ids are a silent no-op unless the backend reports them.
    pub fn update(&mut self, id: &str, form: ProductFormData) -> Result<()> {
        form.validate()?;

        let now = Utc::now();
        let stored = self.backend.update(id, &form, now)?;

        let Some(position) = self.products.iter().position(|p| p.id == id) else {
            tracing::debug!(id, "update for unknown product ignored");
            return Ok(());
        };

        let local = &mut self.products[position];
        match stored {
            Some(mut stored) => {
                // The local record keeps its identity whatever the backend echoes.
                stored.id = local.id.clone();
                if stored.created_at.is_none() {
                    stored.created_at = local.created_at;
                }
                *local = stored;
            }
            None => local.apply(&form, now),
        }

        tracing::debug!(id, "product updated");
        self.notify(CatalogChange::Updated(id.to_string()));
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.backend.remove(id)?;

        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            tracing::debug!(id, "delete for unknown product ignored");
            return Ok(());
        }

        tracing::debug!(id, "product deleted");
        self.notify(CatalogChange::Deleted(id.to_string()));
        Ok(())
    }

    /// Replaces the whole collection.
    ///
    /// Returns Ok(false) without touching anything when `products` is over
    /// the maximum. Record shape is assumed to be validated already.
    pub fn import_bulk(&mut self, products: Vec<Product>) -> Result<bool> {
        if products.len() > self.max_products {
            tracing::warn!(
                count = products.len(),
                max = self.max_products,
                "import rejected, too many products"
            );
            return Ok(false);
        }

        self.backend.replace_all(&products)?;
        let count = products.len();
        self.products = products;

        tracing::debug!(count, "catalog replaced");
        self.notify(CatalogChange::Replaced(count));
        Ok(true)
    }

    /// Reloads the collection from the backend.
    pub fn sync(&mut self) -> Result<()> {
        self.products = self.load()?;
        self.notify(CatalogChange::Synced(self.products.len()));
        Ok(())
    }

    /// Fetches the collection. When it is over the maximum, the extra
    /// products are dropped from the backend too, so later writes and the
    /// next load agree with the in-memory list.
    fn load(&self) -> Result<Vec<Product>> {
        let mut products = self.backend.fetch_all()?;
        if products.len() > self.max_products {
            tracing::warn!(
                found = products.len(),
                max = self.max_products,
                backend = self.backend.name(),
                "stored catalog over the maximum, extra products dropped"
            );
            products.truncate(self.max_products);
            self.backend.replace_all(&products)?;
        }
        Ok(products)
    }

    fn notify(&mut self, change: CatalogChange) {
        for listener in &mut self.listeners {
            listener(&change);
        }
    }
}
