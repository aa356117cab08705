use super::backend::CatalogBackend;
use crate::error::{CatalogError, Result};
use crate::model::{Product, ProductFormData};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Durable local storage: the whole catalog lives in one JSON file.
///
/// Every change rewrites the file atomically (temp file, then rename), so a
/// reader never sees a half-written catalog.
pub struct FsBackend {
    data_file: PathBuf,
}

impl FsBackend {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn load(&self) -> Result<Vec<Product>> {
        if !self.data_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.data_file).map_err(CatalogError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(CatalogError::Serialization)?;
        Ok(products)
    }

    fn save(&self, products: &[Product]) -> Result<()> {
        let dir = match self.data_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(CatalogError::Io)?;
        }

        let content = serde_json::to_string_pretty(products).map_err(CatalogError::Serialization)?;

        let tmp_file = dir.join(format!(".products-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(CatalogError::Io)?;
        fs::rename(&tmp_file, &self.data_file).map_err(CatalogError::Io)?;

        tracing::debug!(
            path = %self.data_file.display(),
            count = products.len(),
            "catalog file written"
        );
        Ok(())
    }
}

impl CatalogBackend for FsBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn fetch_all(&self) -> Result<Vec<Product>> {
        self.load()
    }

    fn insert(&self, product: &Product) -> Result<Product> {
        let mut products = self.load()?;
        products.push(product.clone());
        self.save(&products)?;
        Ok(product.clone())
    }

    fn update(
        &self,
        id: &str,
        form: &ProductFormData,
        at: DateTime<Utc>,
    ) -> Result<Option<Product>> {
        let mut products = self.load()?;
        let updated = match products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.apply(form, at);
                product.clone()
            }
            None => return Ok(None),
        };
        self.save(&products)?;
        Ok(Some(updated))
    }

    fn remove(&self, id: &str) -> Result<()> {
        let mut products = self.load()?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() != before {
            self.save(&products)?;
        }
        Ok(())
    }

    fn replace_all(&self, products: &[Product]) -> Result<()> {
        self.save(products)
    }
}
