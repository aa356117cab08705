use super::backend::CatalogBackend;
use crate::error::{CatalogError, Result};
use crate::model::{Product, ProductFormData};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

/// Catalog persisted by a remote HTTP service.
///
/// Endpoints, relative to the base URL:
/// - `GET    products`      -> `[Product]`
/// - `POST   products`      (form)       -> `Product`
/// - `PUT    products/{id}` (form)       -> `Product`, 404 if unknown
/// - `DELETE products/{id}`              -> any 2xx, 404 counts as gone
/// - `PUT    products`      (`[Product]`) -> any 2xx
///
/// Calls block until the service answers. Nothing is retried.
pub struct RemoteBackend {
    client: Client,
    base_url: Url,
}

impl RemoteBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build().map_err(transport_error)?;
        Self::with_client(client, base_url)
    }

    /// Create a backend with a custom reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| CatalogError::Config(format!("Invalid remote URL {}: {}", base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> Result<Url> {
        self.base_url
            .join("products")
            .map_err(|e| CatalogError::Config(format!("Invalid remote URL: {}", e)))
    }

    fn item_url(&self, id: &str) -> Result<Url> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::Config("Remote URL cannot be a base".to_string()))?
            .push(id);
        Ok(url)
    }
}

impl CatalogBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn fetch_all(&self) -> Result<Vec<Product>> {
        let url = self.collection_url()?;
        tracing::debug!(%url, "fetching catalog");
        let response = self.client.get(url).send().map_err(transport_error)?;
        decode(check(response)?)
    }

    fn insert(&self, product: &Product) -> Result<Product> {
        let url = self.collection_url()?;
        tracing::debug!(%url, name = %product.name, "creating product");
        let response = self
            .client
            .post(url)
            .json(&product.form_data())
            .send()
            .map_err(transport_error)?;
        decode(check(response)?)
    }

    fn update(
        &self,
        id: &str,
        form: &ProductFormData,
        _at: DateTime<Utc>,
    ) -> Result<Option<Product>> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "updating product");
        let response = self
            .client
            .put(url)
            .json(form)
            .send()
            .map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        decode(check(response)?).map(Some)
    }

    fn remove(&self, id: &str) -> Result<()> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "deleting product");
        let response = self.client.delete(url).send().map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        check(response)?;
        Ok(())
    }

    fn replace_all(&self, products: &[Product]) -> Result<()> {
        let url = self.collection_url()?;
        tracing::debug!(%url, count = products.len(), "replacing catalog");
        let response = self
            .client
            .put(url)
            .json(products)
            .send()
            .map_err(transport_error)?;
        check(response)?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> CatalogError {
    CatalogError::Backend(format!("request failed: {}", err))
}

fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(CatalogError::Backend(format!(
        "{}: {}",
        status,
        error_message(&body)
    )))
}

fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .map_err(|e| CatalogError::Backend(format!("invalid response: {}", e)))
}

/// Pulls a readable message out of an error body.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("error")
            .or_else(|| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => "no details".to_string(),
        None => body.trim().to_string(),
    }
}
