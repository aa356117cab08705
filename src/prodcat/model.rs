use crate::error::{CatalogError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Names of the fields every accepted product must carry, in wire form.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "id",
    "name",
    "description",
    "usageInstructions",
    "externalLink",
];

/// One catalog entry.
///
/// Timestamps are optional on the wire: pasted interchange text may omit
/// them, and records built by the store always carry both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub usage_instructions: String,
    pub external_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Builds a fresh product from form data, stamped with `now`.
    pub fn from_form(id: String, form: &ProductFormData, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: form.name.clone(),
            description: form.description.clone(),
            usage_instructions: form.usage_instructions.clone(),
            external_link: form.external_link.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Replaces every caller-owned field and refreshes `updated_at`.
    ///
    /// `id` and `created_at` are left alone, and `updated_at` never moves
    /// backwards even if the clock does.
    pub fn apply(&mut self, form: &ProductFormData, now: DateTime<Utc>) {
        self.name = form.name.clone();
        self.description = form.description.clone();
        self.usage_instructions = form.usage_instructions.clone();
        self.external_link = form.external_link.clone();

        let floor = [self.created_at, self.updated_at]
            .into_iter()
            .flatten()
            .max();
        self.updated_at = Some(match floor {
            Some(prev) if prev > now => prev,
            _ => now,
        });
    }

    /// The caller-owned part of this product.
    pub fn form_data(&self) -> ProductFormData {
        ProductFormData {
            name: self.name.clone(),
            description: self.description.clone(),
            usage_instructions: self.usage_instructions.clone(),
            external_link: self.external_link.clone(),
        }
    }

    /// Case-insensitive match on name or description.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

/// Fields supplied by the caller when adding or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormData {
    pub name: String,
    pub description: String,
    pub usage_instructions: String,
    pub external_link: String,
}

impl ProductFormData {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        usage_instructions: impl Into<String>,
        external_link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            usage_instructions: usage_instructions.into(),
            external_link: external_link.into(),
        }
    }

    /// Fails on the first empty field, in form order.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("name", &self.name),
            ("description", &self.description),
            ("usageInstructions", &self.usage_instructions),
            ("externalLink", &self.external_link),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(CatalogError::InvalidProduct { field });
            }
        }
        Ok(())
    }
}

/// Generates an id that is not already taken by `existing`.
pub fn new_product_id(existing: &[Product]) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !existing.iter().any(|p| p.id == candidate) {
            return candidate;
        }
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub fn form(name: &str) -> ProductFormData {
        ProductFormData::new(
            name,
            format!("{} description", name),
            format!("How to use {}", name),
            format!("https://example.com/{}", name.to_lowercase()),
        )
    }

    pub fn product(id: &str, name: &str) -> Product {
        let mut product = Product::from_form(id.to_string(), &form(name), Utc::now());
        product.created_at = None;
        product.updated_at = None;
        product
    }
}
