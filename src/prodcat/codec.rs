//! # Code Interchange
//!
//! Converts the catalog to and from a textual form that can be copied
//! between machines by hand, or pasted straight into a source file.
//!
//! ## Grammar
//!
//! ```text
//! text        := declaration | payload
//! declaration := ["export"] ("const" | "let") IDENT [":" "Product" "[" "]"] "=" payload [";"]
//! payload     := JSON array of product objects [";"]
//! ```
//!
//! Text that starts with one of the declaration keywords must match the
//! whole declaration template. Anything else is parsed as a bare payload.
//! There is no best-effort scanning for brackets: input is either in one of
//! these two shapes or it is rejected with a [`FormatError`] naming the
//! rule it broke.
//!
//! ## Validation order
//!
//! 1. payload parses as JSON
//! 2. payload is an array
//! 3. every element is an object carrying the required fields
//! 4. ids are unique
//! 5. the array fits within the configured maximum
//!
//! Records are returned exactly as decoded. Nothing is coerced or filled in.
//! Keys that are not product fields are ignored.

use crate::error::FormatError;
use crate::model::{Product, REQUIRED_FIELDS};
use serde_json::Value;
use std::collections::HashSet;

pub const DEFAULT_DECLARATION_NAME: &str = "HARDCODED_PRODUCTS";

const TYPE_ANNOTATION: &str = "Product[]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStyle {
    /// Just the pretty-printed array.
    Bare,
    /// `export const NAME: Product[] = [...];`
    Declaration(String),
}

impl Default for ExportStyle {
    fn default() -> Self {
        ExportStyle::Declaration(DEFAULT_DECLARATION_NAME.to_string())
    }
}

pub fn export(products: &[Product], style: &ExportStyle) -> Result<String, FormatError> {
    let array = serde_json::to_string_pretty(products)
        .map_err(|e| FormatError::NotParseable(e.to_string()))?;

    match style {
        ExportStyle::Bare => Ok(array),
        ExportStyle::Declaration(name) => {
            if !is_identifier(name) {
                return Err(FormatError::InvalidDeclarationName(name.clone()));
            }
            Ok(format!(
                "export const {}: {} = {};",
                name, TYPE_ANNOTATION, array
            ))
        }
    }
}

pub fn import(text: &str, max_products: usize) -> Result<Vec<Product>, FormatError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FormatError::Empty);
    }

    let payload = strip_declaration(trimmed)?;
    let payload = payload.strip_suffix(';').unwrap_or(payload).trim_end();

    let value: Value =
        serde_json::from_str(payload).map_err(|e| FormatError::NotParseable(e.to_string()))?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(FormatError::NotAnArray),
    };

    let mut products = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let position = i + 1;
        check_required_fields(&item, position)?;
        let product: Product = serde_json::from_value(item)
            .map_err(|e| FormatError::NotParseable(format!("product {}: {}", position, e)))?;
        products.push(product);
    }

    let mut seen = HashSet::new();
    for product in &products {
        if !seen.insert(product.id.as_str()) {
            return Err(FormatError::DuplicateId(product.id.clone()));
        }
    }

    if products.len() > max_products {
        return Err(FormatError::ExceedsMaximum {
            count: products.len(),
            max: max_products,
        });
    }

    Ok(products)
}

fn check_required_fields(item: &Value, position: usize) -> Result<(), FormatError> {
    let object = item
        .as_object()
        .ok_or(FormatError::NotAnObject { position })?;

    for field in REQUIRED_FIELDS {
        let present = object
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty());
        if !present {
            return Err(FormatError::MissingField { position, field });
        }
    }
    Ok(())
}

/// Returns the payload part of `text`.
///
/// Text that does not open with a declaration keyword is returned as is.
fn strip_declaration(text: &str) -> Result<&str, FormatError> {
    let mut cursor = Cursor::new(text);

    let first = cursor.word();
    let keyword = match first {
        Some("export") => {
            cursor.skip_ws();
            cursor.word()
        }
        Some("const") | Some("let") => first,
        _ => return Ok(text),
    };
    if !matches!(keyword, Some("const") | Some("let")) {
        return Err(malformed("expected `const` after `export`"));
    }

    cursor.skip_ws();
    match cursor.word() {
        Some(name) if is_identifier(name) => {}
        _ => return Err(malformed("expected a variable name")),
    }

    cursor.skip_ws();
    if cursor.eat(":") {
        cursor.skip_ws();
        if !cursor.eat("Product") {
            return Err(malformed("expected type `Product[]`"));
        }
        cursor.skip_ws();
        if !cursor.eat("[") {
            return Err(malformed("expected type `Product[]`"));
        }
        cursor.skip_ws();
        if !cursor.eat("]") {
            return Err(malformed("expected type `Product[]`"));
        }
        cursor.skip_ws();
    }

    if !cursor.eat("=") {
        return Err(malformed("expected `=`"));
    }
    cursor.skip_ws();
    Ok(cursor.rest())
}

fn malformed(detail: &str) -> FormatError {
    FormatError::NotParseable(format!(
        "malformed declaration, {} (expected `export const NAME: {} = [...];` or a bare array)",
        detail, TYPE_ANNOTATION
    ))
}

/// Whether `name` can be used as the declared constant name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consumes an identifier-like word, if one starts here.
    fn word(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }
}
