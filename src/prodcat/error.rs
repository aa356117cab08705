use thiserror::Error;

/// Why a piece of interchange text was rejected.
///
/// Every variant names the rule that failed so the caller can show it to
/// the user and let them fix the pasted text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("no products code provided")]
    Empty,

    #[error("not parseable: {0}")]
    NotParseable(String),

    #[error("not an array")]
    NotAnArray,

    #[error("product {position} is not an object")]
    NotAnObject { position: usize },

    #[error("missing required field: {field} (product {position})")]
    MissingField {
        position: usize,
        field: &'static str,
    },

    #[error("duplicate id: {0}")]
    DuplicateId(String),

    #[error("exceeds maximum: {count} products given, at most {max} allowed")]
    ExceedsMaximum { count: usize, max: usize },

    #[error("invalid declaration name: {0:?}")]
    InvalidDeclarationName(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Missing required field: {field}")]
    InvalidProduct { field: &'static str },

    #[error("Import failed: {0}")]
    Format(#[from] FormatError),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
