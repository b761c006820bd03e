//! Error types for the type generator

use thiserror::Error;

/// Result type for conversion and rendering operations
pub type Result<T> = std::result::Result<T, TypegenError>;

/// Type generator errors
#[derive(Error, Debug)]
pub enum TypegenError {
    #[error("reference not found: {reference}")]
    UnresolvedRef { reference: String },

    #[error("unsupported schema composition at {path}: $ref cannot be combined with sibling keys")]
    RefWithSiblings { path: String },

    #[error("invalid rule predicate at index {index}: {message}")]
    InvalidRule { index: usize, message: String },

    #[error("malformed schema at {path}: {detail}")]
    MalformedSchema { path: String, detail: String },

    #[error("resolution context dropped before rendering")]
    ContextReleased,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}
