//! Error types for rate resolution and export

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("No conversion path found for currency: {currency}")]
    NotFound { currency: String },

    #[error("Malformed exchange rate at index {index}: {field}")]
    MalformedEdge { index: usize, field: String },

    #[error("Failed to render rates table: {0}")]
    Render(String),

    #[error("Cyclic conversion path: {}", path.join(" -> "))]
    CyclicPath { path: Vec<String> },
}

pub type Result<T> = std::result::Result<T, ConversionError>;
