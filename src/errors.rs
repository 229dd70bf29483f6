use thiserror::Error;

/// Error type for the ambient configuration and formatting boundary.
///
/// The totals and schedule computations themselves are total functions and
/// never return this type; absence of a result is expressed as `Option`.
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}
