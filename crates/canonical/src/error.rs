use thiserror::Error;

/// Errors raised while validating normalization settings.
///
/// Normalization and tokenization themselves are infallible.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
