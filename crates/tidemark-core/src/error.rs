use thiserror::Error;

/// Workspace-wide error types for Tidemark.
#[derive(Debug, Error)]
pub enum TidemarkError {
    /// Arithmetic error (overflow, out-of-range conversion, fraction math).
    #[error("Arithmetic error: {0}")]
    Math(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// History source error (indexer or chain query failed).
    #[error("History source error: {0}")]
    Source(String),
}

impl From<serde_json::Error> for TidemarkError {
    fn from(e: serde_json::Error) -> Self {
        TidemarkError::Serialization(e.to_string())
    }
}

impl From<cosmwasm_std::OverflowError> for TidemarkError {
    fn from(e: cosmwasm_std::OverflowError) -> Self {
        TidemarkError::Math(e.to_string())
    }
}

impl From<cosmwasm_std::ConversionOverflowError> for TidemarkError {
    fn from(e: cosmwasm_std::ConversionOverflowError) -> Self {
        TidemarkError::Math(e.to_string())
    }
}

impl From<cosmwasm_std::CheckedMultiplyFractionError> for TidemarkError {
    fn from(e: cosmwasm_std::CheckedMultiplyFractionError) -> Self {
        TidemarkError::Math(e.to_string())
    }
}

impl From<cosmwasm_std::SignedDecimal256RangeExceeded> for TidemarkError {
    fn from(e: cosmwasm_std::SignedDecimal256RangeExceeded) -> Self {
        TidemarkError::Math(e.to_string())
    }
}
