//! Error types for envelope decoding.

use contract_model::FallbackReason;
use thiserror::Error;

/// Reasons an envelope could not be turned into a field set.
///
/// None of these reach callers of the schema builder; each one selects
/// the fallback schema through [`EnvelopeError::fallback_reason`].
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("no field envelope supplied")]
    Absent,
    #[error("envelope is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("envelope must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("envelope has no `campi` field mapping")]
    MissingFieldMap,
    #[error("`campi` must be a JSON object, found {found}")]
    InvalidFieldMap { found: &'static str },
}

impl EnvelopeError {
    pub fn fallback_reason(&self) -> FallbackReason {
        match self {
            Self::Absent => FallbackReason::Absent,
            Self::MissingFieldMap => FallbackReason::EmptyFieldSet,
            Self::Json(_) | Self::NotAnObject { .. } | Self::InvalidFieldMap { .. } => {
                FallbackReason::DecodeFailure
            }
        }
    }
}
