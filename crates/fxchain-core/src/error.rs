//! Error types shared by conversion, stages and the pipeline executor.

use thiserror::Error;

/// Errors that can occur while converting or processing a buffer.
///
/// Every variant is scoped to a single request: the caller can correct the
/// input and retry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// The sample encoding is not one of the supported PCM/float formats.
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// A supplied or mapped parameter is outside its valid physical range.
    #[error("invalid parameter '{param}' for {stage}: {reason}")]
    InvalidParameter {
        /// Stage (or component) that owns the parameter.
        stage: &'static str,
        /// Name of the offending parameter.
        param: &'static str,
        /// Description of why the value was rejected.
        reason: String,
    },

    /// A stage produced a NaN or infinite sample.
    #[error("non-finite sample at index {index} after {stage}")]
    NumericInstability {
        /// Stage after which the sample was found.
        stage: &'static str,
        /// Index of the first non-finite sample.
        index: usize,
    },
}

impl Error {
    /// Create an invalid parameter error.
    pub fn invalid(stage: &'static str, param: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            stage,
            param,
            reason: reason.into(),
        }
    }
}

/// Convenience result type for fxchain operations.
pub type Result<T> = std::result::Result<T, Error>;
