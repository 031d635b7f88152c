//! Error types for segmentation and evaluation

use thiserror::Error;

/// Errors raised by the embedding capability
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Backend could not be initialised
    #[error("embedding backend initialisation failed: {0}")]
    InitFailed(String),

    /// A call to the backend failed
    #[error("embedding generation failed: {0}")]
    EmbeddingFailed(String),

    /// Backend returned a vector of the wrong length
    #[error("embedding dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension the backend advertises
        expected: usize,
        /// Dimension actually returned
        found: usize,
    },

    /// Unknown model name
    #[error("invalid embedding model: {0}")]
    InvalidModel(String),
}

/// Errors raised by the segmentation and evaluation pipeline
#[derive(Debug, Error)]
pub enum TilingError {
    /// Algorithm selector is not one of the supported strategies
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Dataset selector is not a known dataset
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),

    /// Configuration object failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Predicted and reference data for a meeting cannot be reconciled
    #[error("data alignment error in meeting '{meeting_id}': {reason}")]
    DataAlignment {
        /// Meeting the error belongs to
        meeting_id: String,
        /// What went wrong
        reason: String,
    },

    /// Dataset tables violate the loading contract
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Embedding backend failure
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Two metric reports share a key
    #[error("metric key collision: {0}")]
    MetricKeyCollision(String),

    /// No meeting survived a pipeline stage
    #[error("all {failed} meetings failed during {stage}")]
    AllMeetingsFailed {
        /// Stage name ("segmentation", "<granularity> scoring")
        stage: String,
        /// Number of meetings that failed
        failed: usize,
    },
}

impl TilingError {
    /// Shorthand for a [`TilingError::DataAlignment`]
    pub fn alignment(meeting_id: impl Into<String>, reason: impl Into<String>) -> Self {
        TilingError::DataAlignment {
            meeting_id: meeting_id.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error belongs to the configuration class
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TilingError::UnsupportedAlgorithm(_)
                | TilingError::UnknownDataset(_)
                | TilingError::InvalidConfig(_)
        )
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, TilingError>;
