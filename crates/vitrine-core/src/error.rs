//! Error types for the pipeline.

use thiserror::Error;

/// Errors that can occur while configuring or running a view pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A size, height or column set that would leave the pipeline in an
    /// unusable state (zero page size, zero row height, duplicate keys).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A sort or filter option was selected by a label nobody registered.
    #[error("unknown {kind} option: '{label}'")]
    UnknownOption { kind: &'static str, label: String },

    /// A record could not be built from the supplied data.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// Options could not be parsed.
    #[error("invalid options: {0}")]
    Config(String),

    /// A caller-supplied comparator or predicate failed.
    #[error("collaborator failure: {0}")]
    CollaboratorFailure(#[from] CollaboratorError),
}

impl PipelineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PipelineError::InvalidConfiguration(msg.into())
    }
}

/// Failure reported by a caller-supplied comparator or predicate.
///
/// The pipeline never swallows these: the first failure aborts the running
/// sort or filter pass and surfaces as [`PipelineError::CollaboratorFailure`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CollaboratorError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CollaboratorError {
    /// Creates a failure with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        CollaboratorError {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error.
    pub fn from_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CollaboratorError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
