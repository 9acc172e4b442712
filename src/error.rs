use std::fmt;

use thiserror::Error;

/// Which facade operation a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    Edit,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Create => write!(f, "create"),
            OperationKind::Edit => write!(f, "edit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageGenError {
    #[error("configuration error: {0}")]
    Config(String),

    /// The parameter set is incompatible with the selected model.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error("unsupported image model: {0}")]
    UnsupportedModel(String),

    /// Network-level failure: timeout, connection reset, cancelled call.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    ProviderCall { status: u16, body: String },

    /// The response body matched neither of the known JSON shapes.
    #[error("unrecognized provider response: {body}")]
    MalformedResponse { body: String },

    /// A component failure annotated with the model and operation it
    /// happened in. The original cause is kept as the error source.
    #[error("image {operation} failed for {model}: {source}")]
    Operation {
        model: &'static str,
        operation: OperationKind,
        #[source]
        source: Box<ImageGenError>,
    },
}

impl ImageGenError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        ImageGenError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn in_operation(self, model: &'static str, operation: OperationKind) -> Self {
        ImageGenError::Operation {
            model,
            operation,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageGenError>;
