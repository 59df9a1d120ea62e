//! Error types for JSON:API list conversion

use thiserror::Error;

/// Boxed error raised by an element converter for a single item
pub type ElementSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// JSON:API codec error types
#[derive(Debug, Error)]
pub enum JsonApiError {
    /// The requested native type is not list-shaped at call time.
    #[error("Invalid target type: expected {expected}, found {found}")]
    InvalidTargetType {
        /// Shape the converter required
        expected: String,
        /// Shape that was actually requested
        found: String,
    },

    /// The document does not have the expected structure at this position.
    #[error(
        "Malformed document at '{path}': {reason}\n\
         \n\
         Resource collections must be nested as {{\"data\": [ ... ]}}."
    )]
    MalformedDocument {
        /// Cursor path where the problem was detected
        path: String,
        /// What was expected versus what was found
        reason: String,
    },

    /// The token stream ended while a value was still open.
    #[error("Unexpected end of document at '{path}'")]
    UnexpectedEnd {
        /// Cursor path at the point the stream ran out
        path: String,
    },

    /// An element converter failed for one item.
    #[error("Element conversion failed at '{path}': {source}")]
    Element {
        /// Cursor path of the failing element
        path: String,
        /// Underlying failure
        #[source]
        source: ElementSource,
    },

    /// A configured limit was exceeded.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// Configured limits are above the hard maximums.
    #[error("Configuration exceeds hard limits: {reason}")]
    ConfigurationExceedsHardLimits {
        /// Description of which limit was exceeded
        reason: String,
    },

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JsonApiError {
    /// Build a [`JsonApiError::MalformedDocument`] at the given path
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        JsonApiError::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a foreign element-level failure
    pub fn element<E>(path: impl Into<String>, source: E) -> Self
    where
        E: Into<ElementSource>,
    {
        JsonApiError::Element {
            path: path.into(),
            source: source.into(),
        }
    }

    /// True for structural failures of the document (missing `data`, bad nesting, truncation)
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            JsonApiError::MalformedDocument { .. } | JsonApiError::UnexpectedEnd { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, JsonApiError>;
