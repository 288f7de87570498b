//! Error types for auth-TLS annotation extraction

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while extracting an auth-TLS configuration
#[derive(Error, Debug)]
pub enum Error {
    /// Annotation key not present on the resource
    #[error("annotation '{key}' is not present")]
    MissingAnnotation {
        /// Fully prefixed annotation key
        key: String,
    },

    /// Annotation value present but malformed for the requested type
    #[error("annotation '{key}' is invalid: {reason}")]
    InvalidAnnotation {
        /// Fully prefixed annotation key
        key: String,
        /// What made the value unusable
        reason: String,
    },

    /// Extracted configuration failed local validation
    #[error("{0}")]
    InvalidConfiguration(String),

    /// The certificate resolver failed for a syntactically valid reference
    ///
    /// The resolver's own error stays reachable through
    /// [`std::error::Error::source`].
    #[error("error obtaining certificate")]
    CertificateResolution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Create a [`Error::MissingAnnotation`] for `key`
    pub fn missing_annotation(key: impl Into<String>) -> Self {
        Self::MissingAnnotation { key: key.into() }
    }

    /// Create an [`Error::InvalidAnnotation`] for `key`
    pub fn invalid_annotation(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAnnotation {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` when the error means the annotation simply was not set
    #[must_use]
    pub fn is_missing_annotation(&self) -> bool {
        matches!(self, Self::MissingAnnotation { .. })
    }
}
