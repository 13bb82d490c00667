//! Builder methods for creating errors with context

use super::types::Error;

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a step failure
    #[must_use]
    pub fn step(message: impl Into<String>) -> Self {
        Error::Step {
            message: message.into(),
        }
    }

    /// Create a rejection error
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Error::Rejected {
            message: message.into(),
        }
    }

    /// Create an unknown step handle error
    #[must_use]
    pub fn unknown_step(index: usize, len: usize) -> Self {
        Error::UnknownStep { index, len }
    }

    /// Create a nested path error
    #[must_use]
    pub fn path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Path {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a template interpolation error
    #[must_use]
    pub fn template(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Template {
            placeholder: placeholder.into(),
            message: message.into(),
        }
    }

    /// Create a JSON error
    #[must_use]
    pub fn json(message: impl Into<String>) -> Self {
        Error::Json {
            message: message.into(),
        }
    }

    /// Whether this error came from a pending computation rather than a step
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Rejected { .. })
    }
}
