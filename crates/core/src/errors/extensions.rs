//! Extension traits for error handling

use super::types::{Error, Result};

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| add_context(message.into(), e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| add_context(f(), e.into()))
    }
}

// Keeps the variant so callers can still match on the failure kind.
fn add_context(context: String, error: Error) -> Error {
    match error {
        Error::Configuration { message } => Error::Configuration {
            message: format!("{context}: {message}"),
        },
        Error::Step { message } => Error::Step {
            message: format!("{context}: {message}"),
        },
        Error::Rejected { message } => Error::Rejected {
            message: format!("{context}: {message}"),
        },
        Error::Path { path, message } => Error::Path {
            path,
            message: format!("{context}: {message}"),
        },
        Error::Template {
            placeholder,
            message,
        } => Error::Template {
            placeholder,
            message: format!("{context}: {message}"),
        },
        Error::Json { message } => Error::Json {
            message: format!("{context}: {message}"),
        },
        other @ Error::UnknownStep { .. } => Error::Configuration {
            message: format!("{context}: {other}"),
        },
    }
}
