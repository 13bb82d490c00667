//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::Step { message } => {
                write!(f, "step failed: {message}")
            }
            Error::Rejected { message } => {
                write!(f, "pending computation rejected: {message}")
            }
            Error::UnknownStep { index, len } => {
                write!(
                    f,
                    "step handle {index} does not exist in a pipeline of {len} steps"
                )
            }
            Error::Path { path, message } => {
                write!(f, "path '{path}' error: {message}")
            }
            Error::Template {
                placeholder,
                message,
            } => {
                write!(f, "failed to interpolate '${{{placeholder}}}': {message}")
            }
            Error::Json { message } => {
                write!(f, "JSON error: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_rejection_display() {
        assert_eq!(Error::step("boom").to_string(), "step failed: boom");
        assert_eq!(
            Error::rejected("timeout").to_string(),
            "pending computation rejected: timeout"
        );
    }

    #[test]
    fn test_template_display_keeps_placeholder_syntax() {
        let error = Error::Template {
            placeholder: "user.name".to_string(),
            message: "path not found".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "failed to interpolate '${user.name}': path not found"
        );
    }
}
