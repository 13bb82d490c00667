//! Conversion implementations for error types

use super::types::Error;

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::json(error.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Error::step(format!("{error:#}"))
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::step(message)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::step(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_json_error_becomes_json_variant() {
        let error: Error = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();

        assert!(matches!(error, Error::Json { .. }));
        assert!(error.to_string().starts_with("JSON error: "));
    }

    #[test]
    fn test_anyhow_and_strings_become_step_failures() {
        let chained = anyhow::anyhow!("disk full").context("saving order");

        assert_eq!(
            Error::from(chained),
            Error::step("saving order: disk full")
        );
        assert_eq!(Error::from("bad input"), Error::step("bad input"));
        assert_eq!(Error::from(String::from("bad input")), Error::step("bad input"));
    }
}
