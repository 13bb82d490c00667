//! Core error type definitions

/// Result type alias for flowchain operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for flowchain operations using thiserror
///
/// The type is `Clone` because a failure produced by a pending-value step is
/// observed by every invocation that awaits the same shared computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    Configuration { message: String },

    /// A step failed while transforming the current value
    Step { message: String },

    /// A pending computation settled with a failure
    Rejected { message: String },

    /// A step handle that does not belong to the pipeline
    UnknownStep { index: usize, len: usize },

    /// Nested path access errors
    Path { path: String, message: String },

    /// Template interpolation errors
    Template { placeholder: String, message: String },

    /// JSON serialization/deserialization errors
    Json { message: String },
}
