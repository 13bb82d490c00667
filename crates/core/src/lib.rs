//! Core errors, constants, and configuration for `flowchain`.
//!
//! This crate holds the pieces every other flowchain crate agrees on.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   plus the `ResultExt` trait for attaching context to failures.
//! - **`config`**: `PipelineConfig`, the immutable settings a pipeline is
//!   invoked with.
//! - **`constants`**: Environment variable names and shared defaults.

pub mod config;
pub mod constants;
pub mod errors;

pub use self::{
    config::PipelineConfig,
    constants::*,
    errors::{Error, Result, ResultExt},
};
