//! Shared utilities and pure functions for flowchain
//!
//! This crate provides the helpers pipelines are usually built from: dotted
//! path access into JSON values, a copy-on-write lens, value-forwarding side
//! effects and `${path}` templates. All functions here are pure apart from
//! the side effects their callers hand in.

pub mod forward;
pub mod lens;
pub mod path;
pub mod template;
pub mod tracing;

pub use lens::{lens_over, over};
pub use template::{render, template};
