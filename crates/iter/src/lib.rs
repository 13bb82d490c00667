//! Sequential continuation-passing iteration
//!
//! [`iterate`] visits a sequence one element at a time. Each callback decides
//! when the following element runs by resuming its [`Next`] continuation, so
//! callbacks may do async work in between. [`iterate_async`] wraps the same
//! machinery in a future.

pub mod error;
pub mod sequence;

pub use error::{ElementFault, IterateError};
pub use sequence::{iterate, iterate_async, Next};
