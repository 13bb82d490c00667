//! Catch handler payloads

use std::sync::Arc;

/// What a catch handler is called with
///
/// A registered handler is probed once with the starting value when an
/// invocation begins (unless disabled in `PipelineConfig`), and called again
/// with the raw error if the invocation fails.
#[derive(Debug)]
pub enum Caught<'a, T, E> {
    /// The starting value of an invocation that is about to run
    Probe(&'a T),
    /// The first failure of an invocation
    Failure(&'a E),
}

impl<'a, T, E> Caught<'a, T, E> {
    /// The failure, if this call reports one
    #[must_use]
    pub fn failure(&self) -> Option<&'a E> {
        match self {
            Caught::Failure(error) => Some(*error),
            Caught::Probe(_) => None,
        }
    }

    /// The starting value, if this call is the probe
    #[must_use]
    pub fn probe(&self) -> Option<&'a T> {
        match self {
            Caught::Probe(value) => Some(*value),
            Caught::Failure(_) => None,
        }
    }
}

pub(crate) type CatchFn<T, E> = Arc<dyn Fn(Caught<'_, T, E>) + Send + Sync>;
