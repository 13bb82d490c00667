//! Seeding of an invocation
//!
//! Every invocation starts from a future produced by a [`Resolver`]. The
//! default, [`Immediate`], settles straight away to the starting value; hosts
//! and tests inject their own to control when the first step runs.

use crate::step::StepFuture;
use futures::future::{self, FutureExt};

/// Produces the first pending computation of an invocation
pub trait Resolver<T, E>: Send + Sync {
    /// Turn the starting value into the future the first step chains onto
    fn resolve(&self, value: T) -> StepFuture<T, E>;
}

/// Resolver that settles immediately to the starting value
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl<T, E> Resolver<T, E> for Immediate
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn resolve(&self, value: T) -> StepFuture<T, E> {
        future::ok(value).boxed()
    }
}

impl<T, E, F> Resolver<T, E> for F
where
    F: Fn(T) -> StepFuture<T, E> + Send + Sync,
{
    fn resolve(&self, value: T) -> StepFuture<T, E> {
        self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_immediate_resolves_to_input() {
        let resolver = Immediate;
        let seeded: Result<&str, ()> = resolver.resolve("start").await;

        assert_eq!(seeded, Ok("start"));
    }

    #[tokio::test]
    async fn test_closure_resolver() {
        let resolver = |v: i32| -> StepFuture<i32, String> { future::ok(v + 1).boxed() };

        assert_eq!(Resolver::resolve(&resolver, 1).await, Ok(2));
    }
}
