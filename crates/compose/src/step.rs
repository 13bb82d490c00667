//! Pipeline steps
//!
//! A [`Step`] is one unit of a pipeline. Plain and async transforms receive
//! the current value; a pending step ignores it and substitutes whatever its
//! shared future settles to. Guarded and forked steps wrap another step and
//! keep its position in the pipeline.

use futures::future::{self, BoxFuture, FutureExt, Shared};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Future produced by applying a step to a value
pub type StepFuture<T, E> = BoxFuture<'static, Result<T, E>>;

type TransformFn<T, E> = dyn Fn(T) -> Result<T, E> + Send + Sync;
type AsyncFn<T, E> = dyn Fn(T) -> StepFuture<T, E> + Send + Sync;
type PredicateFn<T> = dyn Fn(&T) -> bool + Send + Sync;
type BranchFn<T> = dyn Fn(&T) -> T + Send + Sync;

/// One unit of work in a pipeline
pub enum Step<T, E> {
    /// Synchronous transform of the current value
    Transform(Arc<TransformFn<T, E>>),
    /// Transform returning a future that settles to the next value
    Async(Arc<AsyncFn<T, E>>),
    /// Computation awaited in place; its result replaces the current value
    Pending(Shared<StepFuture<T, E>>),
    /// Runs `inner` only when `predicate` holds for the current value
    Guarded {
        predicate: Arc<PredicateFn<T>>,
        inner: Arc<Step<T, E>>,
    },
    /// Runs `inner` on a copy (or `branch` of) the current value and forwards
    /// the original
    Forked {
        branch: Option<Arc<BranchFn<T>>>,
        inner: Arc<Step<T, E>>,
    },
}

/// Discriminant of a [`Step`], used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Transform,
    Async,
    Pending,
    Guarded,
    Forked,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Transform => "transform",
            StepKind::Async => "async",
            StepKind::Pending => "pending",
            StepKind::Guarded => "guarded",
            StepKind::Forked => "forked",
        };
        f.write_str(name)
    }
}

impl<T, E> Step<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Fallible synchronous transform
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + Send + Sync + 'static,
    {
        Step::Transform(Arc::new(f))
    }

    /// Infallible synchronous transform
    pub fn map<F>(f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Step::Transform(Arc::new(move |value| Ok(f(value))))
    }

    /// Transform returning a future
    pub fn future<F, Fut>(f: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Step::Async(Arc::new(move |value| f(value).boxed()))
    }

    /// Computation awaited in place of the current value
    ///
    /// The future is shared: every invocation of the pipeline observes the
    /// same settled result, and it only starts running once a pipeline
    /// reaches it.
    pub fn pending<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let boxed: StepFuture<T, E> = fut.boxed();
        Step::Pending(boxed.shared())
    }

    /// Already-settled pending value
    pub fn value(value: T) -> Self {
        Self::pending(future::ok(value))
    }

    /// Already-failed pending value
    pub fn rejected(error: E) -> Self {
        Self::pending(future::err(error))
    }

    /// Which variant this step is
    #[must_use]
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Transform(_) => StepKind::Transform,
            Step::Async(_) => StepKind::Async,
            Step::Pending(_) => StepKind::Pending,
            Step::Guarded { .. } => StepKind::Guarded,
            Step::Forked { .. } => StepKind::Forked,
        }
    }

    /// Wrap `inner` so it only runs when `predicate` holds
    pub fn guarded<P>(inner: Arc<Step<T, E>>, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Step::Guarded {
            predicate: Arc::new(predicate),
            inner,
        }
    }

    /// Wrap `inner` so it runs on a deep copy and the original value flows on
    pub fn forked(inner: Arc<Step<T, E>>) -> Self {
        Step::Forked {
            branch: None,
            inner,
        }
    }

    /// Wrap `inner` so it runs on `branch(&value)` and the original flows on
    pub fn forked_with<B>(inner: Arc<Step<T, E>>, branch: B) -> Self
    where
        B: Fn(&T) -> T + Send + Sync + 'static,
    {
        Step::Forked {
            branch: Some(Arc::new(branch)),
            inner,
        }
    }

    /// Apply this step to `value`
    ///
    /// Synchronous transforms and predicates run before this returns; only
    /// the settling of async and pending work is deferred to the future.
    pub fn apply(&self, value: T) -> StepFuture<T, E> {
        match self {
            Step::Transform(f) => future::ready(f(value)).boxed(),
            Step::Async(f) => f(value),
            Step::Pending(shared) => shared.clone().boxed(),
            Step::Guarded { predicate, inner } => {
                if predicate(&value) {
                    inner.apply(value)
                } else {
                    future::ok(value).boxed()
                }
            }
            Step::Forked { branch, inner } => {
                let branch_value = match branch {
                    Some(branch) => branch(&value),
                    None => value.clone(),
                };
                let side = inner.apply(branch_value);
                async move {
                    side.await?;
                    Ok::<T, E>(value)
                }
                .boxed()
            }
        }
    }
}

impl<T, E> Clone for Step<T, E>
where
    T: Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Step::Transform(f) => Step::Transform(Arc::clone(f)),
            Step::Async(f) => Step::Async(Arc::clone(f)),
            Step::Pending(shared) => Step::Pending(shared.clone()),
            Step::Guarded { predicate, inner } => Step::Guarded {
                predicate: Arc::clone(predicate),
                inner: Arc::clone(inner),
            },
            Step::Forked { branch, inner } => Step::Forked {
                branch: branch.clone(),
                inner: Arc::clone(inner),
            },
        }
    }
}

impl<T, E> fmt::Debug for Step<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Transform(_) => f.write_str("Step::Transform"),
            Step::Async(_) => f.write_str("Step::Async"),
            Step::Pending(_) => f.write_str("Step::Pending"),
            Step::Guarded { inner, .. } => f.debug_tuple("Step::Guarded").field(inner).finish(),
            Step::Forked { branch, inner } => f
                .debug_struct("Step::Forked")
                .field("branch", &branch.is_some())
                .field("inner", inner)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowchain_core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type TestStep = Step<i32, Error>;

    #[tokio::test]
    async fn test_transform_and_map() {
        let double = TestStep::map(|v| v * 2);
        let checked = TestStep::transform(|v| {
            if v > 0 {
                Ok(v)
            } else {
                Err(Error::step("not positive"))
            }
        });

        assert_eq!(double.apply(4).await, Ok(8));
        assert_eq!(checked.apply(1).await, Ok(1));
        assert_eq!(checked.apply(-1).await, Err(Error::step("not positive")));
    }

    #[tokio::test]
    async fn test_pending_substitutes_value() {
        let step = TestStep::value(42);

        assert_eq!(step.apply(1).await, Ok(42));
        // Shared: a second application sees the same settled result.
        assert_eq!(step.apply(2).await, Ok(42));
    }

    #[tokio::test]
    async fn test_pending_runs_once_across_applications() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);
        let step = TestStep::pending(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        });

        assert_eq!(step.apply(0).await, Ok(7));
        assert_eq!(step.apply(0).await, Ok(7));
        assert_eq!(polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_guarded_skips_when_predicate_false() {
        let inner = Arc::new(TestStep::map(|v| v + 100));
        let step = TestStep::guarded(inner, |v| *v > 10);

        assert_eq!(step.apply(1).await, Ok(1));
        assert_eq!(step.apply(11).await, Ok(111));
    }

    #[tokio::test]
    async fn test_forked_forwards_original_value() {
        let seen = Arc::new(AtomicUsize::new(0));
        let recorder = Arc::clone(&seen);
        let inner = Arc::new(TestStep::map(move |v| {
            recorder.store(v as usize, Ordering::SeqCst);
            v * 1000
        }));

        let plain = TestStep::forked(Arc::clone(&inner));
        assert_eq!(plain.apply(3).await, Ok(3));
        assert_eq!(seen.load(Ordering::SeqCst), 3);

        let branched = TestStep::forked_with(inner, |v| v + 1);
        assert_eq!(branched.apply(3).await, Ok(3));
        assert_eq!(seen.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_forked_propagates_branch_failure() {
        let inner = Arc::new(TestStep::transform(|_| Err(Error::step("branch"))));
        let step = TestStep::forked(inner);

        assert_eq!(step.apply(1).await, Err(Error::step("branch")));
    }

    #[test]
    fn test_kind_and_debug() {
        let inner = Arc::new(TestStep::map(|v| v));
        let step = TestStep::forked(Arc::new(TestStep::guarded(inner, |_| true)));

        assert_eq!(step.kind(), StepKind::Forked);
        assert_eq!(step.kind().to_string(), "forked");
        assert_eq!(
            format!("{step:?}"),
            "Step::Forked { branch: false, inner: Step::Guarded(Step::Transform) }"
        );
    }
}
