//! The pipeline builder
//!
//! A [`Pipeline`] owns an ordered list of steps and can be invoked any number
//! of times. Each invocation snapshots the current list, so modifying the
//! pipeline afterwards never affects a run that is already in flight.

use crate::catch::{CatchFn, Caught};
use crate::resolver::{Immediate, Resolver};
use crate::step::{Step, StepFuture};
use flowchain_core::{Error, PipelineConfig};
use flowchain_utils::tracing::{pipeline_span, step_span};
use futures::FutureExt;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::Instrument;

static NEXT_PIPELINE_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies one step of a specific pipeline
///
/// Returned by [`Pipeline::push`] and accepted by [`Pipeline::guard`] and
/// [`Pipeline::fork_at`], so modifiers never depend on call ordering. A handle
/// is only valid for the pipeline that minted it (and clones of it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepHandle {
    pipeline: u64,
    index: usize,
}

impl StepHandle {
    /// Position of the step in its pipeline
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }
}

/// Ordered, re-invocable chain of steps
pub struct Pipeline<T, E = Error> {
    id: u64,
    steps: Vec<Arc<Step<T, E>>>,
    catch: Option<CatchFn<T, E>>,
    resolver: Arc<dyn Resolver<T, E>>,
    config: PipelineConfig,
}

/// Build a pipeline from zero or more initial steps
pub fn compose<T, E>(steps: impl IntoIterator<Item = Step<T, E>>) -> Pipeline<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    Pipeline::new().then_all(steps)
}

impl<T, E> Pipeline<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create an empty (identity) pipeline
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_PIPELINE_ID.fetch_add(1, Ordering::Relaxed),
            steps: Vec::new(),
            catch: None,
            resolver: Arc::new(Immediate),
            config: PipelineConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the resolver that seeds each invocation
    #[must_use]
    pub fn with_resolver<R>(mut self, resolver: R) -> Self
    where
        R: Resolver<T, E> + 'static,
    {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Append a step
    #[must_use]
    pub fn then(mut self, step: Step<T, E>) -> Self {
        self.push(step);
        self
    }

    /// Append several steps in order
    #[must_use]
    pub fn then_all(mut self, steps: impl IntoIterator<Item = Step<T, E>>) -> Self {
        for step in steps {
            self.push(step);
        }
        self
    }

    /// Append a step and return its handle
    pub fn push(&mut self, step: Step<T, E>) -> StepHandle {
        self.steps.push(Arc::new(step));
        self.handle(self.steps.len() - 1)
    }

    /// Guard the most recently appended step with `predicate`
    ///
    /// Has no effect (beyond a warning) on an empty pipeline.
    #[must_use]
    pub fn when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        match self.last_step() {
            Some(handle) => self.wrap(handle, |inner| Step::guarded(inner, predicate)),
            None => tracing::warn!("when() called on an empty pipeline; ignoring"),
        }
        self
    }

    /// Fork the most recently appended step onto a deep copy of the value
    #[must_use]
    pub fn fork(mut self) -> Self {
        match self.last_step() {
            Some(handle) => self.wrap(handle, Step::forked),
            None => tracing::warn!("fork() called on an empty pipeline; ignoring"),
        }
        self
    }

    /// Fork the most recently appended step onto `branch(&value)`
    #[must_use]
    pub fn fork_with<B>(mut self, branch: B) -> Self
    where
        B: Fn(&T) -> T + Send + Sync + 'static,
    {
        match self.last_step() {
            Some(handle) => self.wrap(handle, |inner| Step::forked_with(inner, branch)),
            None => tracing::warn!("fork_with() called on an empty pipeline; ignoring"),
        }
        self
    }

    /// Guard the step identified by `handle`
    pub fn guard<P>(&mut self, handle: StepHandle, predicate: P) -> flowchain_core::Result<()>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.check(handle)?;
        self.wrap(handle, |inner| Step::guarded(inner, predicate));
        Ok(())
    }

    /// Fork the step identified by `handle`, optionally through `branch`
    pub fn fork_at<B>(&mut self, handle: StepHandle, branch: Option<B>) -> flowchain_core::Result<()>
    where
        B: Fn(&T) -> T + Send + Sync + 'static,
    {
        self.check(handle)?;
        match branch {
            Some(branch) => self.wrap(handle, |inner| Step::forked_with(inner, branch)),
            None => self.wrap(handle, Step::forked),
        }
        Ok(())
    }

    /// Install the catch handler, replacing any previous one
    #[must_use]
    pub fn catch<H>(mut self, handler: H) -> Self
    where
        H: Fn(Caught<'_, T, E>) + Send + Sync + 'static,
    {
        self.catch = Some(Arc::new(handler));
        self
    }

    /// Handle of the most recently appended step
    #[must_use]
    pub fn last_step(&self) -> Option<StepHandle> {
        self.steps
            .len()
            .checked_sub(1)
            .map(|index| self.handle(index))
    }

    /// Step behind `handle`, if the handle belongs to this pipeline
    #[must_use]
    pub fn step(&self, handle: StepHandle) -> Option<&Step<T, E>> {
        if handle.pipeline != self.id {
            return None;
        }
        self.steps.get(handle.index).map(|step| &**step)
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether a catch handler is installed
    #[must_use]
    pub fn has_catch(&self) -> bool {
        self.catch.is_some()
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Invoke the pipeline with a starting value
    ///
    /// The catch handler probe (if enabled) happens before this returns. The
    /// returned future runs the steps strictly in order and settles to the
    /// final value or the first error; on error the catch handler is called
    /// with it before the future completes.
    pub fn run(&self, start: T) -> StepFuture<T, E> {
        let span = pipeline_span(self.config.name.as_deref(), self.steps.len());

        if let Some(handler) = &self.catch {
            if self.config.probe_catch_handler {
                span.in_scope(|| tracing::trace!("probing catch handler with starting value"));
                handler(Caught::Probe(&start));
            }
        }

        let seed = self.resolver.resolve(start);
        let steps = self.steps.clone();
        let catch = self.catch.clone();
        let trace_steps = self.config.trace_steps;

        async move {
            let outcome = drive(seed, &steps, trace_steps).await;
            if let Err(error) = &outcome {
                if let Some(handler) = &catch {
                    tracing::debug!("delivering failure to catch handler");
                    handler(Caught::Failure(error));
                }
            }
            outcome
        }
        .instrument(span)
        .boxed()
    }

    /// Turn this pipeline into an async step of another pipeline
    #[must_use]
    pub fn into_step(self) -> Step<T, E> {
        let pipeline = Arc::new(self);
        Step::Async(Arc::new(move |value| pipeline.run(value)))
    }

    fn handle(&self, index: usize) -> StepHandle {
        StepHandle {
            pipeline: self.id,
            index,
        }
    }

    fn check(&self, handle: StepHandle) -> flowchain_core::Result<()> {
        if handle.pipeline == self.id && handle.index < self.steps.len() {
            Ok(())
        } else {
            Err(Error::unknown_step(handle.index, self.steps.len()))
        }
    }

    fn wrap<F>(&mut self, handle: StepHandle, wrapper: F)
    where
        F: FnOnce(Arc<Step<T, E>>) -> Step<T, E>,
    {
        if let Some(slot) = self.steps.get_mut(handle.index) {
            let inner = Arc::clone(slot);
            *slot = Arc::new(wrapper(inner));
        }
    }
}

async fn drive<T, E>(
    seed: StepFuture<T, E>,
    steps: &[Arc<Step<T, E>>],
    trace_steps: bool,
) -> Result<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    let mut value = seed.await?;

    for (index, step) in steps.iter().enumerate() {
        let next = if trace_steps {
            let span = step_span(index, &step.kind().to_string());
            let pending = span.in_scope(|| step.apply(value));
            pending.instrument(span).await
        } else {
            step.apply(value).await
        };

        value = match next {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!(step = index, kind = %step.kind(), "step failed");
                return Err(error);
            }
        };
    }

    Ok(value)
}

impl<T, E> Default for Pipeline<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Pipeline<T, E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            steps: self.steps.clone(),
            catch: self.catch.clone(),
            resolver: Arc::clone(&self.resolver),
            config: self.config.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Pipeline<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("id", &self.id)
            .field("steps", &self.steps)
            .field("catch", &self.catch.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
