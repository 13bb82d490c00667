//! Continuation-passing iteration over a fixed sequence
//!
//! The callback for each element receives a [`Next`] continuation. Nothing
//! happens until the callback resumes it, which lets the callback finish async
//! work (on another task or thread) before the following element runs.
//!
//! Resuming synchronously from inside the callback nests the next call on the
//! current stack, so very long sequences should resume from a spawned task.

use crate::error::{ElementFault, IterateError};
use flowchain_utils::tracing::iteration_span;
use futures::channel::oneshot;
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type DoneFn<E> = Box<dyn FnOnce(Result<(), ElementFault<E>>) + Send>;

trait Resume: Send + Sync {
    fn resume(self: Arc<Self>, index: usize);
    fn len(&self) -> usize;
}

/// Continuation that runs the following element, or finishes the iteration
/// after the last one
#[must_use = "iteration stalls unless the continuation is resumed"]
pub struct Next {
    state: Arc<dyn Resume>,
    index: usize,
}

impl Next {
    /// Continue with the following element
    pub fn resume(self) {
        self.state.resume(self.index);
    }

    /// Index of the element this continuation runs
    ///
    /// Equal to the sequence length when resuming finishes the iteration.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether resuming finishes the iteration instead of running an element
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.index >= self.state.len()
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("index", &self.index)
            .field("len", &self.state.len())
            .finish()
    }
}

struct Iteration<T, E, F> {
    items: Mutex<Vec<Option<T>>>,
    len: usize,
    per_element: F,
    done: Mutex<Option<DoneFn<E>>>,
    halted: AtomicBool,
}

impl<T, E, F> Iteration<T, E, F> {
    fn finish(&self, outcome: Result<(), ElementFault<E>>) {
        let done = self.done.lock().take();
        if let Some(done) = done {
            done(outcome);
        }
    }
}

impl<T, E, F> Resume for Iteration<T, E, F>
where
    T: Send + 'static,
    E: Send + 'static,
    F: Fn(T, usize, Next) -> Result<(), E> + Send + Sync + 'static,
{
    fn resume(self: Arc<Self>, index: usize) {
        if self.halted.load(Ordering::SeqCst) {
            return;
        }

        if index >= self.len {
            tracing::trace!("iteration complete");
            self.finish(Ok(()));
            return;
        }

        let item = self.items.lock().get_mut(index).and_then(Option::take);
        let Some(item) = item else {
            tracing::warn!(index, "element already consumed; ignoring continuation");
            return;
        };

        let next = Next {
            state: Arc::clone(&self) as Arc<dyn Resume>,
            index: index + 1,
        };

        if let Err(error) = (self.per_element)(item, index, next) {
            tracing::debug!(index, "element callback failed; halting iteration");
            self.halted.store(true, Ordering::SeqCst);
            self.finish(Err(ElementFault { index, error }));
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Run `per_element` over `sequence` one element at a time
///
/// `per_element(element, index, next)` must call [`Next::resume`] to move on.
/// After the last element resumes, `on_done(Ok(()))` is called. An empty
/// sequence calls `on_done(Ok(()))` immediately.
///
/// `sequence` is anything iterable, so `None` counts as empty while
/// `Some(items)` is a single element. For an optional collection pass
/// `items.into_iter().flatten()` instead.
///
/// If a callback returns `Err`, iteration halts: no later element runs and
/// `on_done` receives the error wrapped in an [`ElementFault`]. `on_done` is
/// called at most once.
pub fn iterate<I, T, E, D, F>(sequence: I, on_done: D, per_element: F)
where
    I: IntoIterator<Item = T>,
    T: Send + 'static,
    E: Send + 'static,
    D: FnOnce(Result<(), ElementFault<E>>) + Send + 'static,
    F: Fn(T, usize, Next) -> Result<(), E> + Send + Sync + 'static,
{
    let items: Vec<Option<T>> = sequence.into_iter().map(Some).collect();
    let len = items.len();
    let span = iteration_span(len);
    let _entered = span.enter();

    if len == 0 {
        on_done(Ok(()));
        return;
    }

    let state = Arc::new(Iteration {
        items: Mutex::new(items),
        len,
        per_element,
        done: Mutex::new(Some(Box::new(on_done) as DoneFn<E>)),
        halted: AtomicBool::new(false),
    });

    state.resume(0);
}

/// Awaitable form of [`iterate`]
///
/// Resolves once the last element resumes its continuation, or with the first
/// element fault. If every continuation is dropped without being resumed the
/// future resolves to [`IterateError::Abandoned`] instead of hanging.
pub fn iterate_async<I, T, E, F>(
    sequence: I,
    per_element: F,
) -> impl Future<Output = Result<(), IterateError<E>>>
where
    I: IntoIterator<Item = T>,
    T: Send + 'static,
    E: Send + 'static,
    F: Fn(T, usize, Next) -> Result<(), E> + Send + Sync + 'static,
{
    let (tx, rx) = oneshot::channel();

    iterate(
        sequence,
        move |outcome| {
            // The receiver may already be gone if the caller dropped the future.
            let _ = tx.send(outcome);
        },
        per_element,
    );

    async move {
        match rx.await {
            Ok(outcome) => outcome.map_err(IterateError::from),
            Err(oneshot::Canceled) => Err(IterateError::Abandoned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    type Log = Arc<StdMutex<Vec<String>>>;

    fn log() -> Log {
        Arc::new(StdMutex::new(Vec::new()))
    }

    #[test]
    fn test_continuations_can_be_resumed_later() {
        let visits = log();
        let done = log();
        let (v, d) = (Arc::clone(&visits), Arc::clone(&done));
        let stash: Arc<StdMutex<Vec<Next>>> = Arc::new(StdMutex::new(Vec::new()));
        let keep = Arc::clone(&stash);

        iterate(
            vec!["a", "b"],
            move |outcome: Result<(), ElementFault<()>>| {
                d.lock().unwrap().push(format!("{outcome:?}"));
            },
            move |el, i, next| {
                v.lock().unwrap().push(format!("{i}:{el}"));
                keep.lock().unwrap().push(next);
                Ok(())
            },
        );

        let first = stash.lock().unwrap().remove(0);
        assert_eq!(first.index(), 1);
        assert!(!first.is_done());
        first.resume();

        let last = stash.lock().unwrap().remove(0);
        assert!(last.is_done());
        last.resume();

        assert_eq!(*visits.lock().unwrap(), vec!["0:a", "1:b"]);
        assert_eq!(*done.lock().unwrap(), vec!["Ok(())"]);
    }

    #[test]
    fn test_fault_after_resume_reports_once() {
        let done = log();
        let d = Arc::clone(&done);

        iterate(
            vec![1, 2],
            move |outcome| d.lock().unwrap().push(format!("{outcome:?}")),
            |_, i, next| {
                next.resume();
                if i == 0 {
                    Err("late failure")
                } else {
                    Ok(())
                }
            },
        );

        // Element 1 finished the iteration before element 0 failed.
        assert_eq!(*done.lock().unwrap(), vec!["Ok(())"]);
    }

    #[test]
    fn test_optional_collection_is_one_element_unless_flattened() {
        let seen = log();
        let (whole, flat) = (Arc::clone(&seen), Arc::clone(&seen));

        iterate(
            Some(vec![1, 2, 3]),
            |_: Result<(), ElementFault<()>>| {},
            move |items: Vec<i32>, _, next| {
                whole.lock().unwrap().push(format!("whole:{}", items.len()));
                next.resume();
                Ok(())
            },
        );
        iterate(
            Some(vec![1, 2, 3]).into_iter().flatten(),
            |_: Result<(), ElementFault<()>>| {},
            move |item, _, next| {
                flat.lock().unwrap().push(format!("item:{item}"));
                next.resume();
                Ok(())
            },
        );

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["whole:3", "item:1", "item:2", "item:3"]
        );
    }

    #[test]
    fn test_next_debug() {
        let seen = log();
        let s = Arc::clone(&seen);

        iterate(
            vec![()],
            |_: Result<(), ElementFault<()>>| {},
            move |_, _, next| {
                s.lock().unwrap().push(format!("{next:?}"));
                next.resume();
                Ok(())
            },
        );

        assert_eq!(*seen.lock().unwrap(), vec!["Next { index: 1, len: 1 }"]);
    }
}
