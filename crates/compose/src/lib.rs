//! Pipeline composition for flowchain
//!
//! This crate chains synchronous transforms, async transforms and
//! already-pending computations into one re-invocable [`Pipeline`].
//!
//! ## Key Components
//!
//! - **[`Step`]**: one unit of work; plain, async, pending, guarded or forked.
//! - **[`Pipeline`]**: the builder. `then` appends, `when` guards, `fork`
//!   branches for side effects, `catch` installs the single error handler.
//! - **[`Resolver`]**: seeds each invocation; injectable for hosts and tests.
//!
//! ## Example
//!
//! ```
//! use flowchain_compose::{compose, Step};
//! use flowchain_core::Error;
//!
//! # async fn example() -> Result<(), Error> {
//! let pipeline = compose(vec![Step::<i32, Error>::map(|v| v + 1)])
//!     .then(Step::map(|v| v * 2))
//!     .when(|v| *v > 2)
//!     .then(Step::future(|v| async move { Ok(v - 1) }));
//!
//! assert_eq!(pipeline.run(2).await?, 5);
//! assert_eq!(pipeline.run(0).await?, 0);
//! # Ok(())
//! # }
//! ```

pub mod catch;
pub mod pipeline;
pub mod resolver;
pub mod step;

pub use catch::Caught;
pub use pipeline::{compose, Pipeline, StepHandle};
pub use resolver::{Immediate, Resolver};
pub use step::{Step, StepFuture, StepKind};

/// Alias of [`compose`]
pub use pipeline::compose as flow;
