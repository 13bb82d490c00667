use flowchain_core::{DEFAULT_LOG_FILTER, FLOWCHAIN_LOG_VAR};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};

/// Initialize the tracing system
///
/// Reads the filter from `FLOWCHAIN_LOG`, falling back to `info` when the
/// variable is unset or does not parse. Output goes to stderr in the compact
/// format so it never mixes with values a caller prints to stdout.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_env(FLOWCHAIN_LOG_VAR)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span for a single pipeline invocation
pub fn pipeline_span(name: Option<&str>, steps: usize) -> Span {
    span!(Level::DEBUG, "pipeline", name = name.unwrap_or(""), steps = %steps)
}

/// Create a span for one step of an invocation
pub fn step_span(index: usize, kind: &str) -> Span {
    span!(Level::TRACE, "step", index = %index, kind = %kind)
}

/// Create a span for a sequential iteration
pub fn iteration_span(len: usize) -> Span {
    span!(Level::DEBUG, "iterate", len = %len)
}
