//! Pipeline configuration
//!
//! `PipelineConfig` is immutable after construction and cheap to clone, so a
//! single instance can be shared by every pipeline built from it.

use crate::constants::{FLOWCHAIN_PROBE_CATCH_VAR, FLOWCHAIN_TRACE_STEPS_VAR};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Settings that affect how a pipeline is invoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Label recorded on the invocation span
    pub name: Option<String>,

    /// Pre-invoke the catch handler with the starting value on every run
    pub probe_catch_handler: bool,

    /// Emit a span for every executed step
    pub trace_steps: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: None,
            probe_catch_handler: true,
            trace_steps: false,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the span label
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Enable or disable the catch handler probe
    #[must_use]
    pub fn with_probe_catch_handler(mut self, enabled: bool) -> Self {
        self.probe_catch_handler = enabled;
        self
    }

    /// Enable or disable per-step spans
    #[must_use]
    pub fn with_trace_steps(mut self, enabled: bool) -> Self {
        self.trace_steps = enabled;
        self
    }

    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(FLOWCHAIN_PROBE_CATCH_VAR) {
            config.probe_catch_handler = parse_flag(FLOWCHAIN_PROBE_CATCH_VAR, &raw)?;
        }
        if let Some(raw) = lookup(FLOWCHAIN_TRACE_STEPS_VAR) {
            config.trace_steps = parse_flag(FLOWCHAIN_TRACE_STEPS_VAR, &raw)?;
        }

        Ok(config)
    }

    /// Parse a configuration from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::from)
    }
}

fn parse_flag(variable: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::configuration(format!(
            "{variable} must be a boolean flag, got '{other}'"
        ))),
    }
}
