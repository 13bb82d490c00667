/// Constants used throughout the flowchain codebase
// Environment variable names
pub const FLOWCHAIN_LOG_VAR: &str = "FLOWCHAIN_LOG";
pub const FLOWCHAIN_PROBE_CATCH_VAR: &str = "FLOWCHAIN_PROBE_CATCH";
pub const FLOWCHAIN_TRACE_STEPS_VAR: &str = "FLOWCHAIN_TRACE_STEPS";

// Log filter used when FLOWCHAIN_LOG is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "info";

// Separator for nested property paths ("user.address.city")
pub const PATH_SEPARATOR: char = '.';
