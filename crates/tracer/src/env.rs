//! Environment variable utilities
//!
//! Used by [`PanicConfig::from_env`](crate::PanicConfig::from_env). The core
//! masking and serialization functions never read the environment.
//!
//! # Usage
//!
//! ```ignore
//! let indent: usize = env_get("TRACER_PANIC_INDENT", 4);
//! let header: String = env_get_str("TRACER_PANIC_HEADER", "program panic");
//! ```

use std::str::FromStr;

/// Get environment variable parsed as type T, or return default.
///
/// Unset variables and values that fail to parse both yield `default`.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env_get_opt(key).unwrap_or(default)
}

/// Get environment variable as optional value.
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Get environment variable as string, or return default.
#[inline]
pub fn env_get_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

// ============================================================================
// Tests
// ============================================================================
