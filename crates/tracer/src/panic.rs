//! Terminal error reporting for command line programs.
//!
//! Such programs usually propagate runtime errors back to `main`. [`panic`]
//! turns the final error into a readable report and exits:
//!
//! ```ignore
//! fn main() {
//!     if let Err(err) = main_e() {
//!         tracer::panic(&err);
//!     }
//! }
//! ```
//!
//! which prints something like
//!
//! ```text
//! program panic
//!
//!     {
//!         "anno": "connection refused",
//!         "stck": [
//!             "cmd/panic/src/main.rs:41",
//!             "cmd/panic/src/main.rs:23"
//!         ],
//!         "type": "std::io::error::Error"
//!     }
//!
//! ```
//!
//! and exits with status 1.
//!
//! # Environment Variables
//!
//! Read by [`PanicConfig::from_env`]:
//!
//! - `TRACER_PANIC_HEADER` - first line of the report (default `program panic`)
//! - `TRACER_PANIC_INDENT` - spaces per indentation level (default 4)
//! - `TRACER_PANIC_EXIT_CODE` - process exit status (default 1)

use std::io::Write;

use crate::env::{env_get, env_get_str};
use crate::error_ref::ErrorRef;
use crate::json::json_pretty;

/// Report layout and exit behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicConfig {
    /// First line of the report.
    pub header: String,
    /// Spaces per indentation level, also used as the left margin.
    pub indent: usize,
    /// Status passed to `std::process::exit`.
    pub exit_code: i32,
}

impl Default for PanicConfig {
    fn default() -> Self {
        Self {
            header: "program panic".to_string(),
            indent: 4,
            exit_code: 1,
        }
    }
}

impl PanicConfig {
    /// Defaults overridden by the `TRACER_PANIC_*` environment variables.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            header: env_get_str("TRACER_PANIC_HEADER", &d.header),
            indent: env_get("TRACER_PANIC_INDENT", d.indent),
            exit_code: env_get("TRACER_PANIC_EXIT_CODE", d.exit_code),
        }
    }

    /// Builder-style setter for the header line.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Builder-style setter for the indentation width.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Builder-style setter for the exit status.
    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }
}

/// The full report text: header, blank line, indented JSON, blank line.
pub fn render_panic(err: Option<&ErrorRef>, config: &PanicConfig) -> String {
    let pad = " ".repeat(config.indent);
    let body = json_pretty(err, &pad);

    let mut out = String::with_capacity(config.header.len() + body.len() + 16);
    out.push_str(&config.header);
    out.push_str("\n\n");
    for line in body.lines() {
        out.push_str(&pad);
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Print the report for `err` to stdout and exit with status 1.
///
/// Configuration comes from [`PanicConfig::from_env`].
pub fn panic(err: impl Into<ErrorRef>) -> ! {
    panic_with(err, &PanicConfig::from_env())
}

/// Print the report for `err` to stdout and exit with `config.exit_code`.
pub fn panic_with(err: impl Into<ErrorRef>, config: &PanicConfig) -> ! {
    let err = err.into();
    tracing::error!(error = %err, exit_code = config.exit_code, "program panic");

    let report = render_panic(Some(&err), config);
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let _ = handle.write_all(report.as_bytes());
    let _ = handle.flush();

    std::process::exit(config.exit_code)
}
