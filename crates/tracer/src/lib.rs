//! # tracer — masked errors with a preserved cause
//!
//! A structured error record that independent layers of a program can
//! annotate on the way up, without losing the original cause or its concrete
//! type, and that serializes to a stable JSON form.
//!
//! ## Design
//!
//! - [`Error`] is the record: annotation, description, docs, kind, the stack
//!   of frames collected while masking, the origin type name and the wrapped
//!   cause. Records are shared behind `Arc` and never mutated once published.
//!
//! - [`ErrorRef`] is a shared reference to *any* error, record or foreign.
//!   Equality is identity: two errors are equal only if they resolve to the
//!   same allocation.
//!
//! - [`mask`] / [`maskf!`] copy the incoming record (or build one around a
//!   foreign error), remember the first cause exactly once and append the
//!   caller's location to the stack.
//!
//! - [`cause`] / [`is`] resolve and compare terminal causes.
//!
//! - [`json`] renders the record with a fixed key order.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tracer::{cause, is, json, mask, maskf, Error, ErrorRef};
//!
//! // Sentinels are shared instances; compare against them with `is`.
//! let not_found = Arc::new(Error::new().with_kind("configNotFound"));
//!
//! fn load(sentinel: &Arc<Error>) -> Result<(), ErrorRef> {
//!     Err(maskf!(sentinel, "no config at {}", "/etc/app.toml").into())
//! }
//!
//! let err = load(&not_found).unwrap_err();
//! let err = ErrorRef::from(mask(err));
//!
//! assert!(is(Some(&err), Some(&ErrorRef::from(&not_found))));
//! assert_eq!(err.to_string(), "no config at /etc/app.toml");
//! assert!(cause(Some(&err)).unwrap().is_record());
//! assert!(json(Some(&err)).starts_with(r#"{"anno":"no config at /etc/app.toml","kind":"configNotFound","stck":["#));
//! ```

mod cause;
mod convert;
mod env;
mod error;
mod error_ref;
mod frame;
mod json;
mod kind;
#[macro_use]
mod macros;
mod mask;
mod panic;

// ── Public API ────────────────────────────────────────────────────

pub use cause::{cause, is};
pub use convert::{OptionExt, ResultExt};
pub use error::Error;
pub use error_ref::ErrorRef;
pub use frame::{Frame, ParseFrameError};
pub use json::{json, json_pretty, DecodeError, FIELDS};
pub use kind::{KindRenderer, SpacedLowercase};
pub use mask::{mask, mask_opt, maskf};
pub use panic::{panic, panic_with, render_panic, PanicConfig};

/// Convenience Result alias.
pub type Result<T, E = ErrorRef> = std::result::Result<T, E>;
