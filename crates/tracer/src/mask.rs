//! The masking engine.
//!
//! Every public entry point is `#[track_caller]`, so the frame appended to
//! the stack is the line that called `mask`/`maskf`, not a line in here.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::error::Error;
use crate::error_ref::ErrorRef;
use crate::frame::Frame;

/// Wrap `err` in a new record and append the caller's location to its stack.
///
/// - A foreign error becomes the cause of a fresh record annotated with the
///   foreign error's message.
/// - A record is copied first. If it never wrapped anything it becomes its
///   own copy's cause; otherwise cause and type are carried over untouched.
///
/// ```
/// use std::sync::Arc;
/// use tracer::{cause, mask, ErrorRef};
///
/// let io = Arc::new(std::io::Error::other("connection refused"));
/// let masked = mask(mask(&io));
///
/// assert_eq!(masked.stack().len(), 2);
/// assert!(cause(Some(&masked.into())).unwrap().ptr_eq(&ErrorRef::from(&io)));
/// ```
#[track_caller]
pub fn mask<E: Into<ErrorRef>>(err: E) -> Arc<Error> {
    Arc::new(mask_at(err.into(), Location::caller()))
}

/// Nil-preserving variant of [`mask`]: `None` stays `None`.
#[track_caller]
pub fn mask_opt<E: Into<ErrorRef>>(err: Option<E>) -> Option<Arc<Error>> {
    match err {
        Some(err) => Some(Arc::new(mask_at(err.into(), Location::caller()))),
        None => None,
    }
}

/// Mask `rec`, then replace the new record's annotation with `args`.
///
/// The masking happens first so the tracked cause is the record as it was
/// before this call. Prefer the [`maskf!`](crate::maskf!) macro.
#[track_caller]
pub fn maskf(rec: &Arc<Error>, args: fmt::Arguments<'_>) -> Arc<Error> {
    let mut masked = mask_at(ErrorRef::from(rec), Location::caller());
    masked.anno = fmt::format(args);
    Arc::new(masked)
}

pub(crate) fn mask_at(err: ErrorRef, loc: &'static Location<'static>) -> Error {
    let mut rec = match err.as_record() {
        Some(rec) => Error::clone(rec),
        None => Error {
            anno: err.message(),
            ..Default::default()
        },
    };

    // A decoded record carries its origin type but no cause.
    if rec.wrapped.is_none() {
        if rec.type_name.is_empty() {
            rec.type_name = err.type_name().to_string();
        }
        rec.wrapped = Some(err);
    }

    let frame = Frame::from(loc);
    tracing::trace!(frame = %frame, depth = rec.stck.len() + 1, "masking error");
    rec.stck.push(frame);

    rec
}
