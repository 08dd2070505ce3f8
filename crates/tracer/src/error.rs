use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::error_ref::ErrorRef;
use crate::frame::Frame;
use crate::kind::{KindRenderer, SpacedLowercase};

/// Error record — the structured error value passed between layers.
///
/// A record carries a human-facing annotation, optional description and docs,
/// an opaque kind label, the stack of frames accumulated by masking, the type
/// name of the first error it wrapped and a reference to that error.
///
/// Records are published behind an `Arc` and never modified afterwards.
/// Masking always produces a new record, so a caller holding an older one
/// observes no change.
///
/// ```
/// use std::sync::Arc;
/// use tracer::{mask, Error, ErrorRef};
///
/// let not_found = Arc::new(Error::new().with_kind("notFound"));
///
/// let masked = mask(&not_found);
/// assert_eq!(masked.message(), "not found");
/// assert!(ErrorRef::from(masked).is(&ErrorRef::from(&not_found)));
/// ```
#[derive(Clone, Default)]
pub struct Error {
    pub(crate) anno: String,
    pub(crate) desc: String,
    pub(crate) docs: String,
    pub(crate) kind: String,
    pub(crate) stck: Vec<Frame>,
    pub(crate) type_name: String,
    pub(crate) wrapped: Option<ErrorRef>,
}

// ── Constructors ──────────────────────────────────────────────────

impl Error {
    /// An empty record. Use the builder methods to fill it in.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_annotation(mut self, anno: impl Into<String>) -> Self {
        self.anno = anno.into();
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = docs.into();
        self
    }

    /// A new, independent record with the same field values.
    ///
    /// The wrapped cause is shared with `self`, everything else is owned by
    /// the copy. The copy is a distinct identity: it is not [`is`](crate::is)
    /// equal to `self` unless both resolve to the same wrapped cause.
    pub fn copy(&self) -> Arc<Error> {
        Arc::new(self.clone())
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl Error {
    /// The annotation, empty if none was set.
    #[inline]
    pub fn annotation(&self) -> &str {
        &self.anno
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.desc
    }

    #[inline]
    pub fn docs(&self) -> &str {
        &self.docs
    }

    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Frames in the order they were recorded.
    #[inline]
    pub fn stack(&self) -> &[Frame] {
        &self.stck
    }

    /// Concrete type name of the first error this lineage wrapped.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The original cause, if this record was ever masked.
    #[inline]
    pub fn wrapped(&self) -> Option<&ErrorRef> {
        self.wrapped.as_ref()
    }

    /// Human-readable message: the annotation, or the rendered kind.
    pub fn message(&self) -> String {
        self.message_with(&SpacedLowercase)
    }

    /// Like [`message`](Self::message) with a caller-supplied kind renderer.
    pub fn message_with<R: KindRenderer + ?Sized>(&self, renderer: &R) -> String {
        if self.anno.is_empty() {
            renderer.render(&self.kind)
        } else {
            self.anno.clone()
        }
    }

    /// Identity equality, see [`is`](crate::is).
    pub fn equals(self: &Arc<Self>, other: &ErrorRef) -> bool {
        ErrorRef::from(self).is(other)
    }

    /// True if no field carries data. Such a record serializes to `{}`.
    pub fn is_empty(&self) -> bool {
        self.anno.is_empty()
            && self.desc.is_empty()
            && self.docs.is_empty()
            && self.kind.is_empty()
            && self.stck.is_empty()
            && self.type_name.is_empty()
    }
}

// ── std::error::Error ─────────────────────────────────────────────

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.wrapped.as_ref().map(|w| w.as_std_error())
    }
}

// ── Display / Debug ───────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Debug output is the compact JSON form.
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::json::encode(self))
    }
}
