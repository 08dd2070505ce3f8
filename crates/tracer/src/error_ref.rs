use std::any::{type_name, Any};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::error::Error;

/// A shared reference to any error value.
///
/// Two representations, same external API:
///
/// - **Record**: one of our own [`Error`] records.
/// - **Foreign**: any other `std::error::Error`, together with the concrete
///   type name captured when it entered the system.
///
/// Cloning an `ErrorRef` never copies the error; it shares the allocation.
/// Equality is by identity of the allocation, resolved through
/// [`cause`](crate::cause): two errors compare equal only if they are, or
/// wrap, the very same value.
#[derive(Clone)]
pub struct ErrorRef {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Record(Arc<Error>),
    Foreign {
        err: Arc<dyn StdError + Send + Sync + 'static>,
        type_name: &'static str,
    },
}

// ── Constructors ──────────────────────────────────────────────────

impl ErrorRef {
    /// Move an error onto the heap and take a reference to it.
    ///
    /// Every call creates a new identity, except when `err` is itself a
    /// shared `Arc<Error>` or `Arc<dyn Error>`: those keep their allocation.
    /// To compare against an error later, keep it in an `Arc` and convert
    /// with `From<Arc<E>>`.
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from(Arc::new(err))
    }

    fn record(rec: Arc<Error>) -> Self {
        Self {
            repr: Repr::Record(rec),
        }
    }
}

impl<E> From<Arc<E>> for ErrorRef
where
    E: StdError + Send + Sync + 'static,
{
    fn from(err: Arc<E>) -> Self {
        if let Some(rec) = (&err as &dyn Any).downcast_ref::<Arc<Error>>() {
            return Self::record(Arc::clone(rec));
        }
        // `Arc<Error>` is itself an error, so `ErrorRef::new(arc)` lands here
        // with `E = Arc<Error>`.
        if let Some(rec) = (&*err as &dyn Any).downcast_ref::<Arc<Error>>() {
            return Self::record(Arc::clone(rec));
        }
        if let Some(inner) = (&*err as &dyn Any).downcast_ref::<ErrorRef>() {
            return inner.clone();
        }
        if let Some(dyn_err) = (&*err as &dyn Any).downcast_ref::<Arc<dyn StdError + Send + Sync>>() {
            return Self::from(Arc::clone(dyn_err));
        }

        Self {
            repr: Repr::Foreign {
                err,
                type_name: type_name::<E>(),
            },
        }
    }
}

impl<E> From<&Arc<E>> for ErrorRef
where
    E: StdError + Send + Sync + 'static,
{
    fn from(err: &Arc<E>) -> Self {
        Self::from(Arc::clone(err))
    }
}

/// Type name recorded for errors that enter as trait objects. The concrete
/// type is erased by then, so this is the best name available.
const DYN_TYPE_NAME: &str = "dyn core::error::Error + Send + Sync";

impl From<Arc<dyn StdError + Send + Sync>> for ErrorRef {
    /// Keeps the allocation, so identity survives the conversion. Records and
    /// references behind the trait object are recognised.
    fn from(err: Arc<dyn StdError + Send + Sync>) -> Self {
        if let Some(inner) = err.downcast_ref::<ErrorRef>() {
            return inner.clone();
        }
        if err.is::<Error>() {
            let raw = Arc::into_raw(err) as *const Error;
            // SAFETY: the pointee was just checked to be an `Error`, and the
            // pointer came from `Arc::into_raw` of the same allocation.
            return Self::record(unsafe { Arc::from_raw(raw) });
        }

        Self {
            repr: Repr::Foreign {
                err,
                type_name: DYN_TYPE_NAME,
            },
        }
    }
}

impl From<&Arc<dyn StdError + Send + Sync>> for ErrorRef {
    fn from(err: &Arc<dyn StdError + Send + Sync>) -> Self {
        Self::from(Arc::clone(err))
    }
}

impl From<Box<dyn StdError + Send + Sync>> for ErrorRef {
    /// Moves the boxed error into a new shared allocation.
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        match err.downcast::<Error>() {
            Ok(rec) => Self::record(Arc::from(rec)),
            Err(err) => Self::from(Arc::<dyn StdError + Send + Sync>::from(err)),
        }
    }
}

impl From<Error> for ErrorRef {
    fn from(rec: Error) -> Self {
        Self::record(Arc::new(rec))
    }
}

impl From<&ErrorRef> for ErrorRef {
    fn from(err: &ErrorRef) -> Self {
        err.clone()
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl ErrorRef {
    /// The record, if this refers to one of our own errors.
    #[inline]
    pub fn as_record(&self) -> Option<&Arc<Error>> {
        match &self.repr {
            Repr::Record(rec) => Some(rec),
            Repr::Foreign { .. } => None,
        }
    }

    /// Returns `true` if this refers to an [`Error`] record.
    #[inline]
    pub fn is_record(&self) -> bool {
        matches!(self.repr, Repr::Record(_))
    }

    /// Concrete runtime type name of the referenced error.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match &self.repr {
            Repr::Record(_) => type_name::<Error>(),
            Repr::Foreign { type_name, .. } => type_name,
        }
    }

    /// The error's message, as produced by its `Display` impl.
    pub fn message(&self) -> String {
        match &self.repr {
            Repr::Record(rec) => rec.message(),
            Repr::Foreign { err, .. } => err.to_string(),
        }
    }

    /// The referenced error as a plain `std::error::Error`.
    pub fn as_std_error(&self) -> &(dyn StdError + 'static) {
        match &self.repr {
            Repr::Record(rec) => rec.as_ref(),
            Repr::Foreign { err, .. } => err.as_ref(),
        }
    }

    /// Downcast a foreign error to its concrete type.
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.as_std_error().downcast_ref::<T>()
    }

    /// Address of the referenced allocation. Identity key for equality.
    #[inline]
    fn addr(&self) -> *const () {
        match &self.repr {
            Repr::Record(rec) => Arc::as_ptr(rec) as *const (),
            Repr::Foreign { err, .. } => Arc::as_ptr(err) as *const (),
        }
    }

    /// True if both refer to the same allocation. Does not resolve causes.
    #[inline]
    pub fn ptr_eq(&self, other: &ErrorRef) -> bool {
        self.addr() == other.addr()
    }

    /// The terminal cause, see [`cause`](crate::cause).
    pub fn cause(&self) -> ErrorRef {
        match self.as_record().and_then(|rec| rec.wrapped()) {
            Some(wrapped) => wrapped.clone(),
            None => self.clone(),
        }
    }

    /// Identity equality of causes, see [`is`](crate::is).
    pub fn is(&self, other: &ErrorRef) -> bool {
        self.cause().ptr_eq(&other.cause())
    }
}

impl PartialEq for ErrorRef {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for ErrorRef {}

// ── Display / Debug / std::error::Error ───────────────────────────

impl fmt::Display for ErrorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_std_error(), f)
    }
}

impl fmt::Debug for ErrorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Record(rec) => fmt::Debug::fmt(rec.as_ref(), f),
            Repr::Foreign { err, type_name } => f
                .debug_struct("ErrorRef::Foreign")
                .field("type", type_name)
                .field("message", &err.to_string())
                .finish(),
        }
    }
}

impl StdError for ErrorRef {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.as_std_error().source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn foreign_captures_type_name() {
        let e = ErrorRef::new(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(!e.is_record());
        assert_eq!(e.type_name(), type_name::<io::Error>());
        assert_eq!(e.message(), "boom");
        assert!(e.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn arc_of_record_is_record() {
        let rec = Arc::new(Error::new().with_kind("testErrorTwo"));
        let e = ErrorRef::from(&rec);
        assert!(e.is_record());
        assert!(Arc::ptr_eq(e.as_record().unwrap(), &rec));
        assert_eq!(e.type_name(), type_name::<Error>());
    }

    #[test]
    fn new_routes_records() {
        let e = ErrorRef::new(Error::new().with_kind("k"));
        assert!(e.is_record());
    }

    #[test]
    fn new_of_shared_record_keeps_identity() {
        let rec = Arc::new(Error::new().with_kind("notFound"));
        let e = ErrorRef::new(Arc::clone(&rec));

        assert!(e.is_record());
        assert!(Arc::ptr_eq(e.as_record().unwrap(), &rec));
        assert_eq!(e.type_name(), type_name::<Error>());

        let masked = crate::mask(e);
        assert_eq!(masked.kind(), "notFound");
        assert_eq!(masked.type_name(), type_name::<Error>());
        assert!(ErrorRef::from(masked).is(&ErrorRef::from(&rec)));
    }

    #[test]
    fn dyn_arc_keeps_identity() {
        let err: Arc<dyn StdError + Send + Sync> = Arc::new(io::Error::other("refused"));
        let a = ErrorRef::from(&err);
        let b = ErrorRef::from(Arc::clone(&err));
        let c = ErrorRef::new(Arc::clone(&err));
        assert!(a.ptr_eq(&c));

        assert!(!a.is_record());
        assert!(a.ptr_eq(&b));
        assert_eq!(a.message(), "refused");
        assert_eq!(a.type_name(), DYN_TYPE_NAME);
        assert!(a.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn dyn_arc_of_record_is_record() {
        let rec = Arc::new(Error::new().with_kind("k"));
        let err: Arc<dyn StdError + Send + Sync> = rec.clone();
        let e = ErrorRef::from(err);

        assert!(e.is_record());
        assert!(Arc::ptr_eq(e.as_record().unwrap(), &rec));
    }

    #[test]
    fn boxed_errors_enter() {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(io::Error::other("boom"));
        let e = ErrorRef::from(boxed);
        assert_eq!(e.message(), "boom");
        assert_eq!(e.type_name(), DYN_TYPE_NAME);

        let masked = crate::mask(e.clone());
        assert_eq!(masked.annotation(), "boom");
        assert!(ErrorRef::from(masked).is(&e));

        let boxed: Box<dyn StdError + Send + Sync> = Box::new(Error::new().with_kind("k"));
        assert!(ErrorRef::from(boxed).is_record());
    }

    #[test]
    fn boxed_error_through_question_mark() {
        fn parse() -> Result<u16, Box<dyn StdError + Send + Sync>> {
            Ok("nope".parse::<u16>()?)
        }
        fn load() -> crate::Result<u16> {
            use crate::ResultExt;
            parse().mask()
        }

        let err = load().unwrap_err();
        assert_eq!(err.as_record().unwrap().stack().len(), 1);
        assert!(err.cause().downcast_ref::<std::num::ParseIntError>().is_some());
    }

    #[test]
    fn nested_ref_is_flattened() {
        let a = ErrorRef::new(io::Error::new(io::ErrorKind::Other, "boom"));
        let b = ErrorRef::new(a.clone());
        assert!(a.ptr_eq(&b));
        assert_eq!(b.type_name(), type_name::<io::Error>());
    }

    #[test]
    fn clones_share_identity() {
        let a = ErrorRef::new(io::Error::new(io::ErrorKind::Other, "boom"));
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn same_message_different_identity() {
        let a = ErrorRef::new(io::Error::new(io::ErrorKind::Other, "boom"));
        let b = ErrorRef::new(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(!a.ptr_eq(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn display_delegates() {
        let rec = ErrorRef::from(Error::new().with_kind("testErrorTwo"));
        assert_eq!(rec.to_string(), "test error two");

        let foreign = ErrorRef::new(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(foreign.to_string(), "boom");
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ErrorRef>();
    }
}
