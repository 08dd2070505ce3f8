//! Cause resolution and identity equality.
//!
//! A masked record remembers the first error it was built from. Because the
//! masking engine sets that reference exactly once per lineage, the stored
//! value already is the terminal cause and no recursion is needed.

use crate::error_ref::ErrorRef;

/// The terminal cause of `err`.
///
/// - `None` → `None`
/// - a record that wraps a cause → that cause, as stored
/// - anything else → `err` itself
pub fn cause(err: Option<&ErrorRef>) -> Option<ErrorRef> {
    err.map(ErrorRef::cause)
}

/// Identity equality: `a` and `b` resolve to the very same cause.
///
/// Two records with the same kind built separately are *not* equal. Expose
/// a shared instance as a sentinel when callers need to compare against it.
pub fn is(a: Option<&ErrorRef>, b: Option<&ErrorRef>) -> bool {
    match (cause(a), cause(b)) {
        (None, None) => true,
        (Some(a), Some(b)) => a.ptr_eq(&b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use super::*;
    use crate::{mask, maskf, Error};

    fn foreign(msg: &str) -> Arc<io::Error> {
        Arc::new(io::Error::new(io::ErrorKind::Other, msg.to_string()))
    }

    fn resolves_to(err: impl Into<ErrorRef>, expected: &ErrorRef) {
        let got = cause(Some(&err.into())).unwrap();
        assert!(got.ptr_eq(expected), "expected {:?} got {:?}", expected, got);
    }

    #[test]
    fn no_error_no_cause() {
        assert!(cause(None).is_none());
        assert!(is(None, None));
    }

    #[test]
    fn unwrapped_errors_are_their_own_cause() {
        let one = foreign("testErrorOne");
        let two = Arc::new(Error::new().with_kind("testErrorTwo"));

        resolves_to(&one, &ErrorRef::from(&one));
        resolves_to(&two, &ErrorRef::from(&two));
    }

    #[test]
    fn mask_once() {
        let one = foreign("testErrorOne");
        let two = Arc::new(Error::new().with_kind("testErrorTwo"));

        resolves_to(mask(&one), &ErrorRef::from(&one));
        resolves_to(mask(&two), &ErrorRef::from(&two));
    }

    #[test]
    fn mask_twice() {
        let one = foreign("testErrorOne");
        let two = Arc::new(Error::new().with_kind("testErrorTwo"));

        resolves_to(mask(mask(&one)), &ErrorRef::from(&one));
        resolves_to(mask(mask(&two)), &ErrorRef::from(&two));
    }

    #[test]
    fn annotated_mask() {
        let two = Arc::new(Error::new().with_kind("testErrorTwo"));

        resolves_to(maskf!(&two, "annotation"), &ErrorRef::from(&two));
        resolves_to(mask(maskf!(&two, "annotation")), &ErrorRef::from(&two));
    }

    #[test]
    fn equality_cases() {
        let one = ErrorRef::from(foreign("testErrorOne"));
        let one_same_msg = ErrorRef::from(foreign("testErrorOne"));
        let two = ErrorRef::from(Error::new().with_kind("testErrorTwo"));
        let two_same_kind = ErrorRef::from(Error::new().with_kind("testErrorTwo"));
        let three = ErrorRef::from(Error::new().with_kind("testErrorThree"));

        let cases = [
            (&one, &one, true),
            (&two, &two, true),
            (&two, &one, false),
            (&two, &three, false),
            (&two, &two_same_kind, false),
            (&one, &one_same_msg, false),
        ];

        for (i, (a, b, equal)) in cases.into_iter().enumerate() {
            assert_eq!(is(Some(a), Some(b)), equal, "case {}", i);
        }
    }

    #[test]
    fn none_is_not_some() {
        let one = ErrorRef::from(foreign("x"));
        assert!(!is(Some(&one), None));
        assert!(!is(None, Some(&one)));
    }

    #[test]
    fn masked_equals_original() {
        let one = foreign("x");
        let masked = ErrorRef::from(mask(mask(&one)));
        assert!(is(Some(&masked), Some(&ErrorRef::from(&one))));
    }

    #[test]
    fn masked_unannotated_record_stays_equal_to_its_copy() {
        let two = Arc::new(Error::new().with_kind("testErrorTwo"));
        let a = ErrorRef::from(mask(&two));
        let b = ErrorRef::from(maskf!(&two, "other context {}", 7));
        assert!(is(Some(&a), Some(&b)));
    }

    #[test]
    fn original_record_is_untouched() {
        let two = Arc::new(Error::new().with_kind("testErrorTwo"));
        let _ = maskf(&two, format_args!("annotation"));
        assert!(two.annotation().is_empty());
        assert!(two.stack().is_empty());
        assert!(two.wrapped().is_none());
    }
}
