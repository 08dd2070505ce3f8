use std::panic::Location;
use std::sync::Arc;

use crate::error::Error;
use crate::error_ref::ErrorRef;
use crate::mask::mask_at;

// ── ResultExt — masking during propagation ────────────────────────

/// Extension trait for masking the error of a `Result` on its way up.
///
/// `Ok` values pass through untouched, mirroring "masking nothing yields
/// nothing". The recorded frame is the line calling the method.
///
/// ```ignore
/// use tracer::ResultExt;
///
/// let cfg = std::fs::read_to_string(path).map_err(Arc::new).mask()?;
/// let port = parse_port(&cfg).mask_as(&ERR_INVALID_CONFIG, "bad port")?;
/// ```
pub trait ResultExt<T> {
    /// Mask the error, converting it into an [`ErrorRef`].
    fn mask(self) -> Result<T, ErrorRef>;

    /// Replace the error with `rec`, masked and annotated with
    /// `"{msg}: {original message}"`.
    ///
    /// `rec` becomes the cause; the original error survives only in the
    /// annotation. Use it to translate a foreign failure into one of your
    /// own sentinels.
    fn mask_as(self, rec: &Arc<Error>, msg: &str) -> Result<T, ErrorRef>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ErrorRef>,
{
    #[track_caller]
    fn mask(self) -> Result<T, ErrorRef> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Arc::new(mask_at(e.into(), Location::caller())).into()),
        }
    }

    #[track_caller]
    fn mask_as(self, rec: &Arc<Error>, msg: &str) -> Result<T, ErrorRef> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => {
                let orig: ErrorRef = e.into();
                tracing::debug!(
                    error = %orig,
                    type_name = orig.type_name(),
                    sentinel = %rec,
                    "translating error"
                );

                let mut masked = mask_at(ErrorRef::from(rec), Location::caller());
                masked.anno = format!("{msg}: {}", orig.message());
                Err(Arc::new(masked).into())
            }
        }
    }
}

/// Extension trait giving `Option<E>` the nil-preserving masking of
/// [`mask_opt`](crate::mask_opt).
pub trait OptionExt {
    fn mask(self) -> Option<Arc<Error>>;
}

impl<E> OptionExt for Option<E>
where
    E: Into<ErrorRef>,
{
    #[track_caller]
    fn mask(self) -> Option<Arc<Error>> {
        match self {
            Some(e) => Some(Arc::new(mask_at(e.into(), Location::caller()))),
            None => None,
        }
    }
}
