/// Mask a record and annotate the result with a formatted message.
///
/// # Forms
///
/// ```ignore
/// // Literal annotation:
/// maskf!(&ERR_NOT_FOUND, "config file missing")
///
/// // Formatted annotation:
/// maskf!(&ERR_NOT_FOUND, "config file {} missing", path.display())
/// ```
///
/// The recorded frame is the line of the macro invocation.
#[macro_export]
macro_rules! maskf {
    ($rec:expr, $($arg:tt)+) => {
        $crate::maskf($rec, ::std::format_args!($($arg)+))
    };
}

/// Early-return a masked, annotated record if a condition is false.
///
/// ```ignore
/// ensure!(port != 0, &ERR_INVALID_CONFIG, "port must not be {}", port);
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $rec:expr, $($arg:tt)+) => {
        if !$cond {
            return ::std::result::Result::Err(
                ::std::convert::From::from($crate::maskf!($rec, $($arg)+)),
            );
        }
    };
}
