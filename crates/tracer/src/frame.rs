//! Stack frames recorded by the masking engine.
//!
//! A `Frame` is one source location, rendered as:
//!
//! ```text
//! ┌──────────────────────────────┬───┬──────────┐
//! │  file (as reported by rustc) │ : │   line   │
//! └──────────────────────────────┴───┴──────────┘
//! ```
//!
//! The file part may itself contain `:` (Windows drive letters), so parsing
//! splits at the *last* colon.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use serde::ser::{Serialize, Serializer};
use thiserror::Error;

/// One recorded call site.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    file: Cow<'static, str>,
    line: u32,
}

impl Frame {
    /// Create a frame from a file path and line number.
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The frame of the function calling this one.
    ///
    /// Must be called from a `#[track_caller]` chain to be meaningful.
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    #[inline]
    pub fn file(&self) -> &str {
        &self.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&'static Location<'static>> for Frame {
    fn from(loc: &'static Location<'static>) -> Self {
        Self {
            file: Cow::Borrowed(loc.file()),
            line: loc.line(),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({}:{})", self.file, self.line)
    }
}

// ── Parsing ───────────────────────────────────────────────────────

/// Failure to parse a `"file:line"` frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFrameError {
    #[error("frame {0:?} has no line separator")]
    MissingSeparator(String),

    #[error("frame {0:?} has an empty file")]
    EmptyFile(String),

    #[error("frame {0:?} has an invalid line number")]
    InvalidLine(String),
}

impl FromStr for Frame {
    type Err = ParseFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (file, line) = s
            .rsplit_once(':')
            .ok_or_else(|| ParseFrameError::MissingSeparator(s.to_string()))?;

        if file.is_empty() {
            return Err(ParseFrameError::EmptyFile(s.to_string()));
        }

        let line = line
            .parse::<u32>()
            .map_err(|_| ParseFrameError::InvalidLine(s.to_string()))?;

        Ok(Self::new(file.to_string(), line))
    }
}

// ── serde ─────────────────────────────────────────────────────────

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let frame = Frame::new("src/main.rs", 42);
        assert_eq!(frame.to_string(), "src/main.rs:42");
    }

    #[test]
    fn caller_points_here() {
        let line = line!() + 1;
        let frame = Frame::caller();
        assert_eq!(frame.file(), file!());
        assert_eq!(frame.line(), line);
    }

    #[test]
    fn parse_roundtrip() {
        let frame: Frame = "crates/tracer/src/mask.rs:17".parse().unwrap();
        assert_eq!(frame.file(), "crates/tracer/src/mask.rs");
        assert_eq!(frame.line(), 17);
    }

    #[test]
    fn parse_splits_at_last_colon() {
        let frame: Frame = r"C:\work\src\lib.rs:9".parse().unwrap();
        assert_eq!(frame.file(), r"C:\work\src\lib.rs");
        assert_eq!(frame.line(), 9);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "main.rs".parse::<Frame>(),
            Err(ParseFrameError::MissingSeparator("main.rs".into()))
        );
        assert_eq!(
            ":3".parse::<Frame>(),
            Err(ParseFrameError::EmptyFile(":3".into()))
        );
        assert_eq!(
            "main.rs:x".parse::<Frame>(),
            Err(ParseFrameError::InvalidLine("main.rs:x".into()))
        );
    }

    #[test]
    fn serializes_as_string() {
        let frame = Frame::new("a.rs", 1);
        assert_eq!(serde_json::to_string(&frame).unwrap(), "\"a.rs:1\"");
    }
}
