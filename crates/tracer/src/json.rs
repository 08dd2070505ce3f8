//! Deterministic JSON form of error records.
//!
//! ```text
//! {"anno":"…","desc":"…","docs":"…","kind":"…","stck":["file:line",…],"type":"…"}
//! ```
//!
//! Keys always appear in the order above and only when their field is
//! non-empty. The order is fixed by [`FIELDS`], not by struct layout or map
//! iteration order.

use std::borrow::Cow;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error as ThisError;

use crate::error::Error;
use crate::error_ref::ErrorRef;
use crate::frame::{Frame, ParseFrameError};

/// Serialized keys, in emission order.
pub const FIELDS: [&str; 6] = ["anno", "desc", "docs", "kind", "stck", "type"];

enum Field<'a> {
    Str(&'a str),
    Stack(&'a [Frame]),
}

impl Field<'_> {
    fn is_empty(&self) -> bool {
        match self {
            Field::Str(s) => s.is_empty(),
            Field::Stack(s) => s.is_empty(),
        }
    }
}

impl Serialize for Field<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Str(s) => serializer.serialize_str(s),
            Field::Stack(s) => s.serialize(serializer),
        }
    }
}

impl Error {
    fn fields(&self) -> [Field<'_>; 6] {
        [
            Field::Str(&self.anno),
            Field::Str(&self.desc),
            Field::Str(&self.docs),
            Field::Str(&self.kind),
            Field::Stack(&self.stck),
            Field::Str(&self.type_name),
        ]
    }
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let present = fields.iter().filter(|f| !f.is_empty()).count();

        let mut map = serializer.serialize_map(Some(present))?;
        for (key, value) in FIELDS.iter().zip(fields.iter()) {
            if !value.is_empty() {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

// ── Encoding ──────────────────────────────────────────────────────

/// Compact JSON of a record.
///
/// # Panics
///
/// If `serde_json` fails to encode the record. The record only holds strings,
/// so this is an internal fault rather than an input error.
pub(crate) fn encode(rec: &Error) -> String {
    match serde_json::to_string(rec) {
        Ok(s) => s,
        Err(e) => panic!("tracer: failed to serialize error record: {e}"),
    }
}

/// A record view of any error: records as-is, foreign errors as a record
/// holding their message and type name.
fn as_record(err: &ErrorRef) -> Cow<'_, Error> {
    match err.as_record() {
        Some(rec) => Cow::Borrowed(rec.as_ref()),
        None => Cow::Owned(Error {
            anno: err.message(),
            type_name: err.type_name().to_string(),
            ..Default::default()
        }),
    }
}

/// Compact JSON of any error. `None` serializes to `{}`.
///
/// ```
/// use tracer::{json, Error, ErrorRef};
///
/// assert_eq!(json(None), "{}");
///
/// let e = ErrorRef::from(Error::new().with_kind("notFound"));
/// assert_eq!(json(Some(&e)), r#"{"kind":"notFound"}"#);
/// ```
pub fn json(err: Option<&ErrorRef>) -> String {
    match err {
        None => "{}".to_string(),
        Some(err) => encode(&as_record(err)),
    }
}

/// Indented JSON of any error, every nesting level indented by `indent`.
///
/// # Panics
///
/// Same as [`json`]: only on an internal encoding fault.
pub fn json_pretty(err: Option<&ErrorRef>, indent: &str) -> String {
    let rec = match err {
        None => Cow::Owned(Error::default()),
        Some(err) => as_record(err),
    };

    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    if let Err(e) = rec.serialize(&mut ser) {
        panic!("tracer: failed to serialize error record: {e}");
    }

    // serde_json only ever writes valid UTF-8.
    String::from_utf8_lossy(&buf).into_owned()
}

impl Error {
    /// Compact JSON of this record.
    pub fn to_json(&self) -> String {
        encode(self)
    }
}

// ── Decoding ──────────────────────────────────────────────────────

/// Failure to decode a serialized record.
#[derive(Debug, ThisError)]
pub enum DecodeError {
    #[error("malformed error record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stack frame {index}: {source}")]
    Frame {
        index: usize,
        #[source]
        source: ParseFrameError,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Wire {
    #[serde(default)]
    anno: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    docs: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    stck: Vec<String>,
    #[serde(default, rename = "type")]
    type_name: String,
}

impl Error {
    /// Decode a record from its JSON form.
    ///
    /// The wrapped cause is not part of the JSON form, so a decoded record
    /// never wraps anything and is its own cause.
    pub fn from_json(s: &str) -> Result<Error, DecodeError> {
        let wire: Wire = serde_json::from_str(s)?;

        let stck = wire
            .stck
            .iter()
            .enumerate()
            .map(|(index, f)| f.parse::<Frame>().map_err(|source| DecodeError::Frame { index, source }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Error {
            anno: wire.anno,
            desc: wire.desc,
            docs: wire.docs,
            kind: wire.kind,
            stck,
            type_name: wire.type_name,
            wrapped: None,
        })
    }
}
