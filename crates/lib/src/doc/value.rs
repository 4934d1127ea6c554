//! Value types for document nodes.
//!
//! This module provides the payload representation nodes carry and the
//! public [`Value`] enum used to read and write scalar payloads. Containers
//! (arrays and dictionaries) are nodes, not values: they are built and
//! inspected through the container operations on [`crate::doc::Doc`].
//!
//! Dictionary key slots use an internal-only payload variant that is never
//! exposed here — callers cannot construct a key value and never receive
//! one from an accessor.

use std::fmt;

use chrono::{DateTime, Utc};

use super::errors::DocError;

/// A calendar timestamp with microsecond resolution.
///
/// Stored exactly as the wire-facing layers expect it: whole seconds since
/// the Unix epoch plus a microsecond remainder, both 32-bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Date {
    /// Whole seconds since the Unix epoch
    pub sec: i32,
    /// Microseconds past `sec`
    pub usec: i32,
}

impl Date {
    /// Creates a date from raw second/microsecond fields.
    pub fn new(sec: i32, usec: i32) -> Self {
        Self { sec, usec }
    }

    /// Converts to a UTC datetime.
    ///
    /// Returns `None` when the microsecond field is out of range for a
    /// calendar timestamp (negative or ≥ 1s).
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !(0..1_000_000).contains(&self.usec) {
            return None;
        }
        DateTime::from_timestamp(i64::from(self.sec), self.usec as u32 * 1_000)
    }
}

impl From<DateTime<Utc>> for Date {
    fn from(dt: DateTime<Utc>) -> Self {
        let sec = dt.timestamp().clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Self {
            sec,
            usec: dt.timestamp_subsec_micros() as i32,
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.sec, self.usec)
    }
}

/// The kind tag of a node.
///
/// Every node carries exactly one payload variant; `Kind` names it without
/// borrowing the payload. Stale or absent handles report [`Kind::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Kind {
    /// No value
    None,
    /// Boolean value
    Bool,
    /// 64-bit unsigned integer
    UInt,
    /// Double-precision float
    Real,
    /// UTF-8 text
    Text,
    /// Opaque byte buffer
    Bytes,
    /// Second/microsecond timestamp
    Date,
    /// 64-bit unique identifier
    Uid,
    /// Ordered container
    Array,
    /// Order-preserving keyed container
    Dict,
}

impl Kind {
    /// Returns `true` for the container kinds.
    pub fn is_container(self) -> bool {
        matches!(self, Kind::Array | Kind::Dict)
    }

    /// Returns the kind name as a string
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::None => "none",
            Kind::Bool => "bool",
            Kind::UInt => "uint",
            Kind::Real => "real",
            Kind::Text => "text",
            Kind::Bytes => "bytes",
            Kind::Date => "date",
            Kind::Uid => "uid",
            Kind::Array => "array",
            Kind::Dict => "dict",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal node payload.
///
/// The `Key` variant names the first half of a dictionary pair. It is
/// synthesized by the dictionary mutators only and never crosses the public
/// API in either direction.
#[derive(Debug, Clone)]
pub(crate) enum Payload {
    None,
    Bool(bool),
    UInt(u64),
    Uid(u64),
    Real(f64),
    Date(Date),
    Text(String),
    Key(String),
    Bytes(Vec<u8>),
    Array,
    Dict,
}

impl Payload {
    /// The public kind tag for this payload.
    ///
    /// Key payloads report `Kind::None`; key nodes are unreachable through
    /// the public surface, so the mapping is only ever observed internally.
    pub(crate) fn kind(&self) -> Kind {
        match self {
            Payload::None | Payload::Key(_) => Kind::None,
            Payload::Bool(_) => Kind::Bool,
            Payload::UInt(_) => Kind::UInt,
            Payload::Uid(_) => Kind::Uid,
            Payload::Real(_) => Kind::Real,
            Payload::Date(_) => Kind::Date,
            Payload::Text(_) => Kind::Text,
            Payload::Bytes(_) => Kind::Bytes,
            Payload::Array => Kind::Array,
            Payload::Dict => Kind::Dict,
        }
    }

    /// The zero payload of `kind`, as produced by a kind reset.
    pub(crate) fn zeroed(kind: Kind) -> Payload {
        match kind {
            Kind::None => Payload::None,
            Kind::Bool => Payload::Bool(false),
            Kind::UInt => Payload::UInt(0),
            Kind::Uid => Payload::Uid(0),
            Kind::Real => Payload::Real(0.0),
            Kind::Date => Payload::Date(Date::default()),
            Kind::Text => Payload::Text(String::new()),
            Kind::Bytes => Payload::Bytes(Vec::new()),
            Kind::Array => Payload::Array,
            Kind::Dict => Payload::Dict,
        }
    }

    /// Snapshot of a scalar payload, `None` for containers and key slots.
    pub(crate) fn to_value(&self) -> Option<Value> {
        match self {
            Payload::Bool(b) => Some(Value::Bool(*b)),
            Payload::UInt(n) => Some(Value::UInt(*n)),
            Payload::Uid(n) => Some(Value::Uid(*n)),
            Payload::Real(r) => Some(Value::Real(*r)),
            Payload::Date(d) => Some(Value::Date(*d)),
            Payload::Text(s) => Some(Value::Text(s.clone())),
            Payload::Bytes(b) => Some(Value::Bytes(b.clone())),
            Payload::None | Payload::Key(_) | Payload::Array | Payload::Dict => None,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => Payload::Bool(b),
            Value::UInt(n) => Payload::UInt(n),
            Value::Uid(n) => Payload::Uid(n),
            Value::Real(r) => Payload::Real(r),
            Value::Date(d) => Payload::Date(d),
            Value::Text(s) => Payload::Text(s),
            Value::Bytes(b) => Payload::Bytes(b),
        }
    }
}

/// A scalar value carried by a document node.
///
/// `Value` covers the seven scalar kinds; container nodes have no value
/// form. Reads go through [`crate::doc::Doc::value`] or the per-kind
/// getters; conversions to plain Rust types are available via `TryFrom`.
///
/// # Direct Comparisons
///
/// `Value` implements `PartialEq` with primitive types for ergonomic
/// assertions:
///
/// ```
/// use doctree::doc::Value;
///
/// let text = Value::Text("hello".to_string());
/// let number = Value::UInt(42);
///
/// assert!(text == "hello");
/// assert!(number == 42);
/// assert!(!(text == 42));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// 64-bit unsigned integer
    UInt(u64),
    /// 64-bit unique identifier
    Uid(u64),
    /// Double-precision float
    Real(f64),
    /// Second/microsecond timestamp
    Date(Date),
    /// UTF-8 text
    Text(String),
    /// Opaque byte buffer
    Bytes(Vec<u8>),
}

impl Value {
    /// The kind tag this value corresponds to.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::UInt(_) => Kind::UInt,
            Value::Uid(_) => Kind::Uid,
            Value::Real(_) => Kind::Real,
            Value::Date(_) => Kind::Date,
            Value::Text(_) => Kind::Text,
            Value::Bytes(_) => Kind::Bytes,
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an unsigned integer
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a UID
    pub fn as_uid(&self) -> Option<u64> {
        match self {
            Value::Uid(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Attempts to convert to a date
    pub fn as_date(&self) -> Option<Date> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Attempts to convert to a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a byte slice
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Uid(n) => write!(f, "uid:{n}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::UInt(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::UInt(u64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Real(f64::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Date> for Value {
    fn from(value: Date) -> Self {
        Value::Date(value)
    }
}

// TryFrom implementations for typed extraction
impl TryFrom<&Value> for bool {
    type Error = DocError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_bool().ok_or_else(|| DocError::TypeMismatch {
            expected: "bool".to_string(),
            actual: value.type_name().to_string(),
        })
    }
}

impl TryFrom<&Value> for u64 {
    type Error = DocError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_uint().ok_or_else(|| DocError::TypeMismatch {
            expected: "uint".to_string(),
            actual: value.type_name().to_string(),
        })
    }
}

impl TryFrom<&Value> for f64 {
    type Error = DocError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_real().ok_or_else(|| DocError::TypeMismatch {
            expected: "real".to_string(),
            actual: value.type_name().to_string(),
        })
    }
}

impl TryFrom<&Value> for String {
    type Error = DocError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| DocError::TypeMismatch {
                expected: "text".to_string(),
                actual: value.type_name().to_string(),
            })
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = DocError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_text().ok_or_else(|| DocError::TypeMismatch {
            expected: "text".to_string(),
            actual: value.type_name().to_string(),
        })
    }
}

impl TryFrom<&Value> for Vec<u8> {
    type Error = DocError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_bytes()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| DocError::TypeMismatch {
                expected: "bytes".to_string(),
                actual: value.type_name().to_string(),
            })
    }
}

impl TryFrom<&Value> for Date {
    type Error = DocError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_date().ok_or_else(|| DocError::TypeMismatch {
            expected: "date".to_string(),
            actual: value.type_name().to_string(),
        })
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self.as_text() == Some(other.as_str())
    }
}

impl PartialEq<u64> for Value {
    fn eq(&self, other: &u64) -> bool {
        self.as_uint() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self.as_real() == Some(*other)
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for u64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for f64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
