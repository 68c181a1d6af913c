//! Value types for rivven-bind
//!
//! - `Value`: a bindable SQL value, as written into a statement position
//! - `ValueKind`: the target kind named by a parameter's `type` descriptor
//! - `SourceKind`: where in the event a parameter reads from

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// SQL value bound into a statement position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean value
    Bool(bool),
    /// 32-bit signed integer (INTEGER)
    Int32(i32),
    /// 64-bit signed integer (BIGINT)
    Int64(i64),
    /// 32-bit floating point (REAL)
    Float32(f32),
    /// 64-bit floating point (DOUBLE PRECISION)
    Float64(f64),
    /// Text string (VARCHAR, TEXT)
    String(String),
    /// Binary data (BYTEA, BLOB, VARBINARY)
    Bytes(Vec<u8>),
    /// Date without time (DATE)
    Date(NaiveDate),
    /// Timestamp without timezone (TIMESTAMP)
    DateTime(NaiveDateTime),
    /// Timestamp with timezone (TIMESTAMPTZ)
    DateTimeTz(DateTime<Utc>),
    /// UUID
    Uuid(Uuid),
    /// JSON value
    Json(serde_json::Value),
}

impl Value {
    /// Check if value is NULL
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get SQL type name
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "BOOLEAN",
            Self::Int32(_) => "INTEGER",
            Self::Int64(_) => "BIGINT",
            Self::Float32(_) => "REAL",
            Self::Float64(_) => "DOUBLE PRECISION",
            Self::String(_) => "VARCHAR",
            Self::Bytes(_) => "BYTEA",
            Self::Date(_) => "DATE",
            Self::DateTime(_) => "TIMESTAMP",
            Self::DateTimeTz(_) => "TIMESTAMPTZ",
            Self::Uuid(_) => "UUID",
            Self::Json(_) => "JSONB",
        }
    }

    /// The built-in value kind this value belongs to, if any
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::String(_) => Some(ValueKind::String),
            Self::Bytes(_) => Some(ValueKind::ByteArray),
            Self::Int64(_) => Some(ValueKind::Long),
            Self::Int32(_) => Some(ValueKind::Int),
            Self::Date(_) | Self::DateTime(_) | Self::DateTimeTz(_) => Some(ValueKind::Date),
            Self::Float64(_) => Some(ValueKind::Double),
            Self::Float32(_) => Some(ValueKind::Float),
            Self::Null => None,
            Self::Bool(_) | Self::Uuid(_) | Self::Json(_) => Some(ValueKind::Other),
        }
    }

    /// Try to convert to i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(n) => Some(i64::from(*n)),
            Self::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to convert to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int32(n) => Some(f64::from(*n)),
            Self::Int64(n) => Some(*n as f64),
            Self::Float32(n) => Some(f64::from(*n)),
            Self::Float64(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to convert to string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to convert to bytes
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b.as_slice()),
            Self::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTimeTz(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Self::Null,
        }
    }
}

/// Target kind of a parameter, named by its `type` descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `string`
    String,
    /// `bytearray`
    ByteArray,
    /// `long`
    Long,
    /// `int`
    Int,
    /// `date`
    Date,
    /// `double`
    Double,
    /// `float`
    Float,
    /// Opaque kind produced by a custom extractor
    Other,
}

impl ValueKind {
    /// Parse a built-in type descriptor. Matching is exact.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "bytearray" => Some(Self::ByteArray),
            "long" => Some(Self::Long),
            "int" => Some(Self::Int),
            "date" => Some(Self::Date),
            "double" => Some(Self::Double),
            "float" => Some(Self::Float),
            _ => None,
        }
    }

    /// The type descriptor for this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::ByteArray => "bytearray",
            Self::Long => "long",
            Self::Int => "int",
            Self::Date => "date",
            Self::Double => "double",
            Self::Float => "float",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Where in the event a parameter reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The event body
    Body,
    /// A named event header
    Header,
    /// A registered custom extractor
    Custom,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body => write!(f, "body"),
            Self::Header => write!(f, "header"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind_round_trip_names() {
        for name in ["string", "bytearray", "long", "int", "date", "double", "float"] {
            let kind = ValueKind::from_type_name(name).unwrap();
            assert_eq!(kind.type_name(), name);
        }
    }

    #[test]
    fn test_value_kind_is_case_sensitive() {
        assert_eq!(ValueKind::from_type_name("String"), None);
        assert_eq!(ValueKind::from_type_name("LONG"), None);
        assert_eq!(ValueKind::from_type_name(""), None);
        assert_eq!(ValueKind::from_type_name("other"), None);
    }

    #[test]
    fn test_value_kind_of_value() {
        assert_eq!(Value::from(1_i64).kind(), Some(ValueKind::Long));
        assert_eq!(Value::from(1_i32).kind(), Some(ValueKind::Int));
        assert_eq!(Value::from("x").kind(), Some(ValueKind::String));
        assert_eq!(Value::from(vec![1_u8]).kind(), Some(ValueKind::ByteArray));
        assert_eq!(Value::Null.kind(), None);
        assert_eq!(Value::Bool(true).kind(), Some(ValueKind::Other));
    }

    #[test]
    fn test_option_into_value() {
        let v: Value = Option::<i64>::None.into();
        assert!(v.is_null());
        let v: Value = Some(7_i64).into();
        assert_eq!(v.as_i64(), Some(7));
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int32(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float32(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::String("1.5".into()).as_f64(), None);

        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::Int64(1).as_str(), None);

        assert_eq!(Value::from(vec![1_u8, 2]).as_bytes(), Some(&[1_u8, 2][..]));
        assert_eq!(Value::from("ab").as_bytes(), Some(&b"ab"[..]));
        assert_eq!(Value::Null.as_bytes(), None);
    }
}
