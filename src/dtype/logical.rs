//! Columnar logical types
//!
//! Logical types mirror Arrow's type system. They have no hierarchy: two logical
//! types are compatible only when they are equal, so `int32` never satisfies an
//! `int64` requirement and `timestamp[ns]` never satisfies `timestamp[ns, tz=UTC]`.

use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Resolution of temporal logical types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeUnit {
    #[serde(rename = "s")]
    Second,
    #[serde(rename = "ms")]
    Millisecond,
    #[serde(rename = "us")]
    Microsecond,
    #[serde(rename = "ns")]
    Nanosecond,
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Second => write!(f, "s"),
            Self::Millisecond => write!(f, "ms"),
            Self::Microsecond => write!(f, "us"),
            Self::Nanosecond => write!(f, "ns"),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "s" => Ok(Self::Second),
            "ms" => Ok(Self::Millisecond),
            "us" => Ok(Self::Microsecond),
            "ns" => Ok(Self::Nanosecond),
            other => Err(ValidatorError::invalid_dtype(format!(
                "unknown time unit `{}` (expected s, ms, us or ns)",
                other
            ))),
        }
    }
}

/// Columnar logical type, compared by equality only
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalType {
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float16,
    Float32,
    Float64,
    Utf8,
    LargeUtf8,
    Binary,
    LargeBinary,
    Date32,
    Date64,
    Timestamp(TimeUnit, Option<String>),
    Duration(TimeUnit),
    Decimal128(u8, i8),
    /// Any other backend type, identified by its display name
    ///
    /// Backend names such as `Dictionary(Int32, Utf8)` or `Time32(Second)` are
    /// written as is. Any other name is written as `other:<name>`.
    Other(String),
}

impl std::fmt::Display for LogicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean => write!(f, "bool"),
            Self::Int8 => write!(f, "int8"),
            Self::Int16 => write!(f, "int16"),
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
            Self::UInt8 => write!(f, "uint8"),
            Self::UInt16 => write!(f, "uint16"),
            Self::UInt32 => write!(f, "uint32"),
            Self::UInt64 => write!(f, "uint64"),
            Self::Float16 => write!(f, "float16"),
            Self::Float32 => write!(f, "float32"),
            Self::Float64 => write!(f, "float64"),
            Self::Utf8 => write!(f, "string"),
            Self::LargeUtf8 => write!(f, "large_string"),
            Self::Binary => write!(f, "binary"),
            Self::LargeBinary => write!(f, "large_binary"),
            Self::Date32 => write!(f, "date32"),
            Self::Date64 => write!(f, "date64"),
            Self::Timestamp(unit, None) => write!(f, "timestamp[{}]", unit),
            Self::Timestamp(unit, Some(tz)) => write!(f, "timestamp[{}, tz={}]", unit, tz),
            Self::Duration(unit) => write!(f, "duration[{}]", unit),
            Self::Decimal128(precision, scale) => write!(f, "decimal128({}, {})", precision, scale),
            Self::Other(name) if is_backend_name(name) => write!(f, "{}", name),
            Self::Other(name) => write!(f, "{}{}", OTHER_PREFIX, name),
        }
    }
}

impl FromStr for LogicalType {
    type Err = ValidatorError;

    /// Parse the lower-case names (`int64`, `timestamp[ns, tz=UTC]`, ...)
    ///
    /// A name that starts with an upper-case letter and has balanced brackets is
    /// taken as a backend type name (`Dictionary(Int32, Utf8)`) and becomes
    /// [`LogicalType::Other`], as does anything after `other:`.
    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let unknown = || ValidatorError::invalid_dtype(format!("unknown logical type `{}`", raw));

        if let Some(name) = raw.strip_prefix(OTHER_PREFIX) {
            if name.is_empty() {
                return Err(unknown());
            }
            return Ok(Self::Other(name.to_string()));
        }
        if is_backend_name(raw) {
            return Ok(Self::Other(raw.to_string()));
        }

        if let Some(inner) = bracketed(raw, "timestamp[", ']') {
            return match inner.split_once(',') {
                None => Ok(Self::Timestamp(inner.parse()?, None)),
                Some((unit, tz)) => {
                    let tz = tz.trim().strip_prefix("tz=").ok_or_else(unknown)?.trim();
                    if tz.is_empty() {
                        return Err(unknown());
                    }
                    Ok(Self::Timestamp(unit.parse()?, Some(tz.to_string())))
                },
            };
        }
        if let Some(inner) = bracketed(raw, "duration[", ']') {
            return Ok(Self::Duration(inner.parse()?));
        }
        if let Some(inner) = bracketed(raw, "decimal128(", ')') {
            let (precision, scale) = inner.split_once(',').ok_or_else(unknown)?;
            let precision = precision.trim().parse::<u8>().map_err(|_| unknown())?;
            let scale = scale.trim().parse::<i8>().map_err(|_| unknown())?;
            return Ok(Self::Decimal128(precision, scale));
        }

        let parsed = match raw {
            "null" => Self::Null,
            "bool" | "boolean" => Self::Boolean,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint8" => Self::UInt8,
            "uint16" => Self::UInt16,
            "uint32" => Self::UInt32,
            "uint64" => Self::UInt64,
            "float16" | "halffloat" => Self::Float16,
            "float32" | "float" => Self::Float32,
            "float64" | "double" => Self::Float64,
            "string" | "utf8" => Self::Utf8,
            "large_string" | "large_utf8" => Self::LargeUtf8,
            "binary" => Self::Binary,
            "large_binary" => Self::LargeBinary,
            "date32" | "date32[day]" => Self::Date32,
            "date64" | "date64[ms]" => Self::Date64,
            _ => return Err(unknown()),
        };
        Ok(parsed)
    }
}

const OTHER_PREFIX: &str = "other:";

/// Arrow's own type names: `Utf8View`, `Time32(Second)`, `List(Field { .. })`
fn is_backend_name(name: &str) -> bool {
    let starts_upper = name.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    starts_upper && name == name.trim() && brackets_balanced(name)
}

fn brackets_balanced(name: &str) -> bool {
    let mut open = Vec::new();
    for c in name.chars() {
        match c {
            '(' | '[' | '{' | '<' => open.push(c),
            ')' | ']' | '}' | '>' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    '}' => '{',
                    _ => '<',
                };
                if open.pop() != Some(expected) {
                    return false;
                }
            },
            _ => {},
        }
    }
    open.is_empty()
}

fn bracketed<'a>(raw: &'a str, open: &str, close: char) -> Option<&'a str> {
    raw.strip_prefix(open)?.strip_suffix(close).map(str::trim)
}
