//! Numeric scalar types and their subtype hierarchy
//!
//! The hierarchy follows NumPy's scalar tree. Abstract types (`integer`,
//! `floating`, ...) only appear in requirements; concrete types describe data.
//!
//! ```text
//! generic
//! ├── number
//! │   ├── integer
//! │   │   ├── signedinteger: int8 int16 int32 int64 timedelta64
//! │   │   └── unsignedinteger: uint8 uint16 uint32 uint64
//! │   └── inexact
//! │       ├── floating: float16 float32 float64
//! │       └── complexfloating: complex64 complex128
//! ├── bool
//! ├── flexible
//! │   └── character: str bytes
//! ├── datetime64
//! └── object
//! ```

use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Scalar element type from the subtype hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScalarType {
    Generic,
    Number,
    Integer,
    SignedInteger,
    UnsignedInteger,
    Inexact,
    Floating,
    ComplexFloating,
    Flexible,
    Character,
    Bool,
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
    Complex64,
    Complex128,
    Str,
    Bytes,
    Datetime64,
    Timedelta64,
    Object,
}

impl ScalarType {
    /// Direct ancestor in the hierarchy, `None` for `generic`
    pub fn parent(self) -> Option<Self> {
        use ScalarType::*;
        let parent = match self {
            Generic => return None,
            Number | Bool | Flexible | Datetime64 | Object => Generic,
            Integer | Inexact => Number,
            SignedInteger | UnsignedInteger => Integer,
            Int8 | Int16 | Int32 | Int64 | Timedelta64 => SignedInteger,
            UInt8 | UInt16 | UInt32 | UInt64 => UnsignedInteger,
            Floating | ComplexFloating => Inexact,
            Float16 | Float32 | Float64 => Floating,
            Complex64 | Complex128 => ComplexFloating,
            Character => Flexible,
            Str | Bytes => Character,
        };
        Some(parent)
    }

    /// True for the abstract groupings that no data is ever typed as
    pub fn is_abstract(self) -> bool {
        use ScalarType::*;
        matches!(
            self,
            Generic
                | Number
                | Integer
                | SignedInteger
                | UnsignedInteger
                | Inexact
                | Floating
                | ComplexFloating
                | Flexible
                | Character
        )
    }

    /// True if `self` is `ancestor` or descends from it
    pub fn is_subtype_of(self, ancestor: Self) -> bool {
        std::iter::successors(Some(self), |t| t.parent()).any(|t| t == ancestor)
    }

    /// Canonical name
    pub fn name(self) -> &'static str {
        use ScalarType::*;
        match self {
            Generic => "generic",
            Number => "number",
            Integer => "integer",
            SignedInteger => "signedinteger",
            UnsignedInteger => "unsignedinteger",
            Inexact => "inexact",
            Floating => "floating",
            ComplexFloating => "complexfloating",
            Flexible => "flexible",
            Character => "character",
            Bool => "bool",
            Int8 => "int8",
            Int16 => "int16",
            Int32 => "int32",
            Int64 => "int64",
            UInt8 => "uint8",
            UInt16 => "uint16",
            UInt32 => "uint32",
            UInt64 => "uint64",
            Float16 => "float16",
            Float32 => "float32",
            Float64 => "float64",
            Complex64 => "complex64",
            Complex128 => "complex128",
            Str => "str",
            Bytes => "bytes",
            Datetime64 => "datetime64",
            Timedelta64 => "timedelta64",
            Object => "object",
        }
    }

    /// Parse an array-interface type string such as `<i8`, `|b1` or `<M8[ns]`
    fn from_typestr(code: &str) -> Option<Self> {
        use ScalarType::*;
        let (kind, rest) = code.split_at(code.char_indices().nth(1).map_or(code.len(), |(i, _)| i));
        let width = rest.split('[').next().unwrap_or(rest);
        let parsed = match (kind, width) {
            ("b", "1") => Bool,
            ("i", "1") => Int8,
            ("i", "2") => Int16,
            ("i", "4") => Int32,
            ("i", "8") => Int64,
            ("u", "1") => UInt8,
            ("u", "2") => UInt16,
            ("u", "4") => UInt32,
            ("u", "8") => UInt64,
            ("f", "2") => Float16,
            ("f", "4") => Float32,
            ("f", "8") => Float64,
            ("c", "8") => Complex64,
            ("c", "16") => Complex128,
            ("U", _) => Str,
            ("S", _) => Bytes,
            ("O", _) => Object,
            ("M", "8") => Datetime64,
            ("m", "8") => Timedelta64,
            _ => return None,
        };
        Some(parsed)
    }

    fn from_name(name: &str) -> Option<Self> {
        use ScalarType::*;
        // datetime64[ns], timedelta64[s], ... carry a unit we do not distinguish
        let base = name.split('[').next().unwrap_or(name);
        let parsed = match base {
            "generic" => Generic,
            "number" => Number,
            "integer" => Integer,
            "signedinteger" => SignedInteger,
            "unsignedinteger" => UnsignedInteger,
            "inexact" => Inexact,
            "floating" => Floating,
            "complexfloating" => ComplexFloating,
            "flexible" => Flexible,
            "character" => Character,
            "bool" | "bool_" => Bool,
            "int8" | "byte" | "i8" => Int8,
            "int16" | "short" | "i16" => Int16,
            "int32" | "intc" | "i32" => Int32,
            "int64" | "int_" | "longlong" | "i64" => Int64,
            "uint8" | "ubyte" | "u8" => UInt8,
            "uint16" | "ushort" | "u16" => UInt16,
            "uint32" | "uintc" | "u32" => UInt32,
            "uint64" | "ulonglong" | "u64" => UInt64,
            "float16" | "half" | "f16" => Float16,
            "float32" | "single" | "f32" => Float32,
            "float64" | "double" | "float_" | "f64" => Float64,
            "complex64" | "csingle" => Complex64,
            "complex128" | "cdouble" | "complex_" => Complex128,
            "str" | "str_" | "unicode" => Str,
            "bytes" | "bytes_" => Bytes,
            "datetime64" => Datetime64,
            "timedelta64" => Timedelta64,
            "object" | "object_" => Object,
            _ => return None,
        };
        Some(parsed)
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScalarType {
    type Err = ValidatorError;

    /// Accepts canonical names, NumPy aliases, Rust shorthands (`i64`, `f32`) and
    /// array-interface type strings with a byte-order prefix (`<i8` is `int64`).
    ///
    /// Without a prefix the digits are a bit width, not a byte count: `i8` is
    /// Rust's `int8`, not NumPy's eight-byte `"i8"`. Write `<i8` or `int64` for
    /// the NumPy reading.
    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let parsed = match raw.strip_prefix(['<', '>', '=', '|']) {
            Some(code) => Self::from_typestr(code),
            None => Self::from_name(&raw.to_ascii_lowercase()),
        };
        parsed.ok_or_else(|| ValidatorError::invalid_dtype(format!("unknown scalar type `{}`", raw)))
    }
}

impl TryFrom<String> for ScalarType {
    type Error = ValidatorError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ScalarType> for String {
    fn from(value: ScalarType) -> Self {
        value.name().to_string()
    }
}
