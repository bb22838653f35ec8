//! Input traits for validated objects
//!
//! Validators never see a concrete array, tensor or frame type. They see these
//! traits, which the feature-gated adapters in [`crate::backends`] implement for
//! `ndarray`, `tract-core` and `arrow` types.

use crate::dtype::TypeDescriptor;
use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Objects with an ordered sequence of dimension sizes
pub trait Shaped {
    fn dims(&self) -> Vec<usize>;
}

/// Objects with a single element type
pub trait Typed {
    fn dtype(&self) -> TypeDescriptor;
}

/// Objects that live on a compute device
pub trait Placed {
    fn device(&self) -> Device;
}

/// A single named column
pub trait Series {
    fn name(&self) -> Option<&str>;

    fn dtype(&self) -> TypeDescriptor;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row labels; positional (`"0"`, `"1"`, ...) unless the backend has an index
    fn index_labels(&self) -> Vec<String> {
        positional_labels(self.len())
    }
}

/// Tabular objects made of named, typed columns
pub trait Tabular {
    fn num_rows(&self) -> usize;

    /// Column names and element types, in column order
    fn column_types(&self) -> Vec<(String, TypeDescriptor)>;

    /// A view of one column, `None` if it does not exist
    fn column(&self, name: &str) -> Option<ColumnView>;

    /// Row labels; positional (`"0"`, `"1"`, ...) unless the backend has an index
    fn index_labels(&self) -> Vec<String> {
        positional_labels(self.num_rows())
    }
}

pub(crate) fn positional_labels(len: usize) -> Vec<String> {
    (0..len).map(|i| i.to_string()).collect()
}

impl Shaped for [usize] {
    fn dims(&self) -> Vec<usize> {
        self.to_vec()
    }
}

impl Shaped for Vec<usize> {
    fn dims(&self) -> Vec<usize> {
        self.clone()
    }
}

/// Owned description of one column, produced by [`Tabular::column`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub name: Option<String>,
    pub dtype: TypeDescriptor,
    pub len: usize,
    /// Explicit row labels, positional when `None`
    pub index: Option<Vec<String>>,
}

impl ColumnView {
    pub fn new<T: Into<TypeDescriptor>>(name: Option<String>, dtype: T, len: usize) -> Self {
        Self {
            name,
            dtype: dtype.into(),
            len,
            index: None,
        }
    }

    #[must_use]
    pub fn with_index(mut self, index: Vec<String>) -> Self {
        self.index = Some(index);
        self
    }
}

impl Series for ColumnView {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn dtype(&self) -> TypeDescriptor {
        self.dtype.clone()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn index_labels(&self) -> Vec<String> {
        self.index
            .clone()
            .unwrap_or_else(|| positional_labels(self.len))
    }
}

/// Kind of compute device
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Cpu,
    Cuda,
    Mps,
    Other(String),
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda => write!(f, "cuda"),
            Self::Mps => write!(f, "mps"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Compute device with an optional ordinal, written `cpu`, `cuda:1`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Device {
    pub kind: DeviceKind,
    pub index: Option<usize>,
}

impl Device {
    pub fn new(kind: DeviceKind, index: Option<usize>) -> Self {
        Self { kind, index }
    }

    pub fn cpu() -> Self {
        Self::new(DeviceKind::Cpu, None)
    }

    pub fn cuda(index: usize) -> Self {
        Self::new(DeviceKind::Cuda, Some(index))
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}:{}", self.kind, index),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for Device {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let (kind, index) = match raw.split_once(':') {
            Some((kind, index)) => {
                let index = index.trim().parse::<usize>().map_err(|e| {
                    ValidatorError::invalid_constraint(format!(
                        "invalid device index in `{}`: {}",
                        raw, e
                    ))
                })?;
                (kind.trim(), Some(index))
            },
            None => (raw, None),
        };
        let kind = match kind.to_ascii_lowercase().as_str() {
            "" => {
                return Err(ValidatorError::invalid_constraint("device name must not be empty"));
            },
            "cpu" => DeviceKind::Cpu,
            "cuda" => DeviceKind::Cuda,
            "mps" => DeviceKind::Mps,
            other => DeviceKind::Other(other.to_string()),
        };
        Ok(Self { kind, index })
    }
}

impl TryFrom<String> for Device {
    type Error = ValidatorError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Device> for String {
    fn from(value: Device) -> Self {
        value.to_string()
    }
}
