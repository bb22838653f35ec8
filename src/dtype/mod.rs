//! Dtype descriptors, requirement sets and the compatibility resolver
//!
//! Two families of type descriptors exist side by side:
//!
//! - [`ScalarType`]: numeric scalar types with a subtype hierarchy. An observed
//!   `int32` satisfies a required `integer`.
//! - [`LogicalType`]: columnar logical types. They only match by equality.
//!
//! The comparison rule is picked per candidate. If either the observed type or the
//! candidate is a logical type, only equality counts. When both are scalar types
//! the observed type may be the candidate or any descendant of it.

mod logical;
mod scalar;

pub use logical::{LogicalType, TimeUnit};
pub use scalar::ScalarType;

use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Prefix that selects the logical family in descriptor strings
pub const LOGICAL_PREFIX: &str = "arrow:";

/// A type descriptor from either family
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeDescriptor {
    Scalar(ScalarType),
    Logical(LogicalType),
}

impl TypeDescriptor {
    pub fn is_logical(&self) -> bool {
        matches!(self, Self::Logical(_))
    }

    /// Whether this observed type satisfies `candidate`
    pub fn matches(&self, candidate: &TypeDescriptor) -> bool {
        match (self, candidate) {
            (Self::Scalar(observed), Self::Scalar(required)) => observed.is_subtype_of(*required),
            _ => self == candidate,
        }
    }
}

impl From<ScalarType> for TypeDescriptor {
    fn from(value: ScalarType) -> Self {
        Self::Scalar(value)
    }
}

impl From<LogicalType> for TypeDescriptor {
    fn from(value: LogicalType) -> Self {
        Self::Logical(value)
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{}", scalar),
            Self::Logical(logical) => write!(f, "{}{}", LOGICAL_PREFIX, logical),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = ValidatorError;

    /// `arrow:int64` is a logical type, anything else is parsed as a scalar type
    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        match raw.strip_prefix(LOGICAL_PREFIX) {
            Some(logical) => Ok(Self::Logical(logical.parse()?)),
            None => Ok(Self::Scalar(raw.parse()?)),
        }
    }
}

impl TryFrom<String> for TypeDescriptor {
    type Error = ValidatorError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TypeDescriptor> for String {
    fn from(value: TypeDescriptor) -> Self {
        value.to_string()
    }
}

/// Deduplicated, ordered set of acceptable type descriptors
///
/// Raw forms are canonicalised on the way in, so `"<i8"`, `"int64"` and `"i64"`
/// end up as a single `int64` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DTypeSet(BTreeSet<TypeDescriptor>);

impl DTypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every raw descriptor and collect the canonical forms
    pub fn parse<I, S>(descriptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        descriptors
            .into_iter()
            .map(|raw| raw.as_ref().parse::<TypeDescriptor>())
            .collect()
    }

    pub fn insert<T: Into<TypeDescriptor>>(&mut self, descriptor: T) -> bool {
        self.0.insert(descriptor.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact membership, ignoring the hierarchy
    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.0.contains(descriptor)
    }

    /// Hierarchy-aware match against any candidate in the set
    pub fn accepts(&self, observed: &TypeDescriptor) -> bool {
        self.0.iter().any(|candidate| observed.matches(candidate))
    }
}

impl std::fmt::Display for DTypeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.0.iter().map(ToString::to_string).collect::<Vec<_>>();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl<T: Into<TypeDescriptor>> FromIterator<T> for DTypeSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<TypeDescriptor> for DTypeSet {
    fn from(value: TypeDescriptor) -> Self {
        std::iter::once(value).collect()
    }
}

impl From<ScalarType> for DTypeSet {
    fn from(value: ScalarType) -> Self {
        std::iter::once(value).collect()
    }
}

impl From<LogicalType> for DTypeSet {
    fn from(value: LogicalType) -> Self {
        std::iter::once(value).collect()
    }
}

impl<T: Into<TypeDescriptor>, const N: usize> From<[T; N]> for DTypeSet {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

/// Dtype requirement for one column or object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRequirement", into = "RawRequirement")]
pub enum DTypeRequirement {
    /// No constraint
    Any,
    /// Must match at least one descriptor
    OneOf(DTypeSet),
}

impl DTypeRequirement {
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl Default for DTypeRequirement {
    fn default() -> Self {
        Self::Any
    }
}

impl std::fmt::Display for DTypeRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::OneOf(set) => write!(f, "{}", set),
        }
    }
}

impl From<DTypeSet> for DTypeRequirement {
    fn from(value: DTypeSet) -> Self {
        Self::OneOf(value)
    }
}

impl From<TypeDescriptor> for DTypeRequirement {
    fn from(value: TypeDescriptor) -> Self {
        Self::OneOf(value.into())
    }
}

impl From<ScalarType> for DTypeRequirement {
    fn from(value: ScalarType) -> Self {
        Self::OneOf(value.into())
    }
}

impl From<LogicalType> for DTypeRequirement {
    fn from(value: LogicalType) -> Self {
        Self::OneOf(value.into())
    }
}

impl<T: Into<TypeDescriptor>, const N: usize> From<[T; N]> for DTypeRequirement {
    fn from(values: [T; N]) -> Self {
        Self::OneOf(values.into())
    }
}

/// JSON form of a requirement: `"any"`, `"int64"` or `["int64", "arrow:int64"]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRequirement {
    One(String),
    Many(Vec<String>),
}

impl TryFrom<RawRequirement> for DTypeRequirement {
    type Error = ValidatorError;

    fn try_from(raw: RawRequirement) -> Result<Self> {
        match raw {
            RawRequirement::One(name) if name.trim() == "any" => Ok(Self::Any),
            RawRequirement::One(name) => Ok(Self::OneOf(DTypeSet::parse([name])?)),
            RawRequirement::Many(names) => Ok(Self::OneOf(DTypeSet::parse(names)?)),
        }
    }
}

impl From<DTypeRequirement> for RawRequirement {
    fn from(requirement: DTypeRequirement) -> Self {
        match requirement {
            DTypeRequirement::Any => Self::One("any".to_string()),
            DTypeRequirement::OneOf(set) => Self::Many(set.iter().map(ToString::to_string).collect()),
        }
    }
}

/// Whether `observed` satisfies `required`
///
/// [`DTypeRequirement::Any`] is compatible with everything and never inspects the
/// observed type.
pub fn is_compatible(observed: &TypeDescriptor, required: &DTypeRequirement) -> bool {
    match required {
        DTypeRequirement::Any => true,
        DTypeRequirement::OneOf(set) => set.accepts(observed),
    }
}
