//! Declarative validation schemas
//!
//! Schemas are the configuration layer of the crate. Each one can be written by
//! hand, built with a fluent builder or loaded from JSON, and is compiled once
//! into a bundled [`Validator`] that runs every declared check.
//!
//! ```rust
//! use ds_validator::schema::ArraySchema;
//!
//! let schema = ArraySchema::from_json(r#"{ "shape": [3, "n", null], "dtype": ["floating"] }"#).unwrap();
//! assert_eq!(schema.shape.unwrap().to_string(), "(3, n, _)");
//! ```

use crate::columns::OtherColumns;
use crate::dtype::{DTypeRequirement, DTypeSet};
use crate::error::{Result, ValidatorError};
use crate::families::{ArrayValidators, FrameValidators, SeriesValidators, TensorValidators};
use crate::shape::ShapeSpec;
use crate::tracing_config::spans;
use crate::types::{ColumnView, Device, Placed, Series, Shaped, Tabular, Typed};
use crate::validator::Validator;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

fn bundle_checks<T: ?Sized + 'static>(schema: &str, checks: Vec<Validator<T>>) -> Validator<T> {
    let _span = spans::schema_compile(schema, checks.len()).entered();
    tracing::debug!(schema, check_count = checks.len(), "Compiled schema");
    Validator::bundle(checks)
}

fn require_rank(shape: Option<&ShapeSpec>, rank: usize, what: &str) -> Result<()> {
    match shape {
        Some(spec) if spec.rank() != rank => Err(ValidatorError::invalid_constraint(format!(
            "{} shape must have {} dimension(s), got {}",
            what, rank, spec
        ))),
        _ => Ok(()),
    }
}

/// Required row labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexRule {
    pub required: BTreeSet<String>,
    /// Whether labels outside `required` are accepted (default: true)
    #[serde(default = "default_allow_extra")]
    pub allow_extra: bool,
}

fn default_allow_extra() -> bool {
    true
}

impl IndexRule {
    pub fn new<I>(required: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            allow_extra: true,
        }
    }

    #[must_use]
    pub fn exact(mut self) -> Self {
        self.allow_extra = false;
        self
    }
}

/// Schema for n-dimensional arrays
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArraySchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeSpec>,
    /// Acceptable element types, matched through the scalar hierarchy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtype: Option<DTypeSet>,
}

impl ArraySchema {
    #[must_use]
    pub fn builder() -> ArraySchemaBuilder {
        ArraySchemaBuilder::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let schema: Self = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Array schemas carry no cross-field rules
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Compile into one validator; fails if the `ndarray` feature is disabled
    pub fn compile<A>(&self) -> Result<Validator<A>>
    where
        A: Shaped + Typed + ?Sized + 'static,
    {
        let arrays = ArrayValidators::init()?;
        let mut checks = Vec::new();
        if let Some(shape) = &self.shape {
            checks.push(arrays.shape(shape.clone()));
        }
        if let Some(dtype) = &self.dtype {
            checks.push(arrays.dtype(dtype.clone()));
        }
        Ok(bundle_checks("array", checks))
    }
}

/// Builder for `ArraySchema`
#[derive(Debug, Default)]
pub struct ArraySchemaBuilder {
    schema: ArraySchema,
}

impl ArraySchemaBuilder {
    #[must_use]
    pub fn shape(mut self, shape: ShapeSpec) -> Self {
        self.schema.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn dtype<D: Into<DTypeSet>>(mut self, dtype: D) -> Self {
        self.schema.dtype = Some(dtype.into());
        self
    }

    pub fn build(self) -> Result<ArraySchema> {
        let schema = self.schema;
        schema.validate()?;
        Ok(schema)
    }
}

/// Schema for tensors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TensorSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeSpec>,
    /// Acceptable element types, matched exactly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtype: Option<DTypeSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    /// Also compare the device ordinal
    pub match_index: bool,
}

impl TensorSchema {
    #[must_use]
    pub fn builder() -> TensorSchemaBuilder {
        TensorSchemaBuilder::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let schema: Self = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `match_index` needs a device to compare against
    pub fn validate(&self) -> Result<()> {
        if self.match_index && self.device.is_none() {
            return Err(ValidatorError::invalid_constraint(
                "match_index is set but no device is required",
            ));
        }
        Ok(())
    }

    /// Compile into one validator; fails if the `tract` feature is disabled
    pub fn compile<T>(&self) -> Result<Validator<T>>
    where
        T: Shaped + Typed + Placed + ?Sized + 'static,
    {
        let tensors = TensorValidators::init()?;
        let mut checks = Vec::new();
        if let Some(shape) = &self.shape {
            checks.push(tensors.shape(shape.clone()));
        }
        if let Some(dtype) = &self.dtype {
            checks.push(tensors.dtype(dtype.clone()));
        }
        if let Some(device) = &self.device {
            checks.push(tensors.device(device.clone(), self.match_index));
        }
        Ok(bundle_checks("tensor", checks))
    }
}

/// Builder for `TensorSchema`
#[derive(Debug, Default)]
pub struct TensorSchemaBuilder {
    schema: TensorSchema,
}

impl TensorSchemaBuilder {
    #[must_use]
    pub fn shape(mut self, shape: ShapeSpec) -> Self {
        self.schema.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn dtype<D: Into<DTypeSet>>(mut self, dtype: D) -> Self {
        self.schema.dtype = Some(dtype.into());
        self
    }

    #[must_use]
    pub fn device(mut self, device: Device) -> Self {
        self.schema.device = Some(device);
        self
    }

    #[must_use]
    pub fn match_index(mut self, match_index: bool) -> Self {
        self.schema.match_index = match_index;
        self
    }

    pub fn build(self) -> Result<TensorSchema> {
        let schema = self.schema;
        schema.validate()?;
        Ok(schema)
    }
}

/// Schema for a single column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeriesSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtype: Option<DTypeRequirement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexRule>,
}

impl SeriesSchema {
    #[must_use]
    pub fn builder() -> SeriesSchemaBuilder {
        SeriesSchemaBuilder::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let schema: Self = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A series shape is one-dimensional
    pub fn validate(&self) -> Result<()> {
        require_rank(self.shape.as_ref(), 1, "Series")
    }

    /// Compile into one validator; fails if the `arrow` feature is disabled
    pub fn compile<S>(&self) -> Result<Validator<S>>
    where
        S: Series + ?Sized + 'static,
    {
        let series = SeriesValidators::init()?;
        let mut checks = Vec::new();
        if let Some(name) = &self.name {
            checks.push(series.name(name.clone()));
        }
        if let Some(shape) = &self.shape {
            checks.push(series.shape(shape.clone()));
        }
        if let Some(dtype) = &self.dtype {
            checks.push(series.dtype(dtype.clone()));
        }
        if let Some(index) = &self.index {
            checks.push(series.index(index.required.clone(), index.allow_extra));
        }
        Ok(bundle_checks("series", checks))
    }
}

/// Builder for `SeriesSchema`
#[derive(Debug, Default)]
pub struct SeriesSchemaBuilder {
    schema: SeriesSchema,
}

impl SeriesSchemaBuilder {
    #[must_use]
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.schema.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn shape(mut self, shape: ShapeSpec) -> Self {
        self.schema.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn dtype<D: Into<DTypeRequirement>>(mut self, dtype: D) -> Self {
        self.schema.dtype = Some(dtype.into());
        self
    }

    #[must_use]
    pub fn index(mut self, index: IndexRule) -> Self {
        self.schema.index = Some(index);
        self
    }

    pub fn build(self) -> Result<SeriesSchema> {
        let schema = self.schema;
        schema.validate()?;
        Ok(schema)
    }
}

/// Schema for dataframes
///
/// `other_columns` governs columns missing from `columns`. When `columns` is
/// empty and only per-column `series` schemas are given, it governs columns
/// missing from `series` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeSpec>,
    /// Required columns and their types
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub columns: BTreeMap<String, DTypeRequirement>,
    pub other_columns: OtherColumns,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexRule>,
    /// Nested checks run against individual columns
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub series: BTreeMap<String, SeriesSchema>,
}

impl FrameSchema {
    #[must_use]
    pub fn builder() -> FrameSchemaBuilder {
        FrameSchemaBuilder::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let schema: Self = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A frame shape is `(rows, columns)`; nested series schemas must be valid
    pub fn validate(&self) -> Result<()> {
        require_rank(self.shape.as_ref(), 2, "Frame")?;
        for schema in self.series.values() {
            schema.validate()?;
        }
        Ok(())
    }

    /// Compile into one validator; fails if the `arrow` feature is disabled
    pub fn compile<F>(&self) -> Result<Validator<F>>
    where
        F: Tabular + ?Sized + 'static,
    {
        let frames = FrameValidators::init()?;
        let mut checks = Vec::new();
        if let Some(shape) = &self.shape {
            checks.push(frames.shape(shape.clone()));
        }
        if !self.columns.is_empty() {
            checks.push(frames.dtype(self.columns.clone(), self.other_columns.clone()));
        }
        if let Some(index) = &self.index {
            checks.push(frames.index(index.required.clone(), index.allow_extra));
        }
        if !self.series.is_empty() {
            let nested = self
                .series
                .iter()
                .map(|(name, schema)| Ok((name.clone(), schema.compile::<ColumnView>()?)))
                .collect::<Result<Vec<_>>>()?;
            let policy = if self.columns.is_empty() {
                self.other_columns.clone()
            } else {
                OtherColumns::allow_any()
            };
            checks.push(frames.columns(nested, policy));
        }
        Ok(bundle_checks("frame", checks))
    }
}

/// Builder for `FrameSchema`
#[derive(Debug, Default)]
pub struct FrameSchemaBuilder {
    schema: FrameSchema,
}

impl FrameSchemaBuilder {
    #[must_use]
    pub fn shape(mut self, shape: ShapeSpec) -> Self {
        self.schema.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn column<S, D>(mut self, name: S, dtype: D) -> Self
    where
        S: Into<String>,
        D: Into<DTypeRequirement>,
    {
        self.schema.columns.insert(name.into(), dtype.into());
        self
    }

    #[must_use]
    pub fn other_columns(mut self, policy: OtherColumns) -> Self {
        self.schema.other_columns = policy;
        self
    }

    #[must_use]
    pub fn index(mut self, index: IndexRule) -> Self {
        self.schema.index = Some(index);
        self
    }

    #[must_use]
    pub fn series<S: Into<String>>(mut self, name: S, schema: SeriesSchema) -> Self {
        self.schema.series.insert(name.into(), schema);
        self
    }

    pub fn build(self) -> Result<FrameSchema> {
        let schema = self.schema;
        schema.validate()?;
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{LogicalType, ScalarType};

    #[test]
    fn test_array_schema_from_json() {
        let schema =
            ArraySchema::from_json(r#"{ "shape": [3, [1, 10], "x", "x", null], "dtype": ["<f4", "float32"] }"#)
                .unwrap();
        assert_eq!(schema.shape.as_ref().unwrap().to_string(), "(3, 1..=10, x, x, _)");
        assert_eq!(schema.dtype.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_bad_json_is_a_schema_error() {
        let err = ArraySchema::from_json(r#"{ "shape": [0] }"#).unwrap_err();
        assert!(matches!(err, ValidatorError::Schema(_)));

        let err = ArraySchema::from_json(r#"{ "shape": [3], "unknown": 1 }"#).unwrap_err();
        assert!(matches!(err, ValidatorError::Schema(_)));
    }

    #[test]
    fn test_tensor_schema_validation() {
        assert!(TensorSchema::builder().match_index(true).build().is_err());
        let schema = TensorSchema::builder()
            .device(Device::cuda(0))
            .match_index(true)
            .dtype(ScalarType::Float16)
            .build()
            .unwrap();
        let json = schema.to_json().unwrap();
        assert!(json.contains("\"cuda:0\""));
        assert_eq!(TensorSchema::from_json(&json).unwrap(), schema);
    }

    #[test]
    fn test_series_schema_rank() {
        let err = SeriesSchema::builder()
            .shape("(2, 2)".parse().unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidConstraint(_)));
        assert!(SeriesSchema::builder().shape("(n,)".parse().unwrap()).build().is_ok());
    }

    #[test]
    fn test_frame_schema_json_round_trip() {
        let json = r#"{
            "shape": ["rows", 3],
            "columns": { "id": "arrow:int64", "price": ["arrow:float64", "arrow:float32"] },
            "other_columns": { "allow": "any" },
            "index": { "required": ["0"] },
            "series": { "id": { "dtype": "arrow:int64" } }
        }"#;
        let schema = FrameSchema::from_json(json).unwrap();
        assert_eq!(schema.columns.len(), 2);
        assert_eq!(schema.other_columns, OtherColumns::allow_any());
        assert!(schema.index.as_ref().unwrap().allow_extra);

        let again = FrameSchema::from_json(&schema.to_json().unwrap()).unwrap();
        assert_eq!(again, schema);
    }

    #[test]
    fn test_frame_schema_builder() {
        let schema = FrameSchema::builder()
            .column("id", LogicalType::Int64)
            .column("note", DTypeRequirement::Any)
            .index(IndexRule::new(["a"]).exact())
            .build()
            .unwrap();
        assert_eq!(schema.other_columns, OtherColumns::Forbid);
        assert!(!schema.index.unwrap().allow_extra);

        assert!(FrameSchema::builder()
            .shape("(n,)".parse().unwrap())
            .build()
            .is_err());
    }

    #[cfg(feature = "arrow")]
    #[test]
    fn test_empty_schema_compiles_to_passing_validator() {
        let validator = SeriesSchema::default().compile::<ColumnView>().unwrap();
        let column = ColumnView::new(None, LogicalType::Null, 0);
        assert!(validator.check(&column).is_ok());
    }
}
