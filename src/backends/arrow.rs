//! Arrow adapter
//!
//! Arrow data is described with logical types, which only match by equality.
//! Record batches carry no row index, so index labels are positional.

use crate::dtype::{LogicalType, TimeUnit, TypeDescriptor};
use crate::types::{ColumnView, Series, Shaped, Tabular};
use arrow_array::{Array, ArrayRef, RecordBatch};
use arrow_schema::{DataType, TimeUnit as ArrowTimeUnit};

impl From<ArrowTimeUnit> for TimeUnit {
    fn from(unit: ArrowTimeUnit) -> Self {
        match unit {
            ArrowTimeUnit::Second => Self::Second,
            ArrowTimeUnit::Millisecond => Self::Millisecond,
            ArrowTimeUnit::Microsecond => Self::Microsecond,
            ArrowTimeUnit::Nanosecond => Self::Nanosecond,
        }
    }
}

impl From<&DataType> for LogicalType {
    fn from(data_type: &DataType) -> Self {
        match data_type {
            DataType::Null => Self::Null,
            DataType::Boolean => Self::Boolean,
            DataType::Int8 => Self::Int8,
            DataType::Int16 => Self::Int16,
            DataType::Int32 => Self::Int32,
            DataType::Int64 => Self::Int64,
            DataType::UInt8 => Self::UInt8,
            DataType::UInt16 => Self::UInt16,
            DataType::UInt32 => Self::UInt32,
            DataType::UInt64 => Self::UInt64,
            DataType::Float16 => Self::Float16,
            DataType::Float32 => Self::Float32,
            DataType::Float64 => Self::Float64,
            DataType::Utf8 => Self::Utf8,
            DataType::LargeUtf8 => Self::LargeUtf8,
            DataType::Binary => Self::Binary,
            DataType::LargeBinary => Self::LargeBinary,
            DataType::Date32 => Self::Date32,
            DataType::Date64 => Self::Date64,
            DataType::Timestamp(unit, tz) => {
                Self::Timestamp((*unit).into(), tz.as_ref().map(ToString::to_string))
            },
            DataType::Duration(unit) => Self::Duration((*unit).into()),
            DataType::Decimal128(precision, scale) => Self::Decimal128(*precision, *scale),
            other => Self::Other(other.to_string()),
        }
    }
}

fn descriptor(data_type: &DataType) -> TypeDescriptor {
    LogicalType::from(data_type).into()
}

/// A named arrow array, validated as a series
#[derive(Debug, Clone)]
pub struct ArrowColumn {
    name: Option<String>,
    array: ArrayRef,
}

impl ArrowColumn {
    pub fn new(name: Option<String>, array: ArrayRef) -> Self {
        Self { name, array }
    }

    /// Take a column out of a record batch by name
    pub fn from_batch(batch: &RecordBatch, name: &str) -> Option<Self> {
        batch
            .column_by_name(name)
            .map(|array| Self::new(Some(name.to_string()), ArrayRef::clone(array)))
    }

    pub fn array(&self) -> &ArrayRef {
        &self.array
    }
}

impl Series for ArrowColumn {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn dtype(&self) -> TypeDescriptor {
        descriptor(self.array.data_type())
    }

    fn len(&self) -> usize {
        self.array.len()
    }
}

impl From<&ArrowColumn> for ColumnView {
    fn from(column: &ArrowColumn) -> Self {
        ColumnView::new(column.name.clone(), column.dtype(), column.len())
    }
}

impl Tabular for RecordBatch {
    fn num_rows(&self) -> usize {
        RecordBatch::num_rows(self)
    }

    fn column_types(&self) -> Vec<(String, TypeDescriptor)> {
        self.schema()
            .fields()
            .iter()
            .map(|field| (field.name().clone(), descriptor(field.data_type())))
            .collect()
    }

    fn column(&self, name: &str) -> Option<ColumnView> {
        ArrowColumn::from_batch(self, name).map(|column| ColumnView::from(&column))
    }
}

impl Shaped for RecordBatch {
    fn dims(&self) -> Vec<usize> {
        vec![RecordBatch::num_rows(self), self.num_columns()]
    }
}
