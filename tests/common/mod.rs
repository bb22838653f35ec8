//! Shared fixtures for integration tests
#![allow(dead_code)]

use ds_validator::{ColumnView, DTypeRequirement, Device, Placed, Shaped, Tabular, TypeDescriptor, Typed};

/// In-memory frame with an explicit row index
#[derive(Debug, Clone)]
pub struct TestFrame {
    pub index: Vec<String>,
    pub columns: Vec<(String, TypeDescriptor)>,
}

impl TestFrame {
    pub fn new(rows: usize) -> Self {
        Self {
            index: (0..rows).map(|i| format!("row{}", i)).collect(),
            columns: Vec::new(),
        }
    }

    pub fn with_column<T: Into<TypeDescriptor>>(mut self, name: &str, dtype: T) -> Self {
        self.columns.push((name.to_string(), dtype.into()));
        self
    }
}

impl Tabular for TestFrame {
    fn num_rows(&self) -> usize {
        self.index.len()
    }

    fn column_types(&self) -> Vec<(String, TypeDescriptor)> {
        self.columns.clone()
    }

    fn column(&self, name: &str) -> Option<ColumnView> {
        self.columns.iter().find(|(n, _)| n == name).map(|(n, t)| {
            ColumnView::new(Some(n.clone()), t.clone(), self.index.len()).with_index(self.index.clone())
        })
    }

    fn index_labels(&self) -> Vec<String> {
        self.index.clone()
    }
}

/// Tensor stand-in that can live on any device
#[derive(Debug, Clone)]
pub struct TestTensor {
    pub dims: Vec<usize>,
    pub dtype: TypeDescriptor,
    pub device: Device,
}

impl TestTensor {
    pub fn new<T: Into<TypeDescriptor>>(dims: &[usize], dtype: T, device: &str) -> Self {
        Self {
            dims: dims.to_vec(),
            dtype: dtype.into(),
            device: device.parse().unwrap(),
        }
    }
}

impl Shaped for TestTensor {
    fn dims(&self) -> Vec<usize> {
        self.dims.clone()
    }
}

impl Typed for TestTensor {
    fn dtype(&self) -> TypeDescriptor {
        self.dtype.clone()
    }
}

impl Placed for TestTensor {
    fn device(&self) -> Device {
        self.device.clone()
    }
}

pub fn any() -> DTypeRequirement {
    DTypeRequirement::Any
}
