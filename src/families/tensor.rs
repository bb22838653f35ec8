//! Tensor validators
//!
//! Tensor dtypes form a flat set: `int32` does not satisfy an `integer`
//! requirement here, only an exact `int32` entry does.

use crate::capability::{self, Family};
use crate::dtype::DTypeSet;
use crate::error::Result;
use crate::shape::ShapeSpec;
use crate::types::{Device, Placed, Shaped, Typed};
use crate::validator::Validator;

pub const SHAPE_ERROR: &str = "tensor_shape_error";
pub const DTYPE_ERROR: &str = "tensor_dtype_error";
pub const DEVICE_ERROR: &str = "tensor_device_error";

pub fn find_shape_errors<T: Shaped + ?Sized>(tensor: &T, spec: &ShapeSpec) -> Vec<String> {
    spec.find_errors(&tensor.dims())
}

pub fn find_dtype_errors<T: Typed + ?Sized>(tensor: &T, required: &DTypeSet) -> Vec<String> {
    let dtype = tensor.dtype();
    if required.contains(&dtype) {
        Vec::new()
    } else {
        vec![format!(
            "Tensor dtype `{}` doesn't match any of the required data types: {}.",
            dtype, required
        )]
    }
}

/// Device kind must match; the ordinal is only compared when `match_index` is set
pub fn find_device_errors<T: Placed + ?Sized>(
    tensor: &T,
    device: &Device,
    match_index: bool,
) -> Vec<String> {
    let actual = tensor.device();
    let mut errors = Vec::new();
    if actual.kind != device.kind {
        errors.push(format!(
            "Tensor device ({}) does not match required device type: {}.",
            actual.kind, device.kind
        ));
    }
    if match_index && actual.index != device.index {
        errors.push(format!(
            "Tensor device index `{}` does not match required device index: {}.",
            display_index(actual.index),
            display_index(device.index)
        ));
    }
    errors
}

fn display_index(index: Option<usize>) -> String {
    index.map_or_else(|| "none".to_string(), |i| i.to_string())
}

/// Factory for tensor validators, available when the `tract` feature is enabled
#[derive(Debug, Clone, Copy)]
pub struct TensorValidators {
    _private: (),
}

impl TensorValidators {
    pub fn init() -> Result<Self> {
        capability::require(Family::Tensor)?;
        Ok(Self { _private: () })
    }

    pub fn shape<T: Shaped + ?Sized + 'static>(&self, spec: ShapeSpec) -> Validator<T> {
        Validator::from_finder(SHAPE_ERROR, move |tensor: &T| find_shape_errors(tensor, &spec))
    }

    pub fn dtype<T, D>(&self, required: D) -> Validator<T>
    where
        T: Typed + ?Sized + 'static,
        D: Into<DTypeSet>,
    {
        let required = required.into();
        Validator::from_finder(DTYPE_ERROR, move |tensor: &T| find_dtype_errors(tensor, &required))
    }

    pub fn device<T: Placed + ?Sized + 'static>(&self, device: Device, match_index: bool) -> Validator<T> {
        Validator::from_finder(DEVICE_ERROR, move |tensor: &T| {
            find_device_errors(tensor, &device, match_index)
        })
    }
}
