//! n-dimensional array validators

use crate::capability::{self, Family};
use crate::dtype::DTypeSet;
use crate::error::Result;
use crate::shape::ShapeSpec;
use crate::types::{Shaped, Typed};
use crate::validator::Validator;

pub const SHAPE_ERROR: &str = "array_shape_error";
pub const DTYPE_ERROR: &str = "array_dtype_error";

pub fn find_shape_errors<A: Shaped + ?Sized>(array: &A, spec: &ShapeSpec) -> Vec<String> {
    spec.find_errors(&array.dims())
}

/// Hierarchy-aware dtype check: an `int32` array satisfies `integer`
pub fn find_dtype_errors<A: Typed + ?Sized>(array: &A, required: &DTypeSet) -> Vec<String> {
    let dtype = array.dtype();
    if required.accepts(&dtype) {
        Vec::new()
    } else {
        vec![format!(
            "Array dtype `{}` is not compatible with any of the required types: {}.",
            dtype, required
        )]
    }
}

/// Factory for array validators, available when the `ndarray` feature is enabled
#[derive(Debug, Clone, Copy)]
pub struct ArrayValidators {
    _private: (),
}

impl ArrayValidators {
    pub fn init() -> Result<Self> {
        capability::require(Family::NdArray)?;
        Ok(Self { _private: () })
    }

    pub fn shape<A: Shaped + ?Sized + 'static>(&self, spec: ShapeSpec) -> Validator<A> {
        Validator::from_finder(SHAPE_ERROR, move |array: &A| find_shape_errors(array, &spec))
    }

    pub fn dtype<A, D>(&self, required: D) -> Validator<A>
    where
        A: Typed + ?Sized + 'static,
        D: Into<DTypeSet>,
    {
        let required = required.into();
        Validator::from_finder(DTYPE_ERROR, move |array: &A| find_dtype_errors(array, &required))
    }
}
