//! `tract-core` adapter
//!
//! Tract runs on the CPU only, so every tensor reports the `cpu` device.

use crate::dtype::{ScalarType, TypeDescriptor};
use crate::types::{Device, Placed, Shaped, Typed};
use tract_core::prelude::{DatumType, Tensor};

/// Scalar type for a tract datum type
///
/// Quantized types report their storage type. Types without a scalar
/// counterpart (symbolic dims, complex numbers) report `object`.
pub fn scalar_type_of(datum_type: DatumType) -> ScalarType {
    match datum_type {
        DatumType::Bool => ScalarType::Bool,
        DatumType::I8 | DatumType::QI8(_) => ScalarType::Int8,
        DatumType::I16 => ScalarType::Int16,
        DatumType::I32 | DatumType::QI32(_) => ScalarType::Int32,
        DatumType::I64 => ScalarType::Int64,
        DatumType::U8 | DatumType::QU8(_) => ScalarType::UInt8,
        DatumType::U16 => ScalarType::UInt16,
        DatumType::U32 => ScalarType::UInt32,
        DatumType::U64 => ScalarType::UInt64,
        DatumType::F16 => ScalarType::Float16,
        DatumType::F32 => ScalarType::Float32,
        DatumType::F64 => ScalarType::Float64,
        DatumType::String => ScalarType::Str,
        DatumType::Blob => ScalarType::Bytes,
        _ => ScalarType::Object,
    }
}

impl Shaped for Tensor {
    fn dims(&self) -> Vec<usize> {
        self.shape().to_vec()
    }
}

impl Typed for Tensor {
    fn dtype(&self) -> TypeDescriptor {
        scalar_type_of(self.datum_type()).into()
    }
}

impl Placed for Tensor {
    fn device(&self) -> Device {
        Device::cpu()
    }
}
