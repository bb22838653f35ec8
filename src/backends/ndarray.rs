//! `ndarray` adapter

use crate::dtype::{ScalarType, TypeDescriptor};
use crate::types::{Shaped, Typed};
use ndarray::{ArrayBase, Data, Dimension};

/// Rust element types with a known scalar type
pub trait Element {
    const SCALAR_TYPE: ScalarType;
}

macro_rules! impl_element {
    ($($ty:ty => $scalar:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const SCALAR_TYPE: ScalarType = ScalarType::$scalar;
            }
        )*
    };
}

impl_element! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    String => Str,
}

impl<S, D> Shaped for ArrayBase<S, D>
where
    S: Data,
    D: Dimension,
{
    fn dims(&self) -> Vec<usize> {
        self.shape().to_vec()
    }
}

impl<A, S, D> Typed for ArrayBase<S, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn dtype(&self) -> TypeDescriptor {
        A::SCALAR_TYPE.into()
    }
}
