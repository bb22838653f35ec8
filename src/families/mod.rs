//! Family-specific validator factories
//!
//! Each factory is obtained through a fallible `init()` that probes for the
//! family's backing library. Every validator a factory hands out is built from
//! a free error-finder function in the same module, so the finders can also be
//! called directly.

pub mod array;
pub mod frame;
pub mod series;
pub mod tensor;

pub use array::ArrayValidators;
pub use frame::FrameValidators;
pub use series::SeriesValidators;
pub use tensor::TensorValidators;
