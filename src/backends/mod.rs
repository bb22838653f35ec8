//! Adapters from concrete data libraries to the input traits
//!
//! - ndarray backend: `Shaped` and `Typed` for every `ArrayBase`
//! - Tract backend: `Shaped`, `Typed` and `Placed` for `tract_core` tensors
//! - Arrow backend: `Tabular` for record batches and `Series` for arrow columns

#[cfg(feature = "ndarray")]
pub mod ndarray;

#[cfg(feature = "tract")]
pub mod tract;

#[cfg(feature = "arrow")]
pub mod arrow;

#[cfg(feature = "ndarray")]
pub use self::ndarray::Element;

#[cfg(feature = "tract")]
pub use self::tract::scalar_type_of;

#[cfg(feature = "arrow")]
pub use self::arrow::ArrowColumn;
