#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # ds-validator
//!
//! Shape and dtype constraints for n-dimensional arrays, tensors and columnar data.
//!
//! The crate checks an object's shape against a specification with fixed sizes,
//! inclusive ranges, named variables and wildcards, and checks its element type
//! against a set of acceptable types. Numeric scalar types match through a
//! subtype hierarchy (`int32` satisfies `integer`); columnar logical types match
//! only by equality.
//!
//! ## Features
//!
//! - **Shape matching**: `(3, 1..=10, x, x, _)` style specifications with
//!   variables bound per call
//! - **Dtype resolution**: hierarchy-aware numeric types and exact Arrow logical types
//! - **Composable validators**: error-finders become validators, validators are
//!   bundled and report every failure together
//! - **Family factories**: array, tensor, series and frame validators, each gated
//!   on its backing library (`ndarray`, `tract`, `arrow` features)
//! - **Declarative schemas**: JSON or builder-defined schemas compiled to validators
//!
//! ## Quick Start
//!
//! ```rust
//! use ds_validator::{ArrayValidators, ScalarType, ShapeSpec, Validator};
//!
//! # fn main() -> ds_validator::Result<()> {
//! let arrays = ArrayValidators::init()?;
//! let spec: ShapeSpec = "(n, 3)".parse()?;
//! let validator: Validator<ndarray::Array2<f32>> =
//!     arrays.shape(spec).and(arrays.dtype(ScalarType::Floating));
//!
//! let points = ndarray::Array2::<f32>::zeros((10, 3));
//! let points = validator.validate(points)?;
//! assert_eq!(points.nrows(), 10);
//!
//! let err = validator.check(&ndarray::Array2::<f32>::zeros((10, 4))).unwrap_err();
//! assert_eq!(err.kind(), "array_shape_error");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error messages
//!
//! A failing check reports every problem it found:
//!
//! ```text
//! array_shape_error:
//!       - Object dimensions (3) do not match required dimensions: 2.
//!       - Dimension 1 size (4) does not equal required length: 3.
//! ```

pub mod backends;
pub mod capability;
pub mod columns;
pub mod dtype;
pub mod error;
pub mod families;
pub mod schema;
pub mod shape;
pub mod tracing_config;
pub mod types;
pub mod validator;

pub use capability::{list_capabilities, CapabilityInfo, Family};
pub use columns::{reconcile_columns, OtherColumns};
pub use dtype::{is_compatible, DTypeRequirement, DTypeSet, LogicalType, ScalarType, TypeDescriptor};
pub use error::{Result, ValidatorError};
pub use families::{ArrayValidators, FrameValidators, SeriesValidators, TensorValidators};
pub use schema::{ArraySchema, FrameSchema, IndexRule, SeriesSchema, TensorSchema};
pub use shape::{find_shape_errors, Dim, ShapeSpec};
pub use types::{ColumnView, Device, DeviceKind, Placed, Series, Shaped, Tabular, Typed};
pub use validator::{bundle, checker, Validator};

#[cfg(feature = "tracing-init")]
pub use tracing_config::init_library_tracing;
pub use tracing_config::{spans, TracingConfig, TracingFormat};
