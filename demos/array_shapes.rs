//! Validating `ndarray` inputs with shape variables, ranges and dtype sets
//!
//! Run with `cargo run --example array_shapes`. Enable `tracing-init` to see
//! the validation spans as well.

use anyhow::Result;
use ds_validator::{ArraySchema, ArrayValidators, ScalarType, Validator};
use ndarray::{Array2, Array3, Array4};

fn main() -> Result<()> {
    #[cfg(feature = "tracing-init")]
    ds_validator::TracingConfig::new().with_verbosity(2).init()?;

    println!("Array shape validation");
    println!("======================");

    // A batch of square RGB images in channel-first layout
    let arrays = ArrayValidators::init()?;
    let images: Validator<Array4<f32>> = Validator::bundle([
        arrays.shape("(batch, 3, side, side)".parse()?),
        arrays.dtype(ScalarType::Floating),
    ]);

    let good = Array4::<f32>::zeros((4, 3, 64, 64));
    println!("\n(4, 3, 64, 64) float32 -> valid: {}", images.is_valid(&good));

    let bad = Array4::<f32>::zeros((4, 1, 64, 32));
    match images.check(&bad) {
        Ok(()) => println!("(4, 1, 64, 32) unexpectedly passed"),
        Err(e) => println!("\n(4, 1, 64, 32) float32 rejected:\n{}", e),
    }

    // The same kind of constraints, loaded from JSON
    let schema = ArraySchema::from_json(
        r#"{ "shape": ["h", "w", [1, 4]], "dtype": ["uint8", "uint16"] }"#,
    )?;
    println!("\nSchema from JSON:\n{}", schema.to_json()?);

    let pixels = schema.compile::<Array3<u8>>()?;
    let rgba = pixels.validate(Array3::<u8>::zeros((480, 640, 4)))?;
    println!("\nAccepted a {:?} pixel buffer", rgba.shape());

    let integers = schema.compile::<Array2<i64>>()?;
    if let Err(e) = integers.check(&Array2::<i64>::zeros((2, 2))) {
        println!("\nRank 2 int64 array rejected:\n{}", e);
    }

    Ok(())
}
