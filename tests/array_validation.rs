//! Array validation against real `ndarray` arrays
#![cfg(feature = "ndarray")]

use ds_validator::{
    ArraySchema, ArrayValidators, DTypeSet, Dim, Result, ScalarType, ShapeSpec, Validator,
    ValidatorError,
};
use ndarray::{Array1, Array2, Array3, Array4, ArrayD, IxDyn};

#[test]
fn test_image_batch_shape() -> Result<()> {
    let arrays = ArrayValidators::init()?;
    let batch: Validator<Array4<f32>> = arrays.shape("(n, 3, side, side)".parse()?);

    assert!(batch.check(&Array4::zeros((2, 3, 32, 32))).is_ok());

    let err = batch.check(&Array4::zeros((2, 4, 32, 16))).unwrap_err();
    assert_eq!(err.kind(), "array_shape_error");
    assert_eq!(
        err.validation_errors(),
        vec![
            "Dimension 1 size (4) does not equal required length: 3.",
            "Dimension 3 size (16) does not match set variable: 'side' = 32.",
        ]
    );
    Ok(())
}

#[test]
fn test_rank_mismatch_still_compares_aligned_dims() -> Result<()> {
    let arrays = ArrayValidators::init()?;
    let validator: Validator<ArrayD<u8>> = arrays.shape("(2, 1..=4)".parse()?);

    let err = validator.check(&ArrayD::zeros(IxDyn(&[3, 9, 1]))).unwrap_err();
    assert_eq!(
        err.validation_errors(),
        vec![
            "Object dimensions (3) do not match required dimensions: 2.",
            "Dimension 0 size (3) does not equal required length: 2.",
            "Dimension 1 size (9) is not in required range: 1..=4.",
        ]
    );
    Ok(())
}

#[test]
fn test_dtype_hierarchy_on_real_arrays() -> Result<()> {
    let arrays = ArrayValidators::init()?;
    let integers: Validator<Array1<i32>> = arrays.dtype(ScalarType::Integer);
    let floats: Validator<Array1<f64>> = arrays.dtype(ScalarType::Integer);

    assert!(integers.check(&Array1::zeros(3)).is_ok());
    let err = floats.check(&Array1::zeros(3)).unwrap_err();
    assert_eq!(err.kind(), "array_dtype_error");
    assert!(err.to_string().contains("`float64`"));
    Ok(())
}

#[test]
fn test_bundle_reports_shape_and_dtype() -> Result<()> {
    let arrays = ArrayValidators::init()?;
    let validator = Validator::<Array2<u16>>::bundle([
        arrays.shape("(2, 2)".parse()?),
        arrays.dtype(DTypeSet::parse(["floating", "complexfloating"])?),
    ]);

    let err = validator.check(&Array2::zeros((3, 2))).unwrap_err();
    assert_eq!(err.kind(), "bundled_validation_error");
    assert_eq!(err.validation_errors().len(), 2);

    let text = err.to_string();
    assert!(text.starts_with("bundled_validation_error:\n  array_shape_error:\n      - "));
    assert!(text.contains("\n  array_dtype_error:\n      - Array dtype `uint16`"));
    Ok(())
}

#[test]
fn test_validate_passes_value_through_and_is_repeatable() -> Result<()> {
    let schema = ArraySchema::builder()
        .shape(ShapeSpec::new(vec![Dim::var("x")?, Dim::var("x")?])?)
        .dtype(ScalarType::Number)
        .build()?;
    let validator = schema.compile::<Array2<f64>>()?;

    let square = Array2::from_elem((4, 4), 1.5);
    let square = validator.validate(square)?;
    assert_eq!(square[[3, 3]], 1.5);

    // Bindings never leak between calls
    assert!(validator.check(&Array2::zeros((2, 2))).is_ok());
    assert!(validator.check(&Array2::zeros((2, 3))).is_err());
    assert!(validator.check(&Array2::zeros((2, 3))).is_err());
    Ok(())
}

#[test]
fn test_schema_from_json_compiles() -> Result<()> {
    let schema = ArraySchema::from_json(r#"{ "shape": [null, [1, 3]], "dtype": ["<u1"] }"#)?;
    let validator = schema.compile::<Array2<u8>>()?;
    assert!(validator.check(&Array2::zeros((100, 3))).is_ok());

    match validator.check(&Array2::zeros((1, 4))) {
        Err(ValidatorError::Validation { kind, errors }) => {
            assert_eq!(kind, "array_shape_error");
            assert_eq!(errors.len(), 1);
        },
        other => panic!("unexpected result: {:?}", other),
    }
    Ok(())
}

#[test]
fn test_channel_last_image() -> Result<()> {
    let arrays = ArrayValidators::init()?;
    let validator: Validator<Array3<f32>> = arrays.shape("(_, _, 3)".parse()?);
    let image = Array3::<f32>::zeros((8, 8, 3));
    assert!(validator.is_valid(&image));
    Ok(())
}
