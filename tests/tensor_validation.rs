//! Tensor validation against tract tensors and device-placed stand-ins
#![cfg(feature = "tract")]

mod common;

use common::TestTensor;
use ds_validator::{Device, Result, ScalarType, TensorSchema, TensorValidators, Validator};
use tract_core::prelude::Tensor;

#[test]
fn test_tract_tensor_schema() -> Result<()> {
    let schema = TensorSchema::builder()
        .shape("(1, 3, h, w)".parse()?)
        .dtype([ScalarType::Float32, ScalarType::Float16])
        .device(Device::cpu())
        .build()?;
    let validator = schema.compile::<Tensor>()?;

    let input = Tensor::zero::<f32>(&[1, 3, 224, 224]).unwrap();
    assert!(validator.check(&input).is_ok());

    let wrong = Tensor::zero::<i64>(&[2, 3, 224, 224]).unwrap();
    let err = validator.check(&wrong).unwrap_err();
    assert_eq!(err.kind(), "bundled_validation_error");
    assert_eq!(err.validation_errors().len(), 2);
    Ok(())
}

#[test]
fn test_tensor_dtype_is_exact() -> Result<()> {
    let tensors = TensorValidators::init()?;
    let floating: Validator<Tensor> = tensors.dtype(ScalarType::Floating);

    let err = floating.check(&Tensor::zero::<f32>(&[2]).unwrap()).unwrap_err();
    assert_eq!(
        err.validation_errors(),
        vec!["Tensor dtype `float32` doesn't match any of the required data types: {floating}."]
    );
    Ok(())
}

#[test]
fn test_device_placement() -> Result<()> {
    let tensors = TensorValidators::init()?;
    let any_gpu: Validator<TestTensor> = tensors.device(Device::cuda(0), false);
    let first_gpu: Validator<TestTensor> = tensors.device(Device::cuda(0), true);

    let on_second = TestTensor::new(&[4], ScalarType::Float32, "cuda:1");
    assert!(any_gpu.check(&on_second).is_ok());

    let err = first_gpu.check(&on_second).unwrap_err();
    assert_eq!(err.kind(), "tensor_device_error");
    assert_eq!(
        err.validation_errors(),
        vec!["Tensor device index `1` does not match required device index: 0."]
    );

    let on_cpu = TestTensor::new(&[4], ScalarType::Float32, "cpu");
    assert_eq!(any_gpu.check(&on_cpu).unwrap_err().validation_errors().len(), 1);
    Ok(())
}

#[test]
fn test_tensor_schema_json() -> Result<()> {
    let schema = TensorSchema::from_json(
        r#"{ "shape": ["batch", 10], "dtype": ["int64"], "device": "mps" }"#,
    )?;
    let validator = schema.compile::<TestTensor>()?;

    assert!(validator
        .check(&TestTensor::new(&[7, 10], ScalarType::Int64, "mps"))
        .is_ok());
    let err = validator
        .check(&TestTensor::new(&[7, 10], ScalarType::Int32, "cpu"))
        .unwrap_err();
    let kinds = match &err {
        ds_validator::ValidatorError::Bundled { errors } => {
            errors.iter().map(|e| e.kind()).collect::<Vec<_>>()
        },
        other => panic!("expected a bundle, got {:?}", other),
    };
    assert_eq!(kinds, vec!["tensor_dtype_error", "tensor_device_error"]);
    Ok(())
}
