//! Validating arrow record batches against a frame schema
//!
//! Run with `cargo run --example frame_schema`.

use anyhow::Result;
use arrow_array::{ArrayRef, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use ds_validator::{DTypeSet, FrameSchema, IndexRule, LogicalType, OtherColumns, SeriesSchema};
use std::sync::Arc;

fn trades(with_venue: bool) -> Result<RecordBatch> {
    let mut fields = vec![
        Field::new("trade_id", DataType::Int64, false),
        Field::new("symbol", DataType::Utf8, false),
        Field::new("price", DataType::Float64, true),
    ];
    let mut columns = vec![
        Arc::new(Int64Array::from(vec![10, 11, 12])) as ArrayRef,
        Arc::new(StringArray::from(vec!["ABC", "XYZ", "ABC"])) as ArrayRef,
        Arc::new(Float64Array::from(vec![101.5, 99.25, 101.75])) as ArrayRef,
    ];
    if with_venue {
        fields.push(Field::new("venue", DataType::Int64, true));
        columns.push(Arc::new(Int64Array::from(vec![1, 2, 1])) as ArrayRef);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn main() -> Result<()> {
    #[cfg(feature = "tracing-init")]
    ds_validator::TracingConfig::new().with_verbosity(2).init()?;

    println!("Frame schema validation");
    println!("=======================");

    let schema = FrameSchema::builder()
        .shape("(rows, 3)".parse()?)
        .column("trade_id", LogicalType::Int64)
        .column("symbol", DTypeSet::from([LogicalType::Utf8, LogicalType::LargeUtf8]))
        .column("price", LogicalType::Float64)
        .other_columns(OtherColumns::Forbid)
        .index(IndexRule::new(["0"]))
        .build()?;
    println!("\nSchema:\n{}", schema.to_json()?);

    let validator = schema.compile::<RecordBatch>()?;

    let batch = validator.validate(trades(false)?)?;
    println!("\nAccepted batch with {} rows", batch.num_rows());

    match validator.check(&trades(true)?) {
        Ok(()) => println!("Batch with a venue column unexpectedly passed"),
        Err(e) => println!("\nBatch with a venue column rejected:\n{}", e),
    }

    // Per-column checks go through series schemas
    let symbols = FrameSchema::builder()
        .series("symbol", SeriesSchema::builder().shape("(1..=2)".parse()?).build()?)
        .other_columns(OtherColumns::allow_any())
        .build()?
        .compile::<RecordBatch>()?;
    if let Err(e) = symbols.check(&trades(false)?) {
        println!("\nNested series check failed:\n{}", e);
    }

    Ok(())
}
