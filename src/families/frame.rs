//! Dataframe validators

use crate::capability::{self, Family};
use crate::columns::{find_index_errors, reconcile_columns, OtherColumns};
use crate::dtype::{DTypeRequirement, TypeDescriptor};
use crate::error::Result;
use crate::shape::ShapeSpec;
use crate::types::{ColumnView, Tabular};
use crate::validator::Validator;
use std::collections::{BTreeMap, BTreeSet};

pub const SHAPE_ERROR: &str = "frame_shape_error";
pub const DTYPE_ERROR: &str = "frame_dtype_error";
pub const COLUMN_ERROR: &str = "frame_column_error";
pub const INDEX_ERROR: &str = "frame_index_error";

const NESTED_INDENT: &str = "\n        ";

/// A frame has the two-dimensional shape `(rows, columns)`
pub fn frame_dims<F: Tabular + ?Sized>(frame: &F) -> [usize; 2] {
    [frame.num_rows(), frame.column_types().len()]
}

pub fn find_shape_errors<F: Tabular + ?Sized>(frame: &F, spec: &ShapeSpec) -> Vec<String> {
    spec.find_errors(&frame_dims(frame))
}

pub fn find_dtype_errors<F: Tabular + ?Sized>(
    frame: &F,
    required: &BTreeMap<String, DTypeRequirement>,
    other_columns: &OtherColumns,
) -> Vec<String> {
    reconcile_columns(&observed_columns(frame), required, other_columns)
}

pub fn find_frame_index_errors<F: Tabular + ?Sized>(
    frame: &F,
    required: &BTreeSet<String>,
    allow_extra: bool,
) -> Vec<String> {
    find_index_errors(&frame.index_labels(), required, allow_extra)
}

/// Run a nested validator per column
///
/// Missing and extra columns are reported as in [`find_dtype_errors`], with no
/// type constraint of their own. Each column that is present and has a
/// validator contributes one `Column -> name:` entry when its validator fails.
pub fn find_column_errors<F: Tabular + ?Sized>(
    frame: &F,
    validators: &BTreeMap<String, Validator<ColumnView>>,
    other_columns: &OtherColumns,
) -> Vec<String> {
    let required = validators
        .keys()
        .map(|name| (name.clone(), DTypeRequirement::Any))
        .collect::<BTreeMap<_, _>>();
    let mut errors = reconcile_columns(&observed_columns(frame), &required, other_columns);

    for (name, validator) in validators {
        let Some(column) = frame.column(name) else {
            continue;
        };
        if let Err(err) = validator.check(&column) {
            let nested = err.to_string().lines().collect::<Vec<_>>().join(NESTED_INDENT);
            errors.push(format!("Column -> {}:{}{}", name, NESTED_INDENT, nested));
        }
    }
    errors
}

fn observed_columns<F: Tabular + ?Sized>(frame: &F) -> BTreeMap<String, TypeDescriptor> {
    frame.column_types().into_iter().collect()
}

/// Factory for frame validators, available when the `arrow` feature is enabled
#[derive(Debug, Clone, Copy)]
pub struct FrameValidators {
    _private: (),
}

impl FrameValidators {
    pub fn init() -> Result<Self> {
        capability::require(Family::Columnar)?;
        Ok(Self { _private: () })
    }

    pub fn shape<F: Tabular + ?Sized + 'static>(&self, spec: ShapeSpec) -> Validator<F> {
        Validator::from_finder(SHAPE_ERROR, move |frame: &F| find_shape_errors(frame, &spec))
    }

    pub fn dtype<F, I, K, D>(&self, columns: I, other_columns: OtherColumns) -> Validator<F>
    where
        F: Tabular + ?Sized + 'static,
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: Into<DTypeRequirement>,
    {
        let required = columns
            .into_iter()
            .map(|(name, requirement)| (name.into(), requirement.into()))
            .collect::<BTreeMap<_, _>>();
        Validator::from_finder(DTYPE_ERROR, move |frame: &F| {
            find_dtype_errors(frame, &required, &other_columns)
        })
    }

    pub fn index<F, I>(&self, required: I, allow_extra: bool) -> Validator<F>
    where
        F: Tabular + ?Sized + 'static,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let required = required.into_iter().map(Into::into).collect::<BTreeSet<_>>();
        Validator::from_finder(INDEX_ERROR, move |frame: &F| {
            find_frame_index_errors(frame, &required, allow_extra)
        })
    }

    pub fn columns<F, I, K>(&self, columns: I, other_columns: OtherColumns) -> Validator<F>
    where
        F: Tabular + ?Sized + 'static,
        I: IntoIterator<Item = (K, Validator<ColumnView>)>,
        K: Into<String>,
    {
        let validators = columns
            .into_iter()
            .map(|(name, validator)| (name.into(), validator))
            .collect::<BTreeMap<_, _>>();
        Validator::from_finder(COLUMN_ERROR, move |frame: &F| {
            find_column_errors(frame, &validators, &other_columns)
        })
    }
}
