//! Single-column validators

use crate::capability::{self, Family};
use crate::columns::find_index_errors;
use crate::dtype::{is_compatible, DTypeRequirement};
use crate::error::Result;
use crate::shape::ShapeSpec;
use crate::types::Series;
use crate::validator::Validator;
use std::collections::BTreeSet;

pub const SHAPE_ERROR: &str = "series_shape_error";
pub const DTYPE_ERROR: &str = "series_dtype_error";
pub const NAME_ERROR: &str = "series_name_error";
pub const INDEX_ERROR: &str = "series_index_error";

/// A series has the one-dimensional shape `(len,)`
pub fn find_shape_errors<S: Series + ?Sized>(series: &S, spec: &ShapeSpec) -> Vec<String> {
    spec.find_errors(&[series.len()])
}

pub fn find_dtype_errors<S: Series + ?Sized>(series: &S, required: &DTypeRequirement) -> Vec<String> {
    let dtype = series.dtype();
    if is_compatible(&dtype, required) {
        Vec::new()
    } else {
        vec![format!(
            "Series type `{}` is not compatible with any of the required types: {}.",
            dtype, required
        )]
    }
}

pub fn find_name_errors<S: Series + ?Sized>(series: &S, expected: &str) -> Vec<String> {
    match series.name() {
        Some(name) if name == expected => Vec::new(),
        actual => vec![format!(
            "Series name `{}` does not match the required name `{}`.",
            actual.unwrap_or("<unnamed>"),
            expected
        )],
    }
}

pub fn find_series_index_errors<S: Series + ?Sized>(
    series: &S,
    required: &BTreeSet<String>,
    allow_extra: bool,
) -> Vec<String> {
    find_index_errors(&series.index_labels(), required, allow_extra)
}

/// Factory for series validators, available when the `arrow` feature is enabled
#[derive(Debug, Clone, Copy)]
pub struct SeriesValidators {
    _private: (),
}

impl SeriesValidators {
    pub fn init() -> Result<Self> {
        capability::require(Family::Columnar)?;
        Ok(Self { _private: () })
    }

    pub fn shape<S: Series + ?Sized + 'static>(&self, spec: ShapeSpec) -> Validator<S> {
        Validator::from_finder(SHAPE_ERROR, move |series: &S| find_shape_errors(series, &spec))
    }

    pub fn dtype<S, D>(&self, required: D) -> Validator<S>
    where
        S: Series + ?Sized + 'static,
        D: Into<DTypeRequirement>,
    {
        let required = required.into();
        Validator::from_finder(DTYPE_ERROR, move |series: &S| find_dtype_errors(series, &required))
    }

    pub fn name<S: Series + ?Sized + 'static>(&self, expected: impl Into<String>) -> Validator<S> {
        let expected = expected.into();
        Validator::from_finder(NAME_ERROR, move |series: &S| find_name_errors(series, &expected))
    }

    /// Require every label in `required`; extra labels are fine unless `allow_extra` is false
    pub fn index<S, I>(&self, required: I, allow_extra: bool) -> Validator<S>
    where
        S: Series + ?Sized + 'static,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let required = required.into_iter().map(Into::into).collect::<BTreeSet<_>>();
        Validator::from_finder(INDEX_ERROR, move |series: &S| {
            find_series_index_errors(series, &required, allow_extra)
        })
    }
}
