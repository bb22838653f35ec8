//! Column-set reconciliation and index checks for tabular data

use crate::dtype::{is_compatible, DTypeRequirement, TypeDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Policy for columns that are present but not required
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherColumns {
    /// Any extra column is an error
    #[default]
    Forbid,
    /// Extra columns are allowed and must satisfy the requirement
    Allow(DTypeRequirement),
}

impl OtherColumns {
    /// Allow extra columns of any type
    pub fn allow_any() -> Self {
        Self::Allow(DTypeRequirement::Any)
    }
}

/// Compare observed columns against the required column map
///
/// Reports, in order: missing columns, forbidden extra columns, then one error
/// per present column whose type is incompatible. A missing column is reported
/// once and never type-checked.
pub fn reconcile_columns(
    observed: &BTreeMap<String, TypeDescriptor>,
    required: &BTreeMap<String, DTypeRequirement>,
    other_columns: &OtherColumns,
) -> Vec<String> {
    let mut errors = Vec::new();

    let missing = required
        .keys()
        .filter(|name| !observed.contains_key(*name))
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        errors.push(format!("Required column(s) don't exist: {}.", format_names(missing)));
    }

    let extra = observed
        .keys()
        .filter(|name| !required.contains_key(*name))
        .collect::<Vec<_>>();
    if !extra.is_empty() && *other_columns == OtherColumns::Forbid {
        errors.push(format!("Extra column(s) found: {}.", format_names(extra.iter().copied())));
    }

    for (name, requirement) in required {
        if let Some(dtype) = observed.get(name) {
            if let Some(error) = column_type_error(name, dtype, requirement) {
                errors.push(error);
            }
        }
    }

    if let OtherColumns::Allow(requirement) = other_columns {
        for name in extra {
            let error = observed
                .get(name)
                .and_then(|dtype| column_type_error(name, dtype, requirement));
            errors.extend(error);
        }
    }

    errors
}

fn column_type_error(
    name: &str,
    dtype: &TypeDescriptor,
    requirement: &DTypeRequirement,
) -> Option<String> {
    if is_compatible(dtype, requirement) {
        None
    } else {
        Some(format!(
            "Column `{}` of type `{}` is not compatible with the required types: {}.",
            name, dtype, requirement
        ))
    }
}

/// Check row labels against a set of required labels
pub fn find_index_errors(
    labels: &[String],
    required: &BTreeSet<String>,
    allow_extra: bool,
) -> Vec<String> {
    let present = labels.iter().collect::<BTreeSet<_>>();
    let mut errors = Vec::new();

    let missing = required.iter().filter(|label| !present.contains(label)).collect::<Vec<_>>();
    if !missing.is_empty() {
        errors.push(format!(
            "Object is missing the following indices: {}.",
            format_names(missing)
        ));
    }

    if !allow_extra {
        let extra = present
            .into_iter()
            .filter(|label| !required.contains(*label))
            .collect::<Vec<_>>();
        if !extra.is_empty() {
            errors.push(format!("Object has extra indices: {}.", format_names(extra)));
        }
    }

    errors
}

pub(crate) fn format_names<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let names = names.into_iter().map(String::as_str).collect::<Vec<_>>();
    format!("{{{}}}", names.join(", "))
}
