//! Property tests for the shape matcher, the dtype resolver and bundling

use ds_validator::shape::find_shape_errors;
use ds_validator::{
    bundle, checker, is_compatible, reconcile_columns, DTypeRequirement, Dim, LogicalType,
    OtherColumns, ScalarType, TypeDescriptor, Validator,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

const CONCRETE: [ScalarType; 17] = [
    ScalarType::Bool,
    ScalarType::Int8,
    ScalarType::Int16,
    ScalarType::Int32,
    ScalarType::Int64,
    ScalarType::UInt8,
    ScalarType::UInt16,
    ScalarType::UInt32,
    ScalarType::UInt64,
    ScalarType::Float16,
    ScalarType::Float32,
    ScalarType::Float64,
    ScalarType::Complex64,
    ScalarType::Complex128,
    ScalarType::Str,
    ScalarType::Datetime64,
    ScalarType::Timedelta64,
];

fn shape() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..64, 0..6)
}

fn concrete_scalar() -> impl Strategy<Value = ScalarType> {
    prop::sample::select(CONCRETE.to_vec())
}

proptest! {
    /// A spec of the observed sizes always matches
    #[test]
    fn fixed_spec_of_observed_shape_matches(observed in shape()) {
        let spec = observed.iter().map(|&s| Dim::Fixed(s)).collect::<Vec<_>>();
        prop_assert!(find_shape_errors(&observed, &spec).is_empty());
    }

    /// Wildcards of the right rank match anything
    #[test]
    fn wildcards_match_any_sizes(observed in shape()) {
        let spec = vec![Dim::Any; observed.len()];
        prop_assert!(find_shape_errors(&observed, &spec).is_empty());
    }

    /// One error per mismatching fixed dimension, never more
    #[test]
    fn fixed_mismatches_are_counted_exactly(observed in shape(), bump in prop::collection::vec(any::<bool>(), 6)) {
        let spec = observed
            .iter()
            .zip(&bump)
            .map(|(&s, &b)| Dim::Fixed(if b { s + 1 } else { s }))
            .collect::<Vec<_>>();
        let expected = observed.iter().zip(&bump).filter(|(_, b)| **b).count();
        prop_assert_eq!(find_shape_errors(&observed, &spec).len(), expected);
    }

    /// A shared variable matches exactly when every size equals the first
    #[test]
    fn shared_variable_requires_equal_sizes(observed in prop::collection::vec(1usize..4, 1..6)) {
        let spec = vec![Dim::Var("x".to_string()); observed.len()];
        let errors = find_shape_errors(&observed, &spec);
        let mismatches = observed.iter().filter(|&&s| s != observed[0]).count();
        prop_assert_eq!(errors.len(), mismatches);
    }

    /// Ranges are inclusive on both ends
    #[test]
    fn ranges_are_inclusive(lo in 1usize..50, width in 0usize..50, offset in 0usize..120) {
        let hi = lo + width;
        let size = offset + 1;
        let errors = find_shape_errors(&[size], &[Dim::Range(lo, hi)]);
        prop_assert_eq!(errors.is_empty(), (lo..=hi).contains(&size));
    }

    /// A rank mismatch is reported once, in front of the pairwise errors
    #[test]
    fn rank_mismatch_reported_once(observed in shape(), extra in 1usize..3) {
        let spec = vec![Dim::Any; observed.len() + extra];
        let errors = find_shape_errors(&observed, &spec);
        prop_assert_eq!(errors.len(), 1);
        prop_assert!(errors[0].starts_with("Object dimensions"));
    }

    /// Matching is a pure function of its inputs
    #[test]
    fn matching_is_idempotent(observed in shape(), names in prop::collection::vec("[ab]", 0..6)) {
        let spec = names.into_iter().map(Dim::Var).collect::<Vec<_>>();
        prop_assert_eq!(find_shape_errors(&observed, &spec), find_shape_errors(&observed, &spec));
    }

    /// Every concrete scalar type satisfies each of its ancestors
    #[test]
    fn hierarchy_accepts_ancestors(scalar in concrete_scalar()) {
        let observed = TypeDescriptor::from(scalar);
        let mut ancestor = Some(scalar);
        while let Some(required) = ancestor {
            prop_assert!(is_compatible(&observed, &required.into()));
            ancestor = required.parent();
        }
    }

    /// Logical types only match themselves, even for related widths
    #[test]
    fn logical_types_match_by_equality(a in concrete_scalar(), b in concrete_scalar()) {
        let (Ok(a), Ok(b)) = (a.name().parse::<LogicalType>(), b.name().parse::<LogicalType>()) else {
            return Ok(());
        };
        let observed = TypeDescriptor::from(a.clone());
        prop_assert_eq!(is_compatible(&observed, &b.clone().into()), a == b);
    }

    /// Each missing column name appears in the single missing-column error
    #[test]
    fn missing_columns_reported_together(
        present in prop::collection::btree_set("[a-e]", 0..5),
        wanted in prop::collection::btree_set("[a-e]", 0..5),
    ) {
        let observed = present
            .iter()
            .map(|n| (n.clone(), TypeDescriptor::from(ScalarType::Int64)))
            .collect::<BTreeMap<_, _>>();
        let required = wanted
            .iter()
            .map(|n| (n.clone(), DTypeRequirement::Any))
            .collect::<BTreeMap<_, _>>();
        let errors = reconcile_columns(&observed, &required, &OtherColumns::allow_any());
        let missing = wanted.difference(&present).count();
        prop_assert_eq!(errors.len(), usize::from(missing > 0));
    }

    /// A bundle reports every failing check, nested or not
    #[test]
    fn bundles_collect_every_failure(failing in prop::collection::vec(any::<bool>(), 1..8)) {
        let checks = failing
            .iter()
            .map(|&fail| {
                checker("flag_error", move |_: &[usize]| {
                    if fail { vec!["flagged".to_string()] } else { Vec::new() }
                })
            })
            .collect::<Vec<Validator<[usize]>>>();
        let (left, right) = checks.split_at(checks.len() / 2);
        let nested = bundle([bundle(left.to_vec()), bundle(right.to_vec())]);

        let expected = failing.iter().filter(|&&f| f).count();
        match nested.check(&[]) {
            Ok(()) => prop_assert_eq!(expected, 0),
            Err(err) => prop_assert_eq!(err.validation_errors().len(), expected),
        }
    }
}
