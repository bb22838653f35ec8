//! Shape specifications and the shape matcher
//!
//! A [`ShapeSpec`] holds one [`Dim`] constraint per dimension:
//!
//! - [`Dim::Fixed`]: the dimension must have exactly this size
//! - [`Dim::Range`]: the size must lie in an inclusive range
//! - [`Dim::Var`]: a named variable; the first occurrence binds it, later
//!   occurrences must have the same size
//! - [`Dim::Any`]: no constraint
//!
//! The spec `(3, 1..=10, x, x, _)` describes a 5-dimensional shape where dimension
//! 0 is fixed at 3, dimension 1 is between 1 and 10, dimensions 2 and 3 are equal
//! and dimension 4 can be any size.
//!
//! # Example
//!
//! ```rust
//! use ds_validator::shape::{find_shape_errors, ShapeSpec};
//!
//! let spec: ShapeSpec = "(3, 1..=10, x, x, _)".parse().unwrap();
//! assert!(find_shape_errors(&[3, 4, 7, 7, 100], spec.dims()).is_empty());
//! assert_eq!(find_shape_errors(&[3, 4, 7, 8, 100], spec.dims()).len(), 1);
//! ```

use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Constraint on a single dimension
///
/// The variants are open for matching and for [`find_shape_errors`]. Build them
/// through [`Dim::fixed`], [`Dim::range`] and [`Dim::var`], or pass them through
/// [`ShapeSpec::new`], to have malformed constraints rejected. A hand-built
/// `Fixed(0)` or `Range(5, 2)` is not rejected by the matcher: it simply never
/// matches a positive size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dim {
    /// Exact size
    Fixed(usize),
    /// Inclusive size range `lo..=hi`
    Range(usize, usize),
    /// Named variable shared between dimensions
    Var(String),
    /// Unconstrained
    Any,
}

impl Dim {
    /// Fixed size constraint, rejecting zero
    pub fn fixed(size: usize) -> Result<Self> {
        let dim = Self::Fixed(size);
        dim.check()?;
        Ok(dim)
    }

    /// Inclusive range constraint, rejecting zero bounds and empty ranges
    pub fn range(lo: usize, hi: usize) -> Result<Self> {
        let dim = Self::Range(lo, hi);
        dim.check()?;
        Ok(dim)
    }

    /// Variable constraint, rejecting empty names
    pub fn var<S: Into<String>>(name: S) -> Result<Self> {
        let dim = Self::Var(name.into());
        dim.check()?;
        Ok(dim)
    }

    fn check(&self) -> Result<()> {
        match self {
            Self::Fixed(0) => Err(ValidatorError::invalid_constraint(
                "fixed dimension size must be positive, got 0",
            )),
            Self::Range(lo, hi) if *lo == 0 || *hi == 0 => {
                Err(ValidatorError::invalid_constraint(format!(
                    "both bounds of a dimension range must be positive, got {}..={}",
                    lo, hi
                )))
            },
            Self::Range(lo, hi) if lo > hi => Err(ValidatorError::invalid_constraint(format!(
                "dimension range {}..={} is empty",
                lo, hi
            ))),
            Self::Var(name) if name.is_empty() => Err(ValidatorError::invalid_constraint(
                "dimension variable name must not be empty",
            )),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Dim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(size) => write!(f, "{}", size),
            Self::Range(lo, hi) => write!(f, "{}..={}", lo, hi),
            Self::Var(name) => write!(f, "{}", name),
            Self::Any => write!(f, "_"),
        }
    }
}

impl FromStr for Dim {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        if token == "_" || token == "*" {
            return Ok(Self::Any);
        }
        if let Some((lo, hi)) = token.split_once("..=") {
            let lo = parse_size(lo)?;
            let hi = parse_size(hi)?;
            return Self::range(lo, hi);
        }
        if token.contains("..") {
            return Err(ValidatorError::invalid_constraint(format!(
                "ranges are inclusive and written `lo..=hi`, got `{}`",
                token
            )));
        }
        if token.chars().all(|c| c.is_ascii_digit()) && !token.is_empty() {
            return Self::fixed(parse_size(token)?);
        }
        let mut chars = token.chars();
        let valid_name = chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_')
            && chars.all(|c| c.is_alphanumeric() || c == '_');
        if valid_name {
            Self::var(token)
        } else {
            Err(ValidatorError::invalid_constraint(format!(
                "unrecognised dimension constraint `{}`",
                token
            )))
        }
    }
}

fn parse_size(s: &str) -> Result<usize> {
    s.trim().parse::<usize>().map_err(|e| {
        ValidatorError::invalid_constraint(format!("invalid dimension size `{}`: {}", s.trim(), e))
    })
}

/// Ordered dimension constraints, one per dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<RawDim>", into = "Vec<RawDim>")]
pub struct ShapeSpec(Vec<Dim>);

impl ShapeSpec {
    /// Build a spec, checking every constraint
    pub fn new(dims: Vec<Dim>) -> Result<Self> {
        for dim in &dims {
            dim.check()?;
        }
        Ok(Self(dims))
    }

    pub fn dims(&self) -> &[Dim] {
        &self.0
    }

    /// Number of dimensions the spec requires
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Find every mismatch between `observed` and this spec
    pub fn find_errors(&self, observed: &[usize]) -> Vec<String> {
        find_shape_errors(observed, &self.0)
    }
}

impl std::fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dims = self.0.iter().map(ToString::to_string).collect::<Vec<_>>();
        write!(f, "({})", dims.join(", "))
    }
}

impl FromStr for ShapeSpec {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .or_else(|| trimmed.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')))
            .unwrap_or(trimmed)
            .trim();
        if inner.is_empty() {
            return Ok(Self::default());
        }
        let inner = inner.strip_suffix(',').unwrap_or(inner);
        let dims = inner
            .split(',')
            .map(str::parse::<Dim>)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self(dims))
    }
}

impl TryFrom<Vec<RawDim>> for ShapeSpec {
    type Error = ValidatorError;

    fn try_from(raw: Vec<RawDim>) -> Result<Self> {
        let dims = raw
            .into_iter()
            .map(|dim| match dim {
                RawDim::Size(size) => Dim::fixed(size),
                RawDim::Range([lo, hi]) => Dim::range(lo, hi),
                RawDim::Name(name) if name == "_" || name == "*" => Ok(Dim::Any),
                RawDim::Name(name) => Dim::var(name),
                RawDim::Unconstrained => Ok(Dim::Any),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self(dims))
    }
}

impl From<ShapeSpec> for Vec<RawDim> {
    fn from(spec: ShapeSpec) -> Self {
        spec.0
            .into_iter()
            .map(|dim| match dim {
                Dim::Fixed(size) => RawDim::Size(size),
                Dim::Range(lo, hi) => RawDim::Range([lo, hi]),
                Dim::Var(name) => RawDim::Name(name),
                Dim::Any => RawDim::Unconstrained,
            })
            .collect()
    }
}

/// JSON form of a dimension: `3`, `[1, 10]`, `"x"` or `null`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDim {
    Size(usize),
    Range([usize; 2]),
    Name(String),
    Unconstrained,
}

/// Compare an observed shape against dimension constraints
///
/// A rank mismatch is reported once and the dimensions that do align are still
/// compared pairwise. Variable bindings live only for the duration of this call.
pub fn find_shape_errors(observed: &[usize], spec: &[Dim]) -> Vec<String> {
    let mut validation_errors = Vec::new();

    if observed.len() != spec.len() {
        validation_errors.push(format!(
            "Object dimensions ({}) do not match required dimensions: {}.",
            observed.len(),
            spec.len()
        ));
    }

    let mut bindings: HashMap<&str, usize> = HashMap::new();
    for (dim, (&size, constraint)) in observed.iter().zip(spec).enumerate() {
        match constraint {
            Dim::Any => {},
            Dim::Fixed(required) => {
                if size != *required {
                    validation_errors.push(format!(
                        "Dimension {} size ({}) does not equal required length: {}.",
                        dim, size, required
                    ));
                }
            },
            Dim::Range(lo, hi) => {
                if !(*lo..=*hi).contains(&size) {
                    validation_errors.push(format!(
                        "Dimension {} size ({}) is not in required range: {}..={}.",
                        dim, size, lo, hi
                    ));
                }
            },
            Dim::Var(name) => match bindings.get(name.as_str()) {
                // A zero binding reads as unbound and gets replaced.
                Some(&bound) if bound != 0 => {
                    if size != bound {
                        validation_errors.push(format!(
                            "Dimension {} size ({}) does not match set variable: '{}' = {}.",
                            dim, size, name, bound
                        ));
                    }
                },
                _ => {
                    bindings.insert(name.as_str(), size);
                },
            },
        }
    }

    validation_errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> ShapeSpec {
        s.parse().unwrap()
    }

    #[test]
    fn test_fixed_size() {
        let dims = [Dim::Fixed(3)];
        assert!(find_shape_errors(&[3], &dims).is_empty());

        let errors = find_shape_errors(&[4], &dims);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Dimension 0"));
        assert!(errors[0].contains('4'));
        assert!(errors[0].contains('3'));
    }

    #[test]
    fn test_range_is_inclusive() {
        let dims = [Dim::Range(1, 10)];
        assert!(find_shape_errors(&[1], &dims).is_empty());
        assert!(find_shape_errors(&[10], &dims).is_empty());

        let errors = find_shape_errors(&[11], &dims);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("(11)"));
        assert!(errors[0].contains("1..=10"));
    }

    #[test]
    fn test_variable_binding() {
        let dims = [Dim::Var("x".into()), Dim::Var("x".into())];
        assert!(find_shape_errors(&[5, 5], &dims).is_empty());

        let errors = find_shape_errors(&[5, 6], &dims);
        assert_eq!(
            errors,
            vec!["Dimension 1 size (6) does not match set variable: 'x' = 5.".to_string()]
        );
    }

    #[test]
    fn test_independent_variables() {
        let s = spec("(a, b, a, b)");
        assert!(s.find_errors(&[2, 3, 2, 3]).is_empty());
        assert_eq!(s.find_errors(&[2, 3, 3, 2]).len(), 2);
    }

    #[test]
    fn test_zero_binding_is_rebound() {
        // The first occurrence binds `x` to 0, which the next occurrence treats as
        // unbound: it re-binds to 4 and only the third occurrence is compared.
        let s = spec("(x, x, x)");
        assert!(s.find_errors(&[0, 4, 4]).is_empty());
        assert_eq!(s.find_errors(&[0, 4, 5]).len(), 1);
    }

    #[test]
    fn test_wildcard_skips() {
        let s = spec("(_, *, 2)");
        assert!(s.find_errors(&[0, 999, 2]).is_empty());
    }

    #[test]
    fn test_rank_mismatch_still_compares_aligned_dims() {
        let s = spec("(3, 4)");
        let errors = s.find_errors(&[5, 4, 1]);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Object dimensions (3)"));
        assert!(errors[1].starts_with("Dimension 0 size (5)"));

        let errors = s.find_errors(&[3]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("required dimensions: 2"));
    }

    #[test]
    fn test_empty_shapes() {
        assert!(find_shape_errors(&[], &[]).is_empty());
        assert_eq!(find_shape_errors(&[], &[Dim::Any]).len(), 1);
    }

    #[test]
    fn test_errors_keep_encounter_order() {
        let s = spec("(1, 2..=3, y, y)");
        let errors = s.find_errors(&[9, 9, 1, 2]);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("Dimension 0"));
        assert!(errors[1].starts_with("Dimension 1"));
        assert!(errors[2].starts_with("Dimension 3"));
    }

    #[test]
    fn test_constructors_reject_invalid_constraints() {
        assert!(Dim::fixed(0).is_err());
        assert!(Dim::range(0, 4).is_err());
        assert!(Dim::range(5, 4).is_err());
        assert!(Dim::var("").is_err());
        assert!(ShapeSpec::new(vec![Dim::Fixed(2), Dim::Fixed(0)]).is_err());
        assert!(ShapeSpec::new(vec![Dim::Fixed(2), Dim::Range(3, 3)]).is_ok());
    }

    #[test]
    fn test_hand_built_invalid_dims() {
        assert!(ShapeSpec::new(vec![Dim::Any, Dim::Fixed(0)]).is_err());
        assert!(ShapeSpec::new(vec![Dim::Range(5, 2)]).is_err());
        assert!(ShapeSpec::new(vec![Dim::Var(String::new())]).is_err());

        for size in [1, 2, 3, 5, 9] {
            assert_eq!(find_shape_errors(&[size], &[Dim::Range(5, 2)]).len(), 1);
            assert_eq!(find_shape_errors(&[size], &[Dim::Fixed(0)]).len(), 1);
        }
    }

    #[test]
    fn test_parse_and_display() {
        let s = spec("(3, 1..=10, x, x, _)");
        assert_eq!(
            s.dims(),
            &[
                Dim::Fixed(3),
                Dim::Range(1, 10),
                Dim::Var("x".into()),
                Dim::Var("x".into()),
                Dim::Any
            ]
        );
        assert_eq!(s.to_string(), "(3, 1..=10, x, x, _)");
        assert_eq!(spec("[2, n]").rank(), 2);
        assert_eq!(spec("(7,)").dims(), &[Dim::Fixed(7)]);
        assert_eq!(spec("()").rank(), 0);
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert!("(1..10)".parse::<ShapeSpec>().is_err());
        assert!("(0)".parse::<ShapeSpec>().is_err());
        assert!("(3, -1)".parse::<ShapeSpec>().is_err());
        assert!("(3, 2x)".parse::<ShapeSpec>().is_err());
        assert!("(3, , 4)".parse::<ShapeSpec>().is_err());
    }

    #[test]
    fn test_json_form() {
        let s: ShapeSpec = serde_json::from_str(r#"[3, [1, 10], "x", "_", null]"#).unwrap();
        assert_eq!(s.to_string(), "(3, 1..=10, x, _, _)");

        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"[3,[1,10],"x",null,null]"#);

        assert!(serde_json::from_str::<ShapeSpec>("[0]").is_err());
        assert!(serde_json::from_str::<ShapeSpec>("[[4, 2]]").is_err());
    }
}
