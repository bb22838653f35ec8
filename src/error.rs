//! Error types for shape and dtype validation

use crate::capability::Family;
use thiserror::Error;

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Error kind reported when several independent checks fail together
pub const BUNDLED_ERROR_KIND: &str = "bundled_validation_error";

/// Errors raised by validators and by schema construction
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// A single check found one or more problems with the value
    #[error("{}", render_validation(kind, errors))]
    Validation {
        kind: &'static str,
        errors: Vec<String>,
    },

    /// Two or more independent checks failed against the same value
    #[error("{}", render_bundle(errors))]
    Bundled { errors: Vec<ValidatorError> },

    /// The backing library for a data family was not compiled in
    #[error(
        "`{}` must be enabled (cargo feature `{}`) for {} validators to be used",
        family.library(),
        family.feature(),
        family
    )]
    MissingCapability { family: Family },

    /// A shape or device constraint was malformed at definition time
    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),

    /// A dtype descriptor could not be understood
    #[error("Invalid dtype: {0}")]
    InvalidDType(String),

    /// A schema declaration could not be parsed
    #[error("Schema parse error: {0}")]
    Schema(#[from] serde_json::Error),
}

impl ValidatorError {
    /// Create a validation error from a non-empty list of problems
    pub fn validation(kind: &'static str, errors: Vec<String>) -> Self {
        Self::Validation { kind, errors }
    }

    /// Create a new invalid constraint error
    pub fn invalid_constraint<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConstraint(msg.into())
    }

    /// Create a new invalid dtype error
    pub fn invalid_dtype<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDType(msg.into())
    }

    /// Error kind tag, e.g. `array_shape_error`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { kind, .. } => kind,
            Self::Bundled { .. } => BUNDLED_ERROR_KIND,
            Self::MissingCapability { .. } => "missing_capability",
            Self::InvalidConstraint(_) => "invalid_constraint",
            Self::InvalidDType(_) => "invalid_dtype",
            Self::Schema(_) => "schema_error",
        }
    }

    /// All problem descriptions carried by this error, bundles flattened in order
    pub fn validation_errors(&self) -> Vec<&str> {
        match self {
            Self::Validation { errors, .. } => errors.iter().map(String::as_str).collect(),
            Self::Bundled { errors } => errors
                .iter()
                .flat_map(ValidatorError::validation_errors)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// True when the error describes bad data rather than a deployment or definition problem
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Bundled { .. })
    }
}

fn render_validation(kind: &str, errors: &[String]) -> String {
    let lines = errors
        .iter()
        .map(|error| format!("- {}", error))
        .collect::<Vec<_>>()
        .join("\n      ");
    format!("{}:\n      {}", kind, lines)
}

fn render_bundle(errors: &[ValidatorError]) -> String {
    let parts = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  ");
    format!("{}:\n  {}", BUNDLED_ERROR_KIND, parts)
}
