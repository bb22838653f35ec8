//! Validator composition
//!
//! Every check is built the same way: an error-finder returns the list of
//! problems with a value, [`Validator::from_finder`] turns that list into a
//! single [`ValidatorError::Validation`], and [`Validator::bundle`] runs several
//! validators against one value and reports all of their failures at once.

use crate::error::{Result, ValidatorError, BUNDLED_ERROR_KIND};
use crate::tracing_config::spans;
use std::sync::Arc;
use tracing::{debug, trace};

type CheckFn<T> = dyn Fn(&T) -> Result<()> + Send + Sync;

/// A reusable, thread-safe check over values of type `T`
pub struct Validator<T: ?Sized> {
    kind: &'static str,
    check: Arc<CheckFn<T>>,
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").field("kind", &self.kind).finish_non_exhaustive()
    }
}

impl<T: ?Sized + 'static> Validator<T> {
    /// Wrap an arbitrary check
    pub fn from_fn<F>(kind: &'static str, check: F) -> Self
    where
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            kind,
            check: Arc::new(check),
        }
    }

    /// Build a validator from an error-finder
    ///
    /// An empty list passes. A non-empty list fails with one error of `kind`
    /// carrying every problem in the order the finder reported them.
    pub fn from_finder<F>(kind: &'static str, finder: F) -> Self
    where
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        Self::from_fn(kind, move |value| {
            let errors = finder(value);
            if errors.is_empty() {
                trace!(kind, "Validation passed");
                Ok(())
            } else {
                debug!(kind, error_count = errors.len(), "Validation failed");
                Err(ValidatorError::validation(kind, errors))
            }
        })
    }

    /// Run every validator and report all failures together
    ///
    /// A single failure is returned as is, so its `kind()` is the failing
    /// check's kind (`frame_shape_error`), not `bundled_validation_error`. Two
    /// or more are wrapped in [`ValidatorError::Bundled`]; failures that are
    /// bundles themselves are flattened so each leaf check appears once. An
    /// empty bundle always passes. Use [`ValidatorError::validation_errors`] to
    /// read the messages the same way in both cases.
    pub fn bundle<I>(validators: I) -> Self
    where
        I: IntoIterator<Item = Validator<T>>,
    {
        let validators = validators.into_iter().collect::<Vec<_>>();
        Self::from_fn(BUNDLED_ERROR_KIND, move |value| {
            let mut failures = Vec::new();
            for validator in &validators {
                match validator.check(value) {
                    Ok(()) => {},
                    Err(ValidatorError::Bundled { errors }) => failures.extend(errors),
                    Err(err) => failures.push(err),
                }
            }
            if failures.len() > 1 {
                debug!(
                    kind = BUNDLED_ERROR_KIND,
                    error_count = failures.len(),
                    "Bundled validation failed"
                );
                Err(ValidatorError::Bundled { errors: failures })
            } else {
                failures.pop().map_or(Ok(()), Err)
            }
        })
    }

    /// Bundle `self` with another validator
    #[must_use]
    pub fn and(self, other: Validator<T>) -> Self {
        Self::bundle([self, other])
    }
}

impl<T: ?Sized> Validator<T> {
    /// Error kind this validator reports
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Check a borrowed value
    pub fn check(&self, value: &T) -> Result<()> {
        let _span = spans::validation(self.kind).entered();
        (self.check)(value)
    }

    /// Whether the value passes, discarding the details
    pub fn is_valid(&self, value: &T) -> bool {
        self.check(value).is_ok()
    }
}

impl<T> Validator<T> {
    /// Check an owned value and hand it back unchanged on success
    pub fn validate(&self, value: T) -> Result<T> {
        self.check(&value)?;
        Ok(value)
    }
}

/// Free-function form of [`Validator::from_finder`]
pub fn checker<T, F>(kind: &'static str, finder: F) -> Validator<T>
where
    T: ?Sized + 'static,
    F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
{
    Validator::from_finder(kind, finder)
}

/// Free-function form of [`Validator::bundle`]
pub fn bundle<T, I>(validators: I) -> Validator<T>
where
    T: ?Sized + 'static,
    I: IntoIterator<Item = Validator<T>>,
{
    Validator::bundle(validators)
}
