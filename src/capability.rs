//! Capability probing for the optional backing libraries
//!
//! Each data family (n-dimensional arrays, tensors, columnar data) is backed by an
//! optional library selected with a cargo feature. Family validator factories call
//! [`require`] once when they are initialised, so a missing library surfaces as
//! [`ValidatorError::MissingCapability`] before any data is validated.

use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};

/// Data families that have family-specific validators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// n-dimensional arrays (`ndarray`)
    NdArray,
    /// Tensors (`tract-core`)
    Tensor,
    /// Columnar data: frames and series (`arrow`)
    Columnar,
}

impl Family {
    /// Every family, in a stable order
    pub const ALL: [Family; 3] = [Family::NdArray, Family::Tensor, Family::Columnar];

    /// Cargo feature that enables this family's backing library
    pub fn feature(self) -> &'static str {
        match self {
            Self::NdArray => "ndarray",
            Self::Tensor => "tract",
            Self::Columnar => "arrow",
        }
    }

    /// Name of the backing library
    pub fn library(self) -> &'static str {
        match self {
            Self::NdArray => "ndarray",
            Self::Tensor => "tract-core",
            Self::Columnar => "arrow",
        }
    }

    /// Whether the backing library was compiled in
    pub fn is_available(self) -> bool {
        match self {
            Self::NdArray => cfg!(feature = "ndarray"),
            Self::Tensor => cfg!(feature = "tract"),
            Self::Columnar => cfg!(feature = "arrow"),
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NdArray => write!(f, "ndarray"),
            Self::Tensor => write!(f, "tensor"),
            Self::Columnar => write!(f, "columnar"),
        }
    }
}

/// Information about a data family and its backing library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityInfo {
    pub family: Family,
    pub library: &'static str,
    pub feature: &'static str,
    pub available: bool,
}

/// Fail with [`ValidatorError::MissingCapability`] unless `family` is available
pub fn require(family: Family) -> Result<()> {
    check_available(family, family.is_available())
}

fn check_available(family: Family, available: bool) -> Result<()> {
    if available {
        tracing::debug!(family = %family, library = family.library(), "Capability available");
        Ok(())
    } else {
        tracing::warn!(
            family = %family,
            feature = family.feature(),
            "Validators requested for a family whose backing library is not compiled in"
        );
        Err(ValidatorError::MissingCapability { family })
    }
}

/// List every family with its availability status
pub fn list_capabilities() -> Vec<CapabilityInfo> {
    Family::ALL
        .iter()
        .map(|&family| CapabilityInfo {
            family,
            library: family.library(),
            feature: family.feature(),
            available: family.is_available(),
        })
        .collect()
}
