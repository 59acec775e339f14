//! Error types for capital calculations.
//!
//! This module provides:
//! - `CapitalError`: Errors from the IRB formulas and their statistical helpers
//! - `RiskParameter`: The quantity an error refers to

use std::fmt;
use thiserror::Error;

/// Quantity that failed validation or left its numeric domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskParameter {
    /// Probability of default, domain (0, 1).
    Pd,
    /// Loss given default, domain [0, 1].
    Lgd,
    /// Exposure at default, domain [0, +inf).
    Ead,
    /// Asset correlation, domain [0, 1).
    AssetCorrelation,
    /// Capital requirement `k`, must be finite.
    CapitalRequirement,
    /// Argument of the normal quantile function, domain (0, 1).
    Probability,
}

impl RiskParameter {
    /// Short name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            RiskParameter::Pd => "pd",
            RiskParameter::Lgd => "lgd",
            RiskParameter::Ead => "ead",
            RiskParameter::AssetCorrelation => "rho",
            RiskParameter::CapitalRequirement => "k",
            RiskParameter::Probability => "p",
        }
    }

    /// Human-readable domain of the quantity.
    pub fn domain(&self) -> &'static str {
        match self {
            RiskParameter::Pd | RiskParameter::Probability => "(0, 1)",
            RiskParameter::Lgd => "[0, 1]",
            RiskParameter::Ead => "[0, +inf)",
            RiskParameter::AssetCorrelation => "[0, 1)",
            RiskParameter::CapitalRequirement => "finite",
        }
    }
}

impl fmt::Display for RiskParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categorised capital calculation errors.
///
/// Both variants are deterministic input failures: retrying with the same
/// exposure gives the same error.
///
/// # Variants
/// - `InvalidParameter`: pd, lgd or ead outside the documented domain
/// - `NumericDomain`: a statistical function or division evaluated outside its domain
///
/// # Examples
/// ```
/// use capital_core::types::{CapitalError, RiskParameter};
///
/// let err = CapitalError::InvalidParameter { parameter: RiskParameter::Pd, value: 1.5 };
/// assert_eq!(format!("{}", err), "Invalid parameter: pd = 1.5, expected (0, 1)");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CapitalError {
    /// Input parameter outside its documented domain.
    #[error("Invalid parameter: {parameter} = {value}, expected {}", .parameter.domain())]
    InvalidParameter {
        /// Offending quantity
        parameter: RiskParameter,
        /// Supplied value
        value: f64,
    },

    /// Numerical operation evaluated outside its domain.
    #[error("Numeric domain error: {parameter} = {value}: {reason}")]
    NumericDomain {
        /// Quantity that left the domain
        parameter: RiskParameter,
        /// Value at which evaluation failed
        value: f64,
        /// Description of the failing operation
        reason: &'static str,
    },
}

impl CapitalError {
    /// Returns the quantity this error refers to.
    pub fn parameter(&self) -> RiskParameter {
        match self {
            CapitalError::InvalidParameter { parameter, .. }
            | CapitalError::NumericDomain { parameter, .. } => *parameter,
        }
    }

    /// Returns `true` for input-validation failures.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, CapitalError::InvalidParameter { .. })
    }
}
