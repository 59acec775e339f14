//! Risk-weighted exposure amount.
//!
//! `RWA = round(k * 12.5 * 1.06 * EAD)`, rounded to whole currency units under
//! a [`RoundingPolicy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CAPITAL_MULTIPLIER, SCALING_FACTOR};
use crate::types::{validate_ead, CapitalError, RiskParameter};

/// Rounding applied to the unrounded RWA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Ties go to the even neighbour (banker's rounding).
    #[default]
    HalfEven,
    /// Ties go away from zero.
    HalfAwayFromZero,
}

impl RoundingPolicy {
    /// Configuration name of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingPolicy::HalfEven => "half_even",
            RoundingPolicy::HalfAwayFromZero => "half_away_from_zero",
        }
    }

    /// Rounds `value` to an integer-valued f64.
    #[inline]
    pub fn round(&self, value: f64) -> f64 {
        match self {
            RoundingPolicy::HalfEven => value.round_ties_even(),
            RoundingPolicy::HalfAwayFromZero => value.round(),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "half_even" | "bankers" => Ok(RoundingPolicy::HalfEven),
            "half_away_from_zero" | "half_up" => Ok(RoundingPolicy::HalfAwayFromZero),
            other => Err(format!(
                "Unknown rounding policy: {}. Supported: half_even, half_away_from_zero",
                other
            )),
        }
    }
}

/// Risk weight per unit of EAD: `k * 12.5 * 1.06`.
#[inline]
pub fn risk_weight_from_capital(k: f64) -> f64 {
    k * CAPITAL_MULTIPLIER * SCALING_FACTOR
}

fn validate_capital(k: f64) -> Result<f64, CapitalError> {
    if k.is_finite() {
        Ok(k)
    } else {
        Err(CapitalError::NumericDomain {
            parameter: RiskParameter::CapitalRequirement,
            value: k,
            reason: "capital requirement must be finite",
        })
    }
}

/// Risk-weighted exposure amount under an explicit rounding policy.
///
/// # Errors
/// - `CapitalError::InvalidParameter` when ead is negative or not finite
/// - `CapitalError::NumericDomain` when k is not finite or the rounded amount
///   does not fit in an `i64`
///
/// # Examples
/// ```
/// use capital_core::irb::{risk_weighted_exposure_amount_with, RoundingPolicy};
///
/// let rwa = risk_weighted_exposure_amount_with(0.0705986597297806, 1_000_000.0, RoundingPolicy::HalfEven)
///     .unwrap();
/// assert_eq!(rwa, 935_432);
/// ```
pub fn risk_weighted_exposure_amount_with(
    k: f64,
    ead: f64,
    rounding: RoundingPolicy,
) -> Result<i64, CapitalError> {
    let k = validate_capital(k)?;
    let ead = validate_ead(ead)?;

    let amount = rounding.round(risk_weight_from_capital(k) * ead);

    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if amount >= i64::MIN as f64 && amount < i64::MAX as f64 {
        Ok(amount as i64)
    } else {
        Err(CapitalError::NumericDomain {
            parameter: RiskParameter::CapitalRequirement,
            value: amount,
            reason: "risk-weighted exposure amount exceeds the i64 range",
        })
    }
}
