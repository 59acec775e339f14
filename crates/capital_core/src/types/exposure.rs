//! Exposure inputs and derived risk metrics.

use serde::{Deserialize, Serialize};

use super::error::{CapitalError, RiskParameter};

/// Risk parameters of a single credit exposure.
///
/// Fields are public so that callers can build inputs from any source; every
/// calculator entry point re-validates them, so an out-of-domain value is
/// rejected at computation time even if it bypassed [`ExposureInput::new`].
///
/// # Examples
/// ```
/// use capital_core::types::ExposureInput;
///
/// let input = ExposureInput::new(0.1, 0.5, 1_000_000.0).unwrap();
/// assert_eq!(input.pd, 0.1);
///
/// assert!(ExposureInput::new(0.0, 0.5, 1_000_000.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureInput {
    /// Probability of default, in (0, 1)
    pub pd: f64,
    /// Loss given default, in [0, 1]
    pub lgd: f64,
    /// Exposure at default, non-negative monetary amount
    pub ead: f64,
}

impl ExposureInput {
    /// Creates a validated exposure.
    ///
    /// # Errors
    /// Returns `CapitalError::InvalidParameter` naming the first field outside
    /// its domain, checked in the order pd, lgd, ead.
    pub fn new(pd: f64, lgd: f64, ead: f64) -> Result<Self, CapitalError> {
        let input = Self { pd, lgd, ead };
        input.validate()?;
        Ok(input)
    }

    /// Checks every field against its documented domain.
    pub fn validate(&self) -> Result<(), CapitalError> {
        validate_pd(self.pd)?;
        validate_lgd(self.lgd)?;
        validate_ead(self.ead)?;
        Ok(())
    }
}

/// Risk metrics derived from one exposure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Expected loss as a fraction of EAD (`pd * lgd`)
    pub expected_loss: f64,
    /// Asset correlation `rho`
    pub asset_correlation: f64,
    /// Capital requirement `k` as a fraction of EAD
    pub capital_requirement: f64,
    /// Risk-weighted exposure amount, rounded to whole currency units
    pub risk_weighted_exposure_amount: i64,
}

/// Validates a probability of default: `0 < pd < 1`.
#[inline]
pub fn validate_pd(pd: f64) -> Result<f64, CapitalError> {
    if pd > 0.0 && pd < 1.0 {
        Ok(pd)
    } else {
        Err(CapitalError::InvalidParameter {
            parameter: RiskParameter::Pd,
            value: pd,
        })
    }
}

/// Validates a loss given default: `0 <= lgd <= 1`.
#[inline]
pub fn validate_lgd(lgd: f64) -> Result<f64, CapitalError> {
    if (0.0..=1.0).contains(&lgd) {
        Ok(lgd)
    } else {
        Err(CapitalError::InvalidParameter {
            parameter: RiskParameter::Lgd,
            value: lgd,
        })
    }
}

/// Validates an exposure at default: finite and `ead >= 0`.
#[inline]
pub fn validate_ead(ead: f64) -> Result<f64, CapitalError> {
    if ead.is_finite() && ead >= 0.0 {
        Ok(ead)
    } else {
        Err(CapitalError::InvalidParameter {
            parameter: RiskParameter::Ead,
            value: ead,
        })
    }
}
