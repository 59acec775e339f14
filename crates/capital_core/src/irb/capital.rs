//! Expected loss and capital requirement `k`.
//!
//! ```text
//! EL = pd * lgd
//! z  = Φ( Φ⁻¹(pd) + sqrt(rho) * Φ⁻¹(0.999) / sqrt(1 - rho) )
//! k  = lgd * z - EL
//! ```
//!
//! Only the systematic term is scaled by `1 / sqrt(1 - rho)`; `k` is returned
//! as computed and may be negative.

use super::CONFIDENCE_LEVEL;
use crate::math::{norm_cdf, norm_inv_cdf};
use crate::types::{validate_lgd, validate_pd, CapitalError, RiskParameter};

/// Expected loss as a fraction of exposure.
///
/// # Errors
/// `CapitalError::InvalidParameter` when pd ∉ (0, 1) or lgd ∉ [0, 1].
///
/// # Examples
/// ```
/// use capital_core::irb::expected_loss;
///
/// assert_eq!(expected_loss(0.1, 0.5).unwrap(), 0.05);
/// ```
pub fn expected_loss(pd: f64, lgd: f64) -> Result<f64, CapitalError> {
    let pd = validate_pd(pd)?;
    let lgd = validate_lgd(lgd)?;
    Ok(pd * lgd)
}

/// Checks that `rho` lies in [0, 1).
#[inline]
pub fn validate_correlation(rho: f64) -> Result<f64, CapitalError> {
    if (0.0..1.0).contains(&rho) {
        Ok(rho)
    } else {
        Err(CapitalError::NumericDomain {
            parameter: RiskParameter::AssetCorrelation,
            value: rho,
            reason: "sqrt(1 - rho) requires rho in [0, 1)",
        })
    }
}

/// Default probability conditional on the 99.9% systematic scenario.
///
/// Inputs must already be validated.
pub(crate) fn conditional_default_probability(pd: f64, rho: f64) -> Result<f64, CapitalError> {
    let rho = validate_correlation(rho)?;
    let pd_quantile = norm_inv_cdf(pd)?;
    let confidence_quantile = norm_inv_cdf(CONFIDENCE_LEVEL)?;

    let z = norm_cdf(pd_quantile + rho.sqrt() * confidence_quantile / (1.0 - rho).sqrt());
    if z.is_finite() {
        Ok(z)
    } else {
        Err(CapitalError::NumericDomain {
            parameter: RiskParameter::CapitalRequirement,
            value: z,
            reason: "conditional default probability is not finite",
        })
    }
}

/// Capital requirement from validated inputs and a precomputed expected loss.
pub(crate) fn capital_from_parts(
    pd: f64,
    lgd: f64,
    rho: f64,
    expected_loss: f64,
) -> Result<f64, CapitalError> {
    let conditional_expected_loss = lgd * conditional_default_probability(pd, rho)?;
    Ok(conditional_expected_loss - expected_loss)
}

/// Capital requirement `k` (unexpected loss) as a fraction of exposure.
///
/// # Errors
/// - `CapitalError::InvalidParameter` when pd ∉ (0, 1) or lgd ∉ [0, 1]
/// - `CapitalError::NumericDomain` when rho ∉ [0, 1)
///
/// # Examples
/// ```
/// use capital_core::irb::capital_requirement;
///
/// let k = capital_requirement(0.1, 0.5, 0.0339256598449013).unwrap();
/// assert!((k - 0.0705986597297806).abs() < 1e-12);
///
/// assert!(capital_requirement(0.1, 0.5, 1.0).is_err());
/// ```
pub fn capital_requirement(pd: f64, lgd: f64, rho: f64) -> Result<f64, CapitalError> {
    let el = expected_loss(pd, lgd)?;
    capital_from_parts(pd, lgd, rho, el)
}
