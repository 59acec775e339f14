//! IRB risk-weight formulas for retail exposures (CRR Article 154).
//!
//! This module provides:
//! - Expected loss `EL = pd * lgd`
//! - Asset correlation `rho(pd)` with a selectable [`CorrelationFormula`]
//! - Capital requirement `k = lgd * Φ(Φ⁻¹(pd) + sqrt(rho) Φ⁻¹(0.999) / sqrt(1 - rho)) - EL`
//! - Risk-weighted exposure amount `round(k * 12.5 * 1.06 * EAD)`
//! - [`RiskWeightCalculator`] composing all four
//!
//! The free functions in this module use the default conventions
//! (interpolated correlation, round-half-to-even).
//!
//! ## Example
//!
//! ```
//! use capital_core::irb::{asset_correlation, capital_requirement, expected_loss,
//!     risk_weighted_exposure_amount};
//!
//! let el = expected_loss(0.1, 0.5).unwrap();
//! let rho = asset_correlation(0.1).unwrap();
//! let k = capital_requirement(0.1, 0.5, rho).unwrap();
//! let rwa = risk_weighted_exposure_amount(k, 1_000_000.0).unwrap();
//!
//! assert_eq!(el, 0.05);
//! assert_eq!(rwa, 935_432);
//! ```

pub mod calculator;
pub mod capital;
pub mod correlation;
pub mod rwa;

pub use calculator::RiskWeightCalculator;
pub use capital::{capital_requirement, expected_loss, validate_correlation};
pub use correlation::{asset_correlation_with, CorrelationFormula};
pub use rwa::{risk_weight_from_capital, risk_weighted_exposure_amount_with, RoundingPolicy};

use crate::types::{CapitalError, ExposureInput, RiskMetrics};

/// Correlation for high-PD exposures.
pub const CORRELATION_FLOOR: f64 = 0.03;

/// Correlation for low-PD exposures.
pub const CORRELATION_CAP: f64 = 0.16;

/// Decay rate of the correlation weight in PD.
pub const CORRELATION_DECAY: f64 = 35.0;

/// Confidence level of the systematic stress scenario.
pub const CONFIDENCE_LEVEL: f64 = 0.999;

/// Inverse of the 8% minimum capital ratio.
pub const CAPITAL_MULTIPLIER: f64 = 12.5;

/// Regulatory scaling factor applied to IRB risk-weighted amounts.
pub const SCALING_FACTOR: f64 = 1.06;

/// Asset correlation under the default (interpolated) formula.
pub fn asset_correlation(pd: f64) -> Result<f64, CapitalError> {
    asset_correlation_with(pd, CorrelationFormula::default())
}

/// Risk-weighted exposure amount with round-half-to-even.
pub fn risk_weighted_exposure_amount(k: f64, ead: f64) -> Result<i64, CapitalError> {
    risk_weighted_exposure_amount_with(k, ead, RoundingPolicy::default())
}

/// All four metrics for one exposure under the default conventions.
pub fn compute_metrics(input: &ExposureInput) -> Result<RiskMetrics, CapitalError> {
    RiskWeightCalculator::default().compute(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_functions_match_default_calculator() {
        let input = ExposureInput::new(0.2, 0.6, 2_000_000.0).unwrap();
        let metrics = compute_metrics(&input).unwrap();

        let rho = asset_correlation(input.pd).unwrap();
        let k = capital_requirement(input.pd, input.lgd, rho).unwrap();

        assert_eq!(metrics.expected_loss, expected_loss(input.pd, input.lgd).unwrap());
        assert_eq!(metrics.asset_correlation, rho);
        assert_eq!(metrics.capital_requirement, k);
        assert_eq!(
            metrics.risk_weighted_exposure_amount,
            risk_weighted_exposure_amount(k, input.ead).unwrap()
        );
    }

    #[test]
    fn test_constants() {
        assert_eq!(CAPITAL_MULTIPLIER, 1.0 / 0.08);
        assert!(CORRELATION_FLOOR < CORRELATION_CAP);
    }
}
