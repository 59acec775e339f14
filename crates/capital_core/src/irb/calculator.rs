//! Risk-weight calculator composing the IRB formulas.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::capital::{capital_from_parts, expected_loss};
use super::correlation::{asset_correlation_with, CorrelationFormula};
use super::rwa::{risk_weight_from_capital, risk_weighted_exposure_amount_with, RoundingPolicy};
use crate::types::{validate_pd, CapitalError, ExposureInput, RiskMetrics};

/// Stateless calculator mapping one exposure to its risk metrics.
///
/// Holds only the two formula conventions; it is `Copy` and can be shared
/// freely across threads.
///
/// # Examples
/// ```
/// use capital_core::irb::RiskWeightCalculator;
/// use capital_core::types::ExposureInput;
///
/// let calculator = RiskWeightCalculator::default();
/// let input = ExposureInput::new(0.1, 0.5, 1_000_000.0).unwrap();
/// let metrics = calculator.compute(&input).unwrap();
///
/// assert_eq!(metrics.expected_loss, 0.05);
/// assert_eq!(metrics.risk_weighted_exposure_amount, 935_432);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskWeightCalculator {
    correlation_formula: CorrelationFormula,
    rounding: RoundingPolicy,
}

impl RiskWeightCalculator {
    /// Creates a calculator with explicit conventions.
    pub fn new(correlation_formula: CorrelationFormula, rounding: RoundingPolicy) -> Self {
        Self {
            correlation_formula,
            rounding,
        }
    }

    /// Returns a copy using a different correlation grouping.
    pub fn with_correlation_formula(mut self, correlation_formula: CorrelationFormula) -> Self {
        self.correlation_formula = correlation_formula;
        self
    }

    /// Returns a copy using a different rounding policy.
    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Correlation grouping in use.
    #[inline]
    pub fn correlation_formula(&self) -> CorrelationFormula {
        self.correlation_formula
    }

    /// Rounding policy in use.
    #[inline]
    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    /// Expected loss `pd * lgd`.
    pub fn expected_loss(&self, pd: f64, lgd: f64) -> Result<f64, CapitalError> {
        expected_loss(pd, lgd)
    }

    /// Asset correlation `rho(pd)`.
    pub fn asset_correlation(&self, pd: f64) -> Result<f64, CapitalError> {
        asset_correlation_with(pd, self.correlation_formula)
    }

    /// Capital requirement `k` for an explicit correlation.
    pub fn capital_requirement(&self, pd: f64, lgd: f64, rho: f64) -> Result<f64, CapitalError> {
        super::capital::capital_requirement(pd, lgd, rho)
    }

    /// Rounded risk-weighted exposure amount for a capital requirement.
    pub fn risk_weighted_exposure_amount(&self, k: f64, ead: f64) -> Result<i64, CapitalError> {
        risk_weighted_exposure_amount_with(k, ead, self.rounding)
    }

    /// Unrounded risk weight per unit of EAD, `k * 12.5 * 1.06`.
    pub fn risk_weight(&self, pd: f64, lgd: f64) -> Result<f64, CapitalError> {
        let el = expected_loss(pd, lgd)?;
        let rho = self.correlation_formula.correlation(validate_pd(pd)?);
        let k = capital_from_parts(pd, lgd, rho, el)?;
        Ok(risk_weight_from_capital(k))
    }

    /// Computes all four metrics for one exposure.
    ///
    /// Each helper is evaluated exactly once; the exposure either yields a
    /// complete [`RiskMetrics`] or an error, never a partial result.
    ///
    /// # Errors
    /// `CapitalError::InvalidParameter` for out-of-domain inputs, or
    /// `CapitalError::NumericDomain` when an intermediate leaves its domain.
    pub fn compute(&self, input: &ExposureInput) -> Result<RiskMetrics, CapitalError> {
        input.validate()?;
        let ExposureInput { pd, lgd, ead } = *input;

        let expected_loss = pd * lgd;
        let asset_correlation = self.correlation_formula.correlation(pd);
        let capital_requirement = capital_from_parts(pd, lgd, asset_correlation, expected_loss)?;
        let risk_weighted_exposure_amount =
            risk_weighted_exposure_amount_with(capital_requirement, ead, self.rounding)?;

        trace!(
            pd,
            lgd,
            ead,
            rho = asset_correlation,
            k = capital_requirement,
            rwa = risk_weighted_exposure_amount,
            "computed exposure metrics"
        );

        Ok(RiskMetrics {
            expected_loss,
            asset_correlation,
            capital_requirement,
            risk_weighted_exposure_amount,
        })
    }
}
