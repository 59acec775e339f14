//! Batch evaluation over ordered exposure sequences.
//!
//! Results are produced by an explicit map, indexed identically to the input
//! slice. A failing exposure is reported with its index rather than skipped.
//!
//! ## Example
//!
//! ```
//! use capital_core::batch::{compute_batch, evaluate_batch};
//! use capital_core::irb::RiskWeightCalculator;
//! use capital_core::types::ExposureInput;
//!
//! let calc = RiskWeightCalculator::default();
//! let inputs = vec![
//!     ExposureInput { pd: 0.1, lgd: 0.5, ead: 1_000_000.0 },
//!     ExposureInput { pd: 0.0, lgd: 0.5, ead: 1_000_000.0 },
//! ];
//!
//! let outcomes = evaluate_batch(&calc, &inputs);
//! assert!(outcomes[0].is_ok());
//! assert_eq!(outcomes[1].as_ref().unwrap_err().index, 1);
//!
//! let err = compute_batch(&calc, &inputs).unwrap_err();
//! assert_eq!(err.index, 1);
//! ```

pub mod parallel;

pub use parallel::{ordered_map, ParallelConfig, DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::irb::RiskWeightCalculator;
use crate::types::{CapitalError, ExposureInput, RiskMetrics};

/// Failure of one exposure inside a batch.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Exposure {index} failed: {source}")]
pub struct BatchError {
    /// Position of the failing exposure in the input slice
    pub index: usize,
    /// Underlying calculation error
    #[source]
    pub source: CapitalError,
}

/// Evaluates every exposure, keeping per-exposure outcomes.
///
/// Uses [`ParallelConfig::default`]; see [`evaluate_batch_with`].
pub fn evaluate_batch(
    calculator: &RiskWeightCalculator,
    inputs: &[ExposureInput],
) -> Vec<Result<RiskMetrics, BatchError>> {
    evaluate_batch_with(calculator, inputs, &ParallelConfig::default())
}

/// Evaluates every exposure with an explicit parallel configuration.
///
/// The returned vector has exactly `inputs.len()` entries in input order.
pub fn evaluate_batch_with(
    calculator: &RiskWeightCalculator,
    inputs: &[ExposureInput],
    config: &ParallelConfig,
) -> Vec<Result<RiskMetrics, BatchError>> {
    debug!(
        exposures = inputs.len(),
        parallel = config.should_parallelize(inputs.len()),
        "evaluating exposure batch"
    );

    let outcomes = ordered_map(inputs, config, |index, input| {
        calculator
            .compute(input)
            .map_err(|source| BatchError { index, source })
    });

    for err in outcomes.iter().filter_map(|outcome| outcome.as_ref().err()) {
        warn!(index = err.index, error = %err.source, "exposure rejected");
    }

    outcomes
}

/// Computes metrics for every exposure, failing if any exposure fails.
///
/// On failure the error names the lowest failing index.
pub fn compute_batch(
    calculator: &RiskWeightCalculator,
    inputs: &[ExposureInput],
) -> Result<Vec<RiskMetrics>, BatchError> {
    compute_batch_with(calculator, inputs, &ParallelConfig::default())
}

/// All-or-nothing batch computation with an explicit parallel configuration.
pub fn compute_batch_with(
    calculator: &RiskWeightCalculator,
    inputs: &[ExposureInput],
    config: &ParallelConfig,
) -> Result<Vec<RiskMetrics>, BatchError> {
    evaluate_batch_with(calculator, inputs, config)
        .into_iter()
        .collect()
}

/// Aggregate figures over a successfully computed batch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BatchSummary {
    /// Number of exposures
    pub count: usize,
    /// Sum of EAD
    pub total_ead: f64,
    /// Sum of RWA, saturating at the i64 bounds
    pub total_rwa: i64,
    /// Total RWA divided by total EAD (0 when total EAD is 0)
    pub rwa_density: f64,
    /// Sum of expected loss amounts, `EL * EAD`
    pub expected_loss_amount: f64,
}

impl BatchSummary {
    /// Builds a summary from matching input and output slices.
    ///
    /// Pairs are zipped, so extra elements in the longer slice are ignored.
    pub fn from_batch(inputs: &[ExposureInput], metrics: &[RiskMetrics]) -> Self {
        let mut summary = inputs
            .iter()
            .zip(metrics)
            .fold(Self::default(), |mut acc, (input, m)| {
                acc.count += 1;
                acc.total_ead += input.ead;
                acc.total_rwa = acc.total_rwa.saturating_add(m.risk_weighted_exposure_amount);
                acc.expected_loss_amount += m.expected_loss * input.ead;
                acc
            });

        summary.rwa_density = if summary.total_ead > 0.0 {
            summary.total_rwa as f64 / summary.total_ead
        } else {
            0.0
        };
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskParameter;
    use approx::assert_relative_eq;

    fn sample_inputs(n: usize) -> Vec<ExposureInput> {
        (0..n)
            .map(|i| ExposureInput {
                pd: 0.001 + (i % 97) as f64 * 0.009,
                lgd: 0.1 + (i % 9) as f64 * 0.1,
                ead: 10_000.0 + i as f64 * 250.0,
            })
            .collect()
    }

    #[test]
    fn test_results_indexed_like_inputs() {
        let calc = RiskWeightCalculator::default();
        let inputs = sample_inputs(50);
        let metrics = compute_batch(&calc, &inputs).unwrap();

        assert_eq!(metrics.len(), inputs.len());
        for (input, m) in inputs.iter().zip(&metrics) {
            assert_eq!(*m, calc.compute(input).unwrap());
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let calc = RiskWeightCalculator::default();
        let inputs = sample_inputs(5_000);

        let parallel = compute_batch_with(&calc, &inputs, &ParallelConfig::new(16, 1)).unwrap();
        let sequential =
            compute_batch_with(&calc, &inputs, &ParallelConfig::sequential()).unwrap();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_failure_reports_index() {
        let calc = RiskWeightCalculator::default();
        let mut inputs = sample_inputs(10);
        inputs[3].lgd = 1.5;
        inputs[7].pd = 0.0;

        let outcomes = evaluate_batch(&calc, &inputs);
        assert_eq!(outcomes.len(), 10);
        assert!(outcomes[2].is_ok());

        let err3 = outcomes[3].as_ref().unwrap_err();
        assert_eq!(err3.index, 3);
        assert_eq!(err3.source.parameter(), RiskParameter::Lgd);

        let err7 = outcomes[7].as_ref().unwrap_err();
        assert_eq!(err7.index, 7);
        assert_eq!(err7.source.parameter(), RiskParameter::Pd);
    }

    #[test]
    fn test_compute_batch_reports_lowest_failing_index() {
        let calc = RiskWeightCalculator::default();
        let mut inputs = sample_inputs(1_000);
        inputs[900].ead = -1.0;
        inputs[400].pd = 1.0;

        let err = compute_batch_with(&calc, &inputs, &ParallelConfig::new(8, 1)).unwrap_err();
        assert_eq!(err.index, 400);
        assert_eq!(err.source.parameter(), RiskParameter::Pd);
    }

    #[test]
    fn test_batch_error_display() {
        let err = BatchError {
            index: 4,
            source: CapitalError::InvalidParameter {
                parameter: RiskParameter::Ead,
                value: -5.0,
            },
        };
        assert_eq!(
            err.to_string(),
            "Exposure 4 failed: Invalid parameter: ead = -5, expected [0, +inf)"
        );
    }

    #[test]
    fn test_empty_batch() {
        let calc = RiskWeightCalculator::default();
        assert!(compute_batch(&calc, &[]).unwrap().is_empty());
        assert_eq!(BatchSummary::from_batch(&[], &[]), BatchSummary::default());
    }

    #[test]
    fn test_summary() {
        let calc = RiskWeightCalculator::default();
        let inputs = vec![
            ExposureInput { pd: 0.1, lgd: 0.5, ead: 1_000_000.0 },
            ExposureInput { pd: 0.2, lgd: 0.6, ead: 2_000_000.0 },
            ExposureInput { pd: 0.3, lgd: 0.7, ead: 3_000_000.0 },
        ];
        let metrics = compute_batch(&calc, &inputs).unwrap();
        let summary = BatchSummary::from_batch(&inputs, &metrics);

        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_ead, 6_000_000.0);
        assert_eq!(summary.total_rwa, 935_432 + 2_913_060 + 5_776_906);
        assert_relative_eq!(summary.rwa_density, 9_625_398.0 / 6_000_000.0, epsilon = 1e-12);
        assert_relative_eq!(
            summary.expected_loss_amount,
            0.05 * 1_000_000.0 + 0.12 * 2_000_000.0 + 0.21 * 3_000_000.0,
            epsilon = 1e-6
        );
    }
}
