//! Integration tests pinning reference exposures end to end.
//!
//! Reference figures were produced independently in double precision and are
//! compared to 1e-12 (k) or exactly (RWA).

use approx::assert_relative_eq;
use capital_core::batch::{compute_batch, evaluate_batch, BatchSummary};
use capital_core::irb::{
    asset_correlation, asset_correlation_with, capital_requirement, compute_metrics,
    expected_loss, risk_weighted_exposure_amount, risk_weighted_exposure_amount_with,
    CorrelationFormula, RiskWeightCalculator, RoundingPolicy,
};
use capital_core::math::{norm_cdf, norm_inv_cdf};
use capital_core::{CalculatorConfig, CapitalError, ExposureInput, RiskParameter};

struct Scenario {
    pd: f64,
    lgd: f64,
    ead: f64,
    rho: f64,
    k: f64,
    rwa: i64,
}

const SCENARIOS: [Scenario; 5] = [
    Scenario {
        pd: 0.1,
        lgd: 0.5,
        ead: 1_000_000.0,
        rho: 0.033_925_659_844_901_31,
        k: 0.070_598_659_729_780_3,
        rwa: 935_432,
    },
    Scenario {
        pd: 0.2,
        lgd: 0.6,
        ead: 2_000_000.0,
        rho: 0.030_118_544_655_521_995,
        k: 0.109_926_805_269_914,
        rwa: 2_913_060,
    },
    Scenario {
        pd: 0.3,
        lgd: 0.7,
        ead: 3_000_000.0,
        rho: 0.030_003_579_738_415_376,
        k: 0.145_330_962_799_642,
        rwa: 5_776_906,
    },
    Scenario {
        pd: 0.01,
        lgd: 0.45,
        ead: 250_000.0,
        rho: 0.121_609_451_663_432_72,
        k: 0.049_361_663_728_482,
        rwa: 163_511,
    },
    Scenario {
        pd: 0.03,
        lgd: 0.45,
        ead: 1_000_000.0,
        rho: 0.075_491_907_384_450_12,
        k: 0.058_140_982_421_332,
        rwa: 770_368,
    },
];

// ================================================================
// Individual operations
// ================================================================

#[test]
fn test_reference_scenarios_step_by_step() {
    for s in &SCENARIOS {
        let el = expected_loss(s.pd, s.lgd).unwrap();
        assert_eq!(el, s.pd * s.lgd);

        let rho = asset_correlation(s.pd).unwrap();
        assert_relative_eq!(rho, s.rho, epsilon = 1e-12);

        let k = capital_requirement(s.pd, s.lgd, rho).unwrap();
        assert_relative_eq!(k, s.k, epsilon = 1e-12);

        assert_eq!(risk_weighted_exposure_amount(k, s.ead).unwrap(), s.rwa, "pd = {}", s.pd);
    }
}

#[test]
fn test_reference_scenarios_via_calculator() {
    let calculator = RiskWeightCalculator::default();
    for s in &SCENARIOS {
        let input = ExposureInput::new(s.pd, s.lgd, s.ead).unwrap();
        let metrics = calculator.compute(&input).unwrap();
        assert_eq!(metrics, compute_metrics(&input).unwrap());
        assert_eq!(metrics.risk_weighted_exposure_amount, s.rwa);
    }
}

#[test]
fn test_full_default_small_exposure() {
    let metrics = compute_metrics(&ExposureInput { pd: 0.5, lgd: 1.0, ead: 100.0 }).unwrap();
    assert_eq!(metrics.expected_loss, 0.5);
    assert_eq!(metrics.risk_weighted_exposure_amount, 274);
}

#[test]
fn test_confidence_quantile() {
    assert_relative_eq!(norm_inv_cdf(0.999_f64).unwrap(), 3.090_232, epsilon = 1e-6);
    assert_relative_eq!(norm_inv_cdf(0.999_f64).unwrap(), 3.090_232_306_167_813, epsilon = 1e-9);
    assert_relative_eq!(norm_cdf(norm_inv_cdf(0.1_f64).unwrap()), 0.1, epsilon = 1e-13);
}

// ================================================================
// Conventions
// ================================================================

#[test]
fn test_literal_grouping_reference_values() {
    // (pd, rho, rwa) for the same exposures as SCENARIOS.
    let literal = [
        (0.1, 0.029_239_025_937_757_557, 848_418),
        (0.2, 0.029_977_020_574_468_01, 2_905_047),
        (0.3, 0.029_999_306_081_476_37, 5_776_463),
        (0.01, 0.012_241_860_139_088_404, 20_454),
        (0.03, 0.021_181_568_722_398_868, 279_669),
    ];
    let calculator =
        RiskWeightCalculator::default().with_correlation_formula(CorrelationFormula::LiteralGrouping);

    for (s, (pd, rho, rwa)) in SCENARIOS.iter().zip(literal) {
        assert_eq!(s.pd, pd);
        let literal_rho = asset_correlation_with(pd, CorrelationFormula::LiteralGrouping).unwrap();
        assert_relative_eq!(literal_rho, rho, epsilon = 1e-15);
        assert!(literal_rho < s.rho);

        let metrics = calculator
            .compute(&ExposureInput { pd, lgd: s.lgd, ead: s.ead })
            .unwrap();
        assert_eq!(metrics.risk_weighted_exposure_amount, rwa, "pd = {}", pd);
        assert!(metrics.risk_weighted_exposure_amount < s.rwa);
    }
}

#[test]
fn test_rounding_policies_on_reference_scenarios() {
    // None of the reference amounts sits on a tie.
    for s in &SCENARIOS {
        let k = capital_requirement(s.pd, s.lgd, s.rho).unwrap();
        assert_eq!(
            risk_weighted_exposure_amount_with(k, s.ead, RoundingPolicy::HalfAwayFromZero)
                .unwrap(),
            s.rwa
        );
    }
}

#[test]
fn test_calculator_from_config() {
    let config = CalculatorConfig::from_toml_str(
        "correlation_formula = \"literal_grouping\"\nrounding = \"half_away_from_zero\"",
    )
    .unwrap();
    let calculator = config.calculator();
    assert_eq!(calculator.correlation_formula(), CorrelationFormula::LiteralGrouping);

    let metrics = calculator
        .compute(&ExposureInput { pd: 0.1, lgd: 0.5, ead: 1_000_000.0 })
        .unwrap();
    assert_eq!(metrics.risk_weighted_exposure_amount, 848_418);
}

// ================================================================
// Errors
// ================================================================

#[test]
fn test_boundary_inputs_rejected() {
    let cases = [
        (0.0, 0.5, 1.0, RiskParameter::Pd),
        (1.0, 0.5, 1.0, RiskParameter::Pd),
        (f64::NAN, 0.5, 1.0, RiskParameter::Pd),
        (0.1, -0.01, 1.0, RiskParameter::Lgd),
        (0.1, 1.01, 1.0, RiskParameter::Lgd),
        (0.1, 0.5, -1.0, RiskParameter::Ead),
        (0.1, 0.5, f64::INFINITY, RiskParameter::Ead),
    ];
    for (pd, lgd, ead, parameter) in cases {
        let err = compute_metrics(&ExposureInput { pd, lgd, ead }).unwrap_err();
        assert!(matches!(err, CapitalError::InvalidParameter { .. }));
        assert_eq!(err.parameter(), parameter);
    }
}

#[test]
fn test_correlation_outside_unit_interval_rejected() {
    for rho in [-0.1, 1.0, 1.5, f64::NAN] {
        let err = capital_requirement(0.1, 0.5, rho).unwrap_err();
        assert!(matches!(err, CapitalError::NumericDomain { .. }));
        assert_eq!(err.parameter(), RiskParameter::AssetCorrelation);
    }
}

// ================================================================
// Batches
// ================================================================

#[test]
fn test_batch_of_reference_scenarios() {
    let calculator = RiskWeightCalculator::default();
    let inputs: Vec<ExposureInput> = SCENARIOS
        .iter()
        .map(|s| ExposureInput { pd: s.pd, lgd: s.lgd, ead: s.ead })
        .collect();

    let metrics = compute_batch(&calculator, &inputs).unwrap();
    let rwas: Vec<i64> = metrics.iter().map(|m| m.risk_weighted_exposure_amount).collect();
    assert_eq!(rwas, SCENARIOS.iter().map(|s| s.rwa).collect::<Vec<_>>());

    let summary = BatchSummary::from_batch(&inputs, &metrics);
    assert_eq!(summary.count, SCENARIOS.len());
    assert_eq!(summary.total_rwa, SCENARIOS.iter().map(|s| s.rwa).sum::<i64>());
}

#[test]
fn test_batch_keeps_good_rows_around_bad_one() {
    let calculator = RiskWeightCalculator::default();
    let inputs = vec![
        ExposureInput { pd: 0.1, lgd: 0.5, ead: 1_000_000.0 },
        ExposureInput { pd: 0.1, lgd: 2.0, ead: 1_000_000.0 },
        ExposureInput { pd: 0.2, lgd: 0.6, ead: 2_000_000.0 },
    ];

    let outcomes = evaluate_batch(&calculator, &inputs);
    assert_eq!(outcomes[0].as_ref().unwrap().risk_weighted_exposure_amount, 935_432);
    assert_eq!(outcomes[1].as_ref().unwrap_err().index, 1);
    assert_eq!(outcomes[2].as_ref().unwrap().risk_weighted_exposure_amount, 2_913_060);
}
