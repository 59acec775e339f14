//! Check command implementation
//!
//! Prints the effective configuration and evaluates a reference exposure as
//! a self-test of the numerical routines.

use capital_core::irb::{RiskWeightCalculator, CONFIDENCE_LEVEL};
use capital_core::math::norm_inv_cdf;
use capital_core::{CalculatorConfig, CorrelationFormula, ExposureInput};
use tracing::info;

use crate::{CliError, Result};

/// Expected RWA of the exposure (pd 0.1, lgd 0.5, ead 1,000,000).
///
/// Neither value sits on a rounding tie, so both rounding policies agree.
fn reference_rwa(formula: CorrelationFormula) -> i64 {
    match formula {
        CorrelationFormula::Interpolated => 935_432,
        CorrelationFormula::LiteralGrouping => 848_418,
    }
}

/// Evaluates the reference exposure with `calculator`.
fn reference_check(calculator: &RiskWeightCalculator) -> Result<i64> {
    let input = ExposureInput::new(0.1, 0.5, 1_000_000.0)?;
    let rwa = calculator.compute(&input)?.risk_weighted_exposure_amount;
    let expected = reference_rwa(calculator.correlation_formula());
    if rwa == expected {
        Ok(rwa)
    } else {
        Err(CliError::SelfCheck(format!(
            "reference exposure produced RWA {} under {}, expected {}",
            rwa,
            calculator.correlation_formula(),
            expected
        )))
    }
}

/// Run the check command
pub fn run(config: &CalculatorConfig) -> Result<()> {
    info!("Checking configuration...");

    println!("irb {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Configuration:");
    println!("  correlation_formula: {}", config.correlation_formula);
    println!("  rounding:            {}", config.rounding);
    println!("  log_level:           {}", config.log_level);
    println!("  batch_size:          {}", config.parallel.batch_size);
    println!("  parallel_threshold:  {}", config.parallel.parallel_threshold);
    println!();

    let quantile = norm_inv_cdf(CONFIDENCE_LEVEL)?;
    println!("Reference values:");
    println!("  inverse normal at {}: {:.12}", CONFIDENCE_LEVEL, quantile);

    let rwa = reference_check(&config.calculator())?;
    println!("  RWA(pd=0.1, lgd=0.5, ead=1000000): {} [ok]", rwa);

    info!("Check complete");
    Ok(())
}
