//! Single command implementation
//!
//! Computes the metrics of one exposure given on the command line.

use std::io;

use capital_core::{BatchSummary, CalculatorConfig, ExposureInput};
use tracing::info;

use super::output::{render, OutputFormat, ResultRow};
use crate::Result;

/// Run the single command
pub fn run(config: &CalculatorConfig, pd: f64, lgd: f64, ead: f64, format: OutputFormat) -> Result<()> {
    let input = ExposureInput::new(pd, lgd, ead)?;
    let metrics = config.calculator().compute(&input)?;
    info!(rwa = metrics.risk_weighted_exposure_amount, "Computation complete");

    let rows = [ResultRow::new(0, "single".to_string(), &input, Ok(&metrics))];
    let summary = BatchSummary::from_batch(&[input], &[metrics]);

    let stdout = io::stdout();
    render(&mut stdout.lock(), format, &rows, &summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_single_valid() {
        assert!(run(&CalculatorConfig::default(), 0.1, 0.5, 1_000_000.0, OutputFormat::Csv).is_ok());
    }

    #[test]
    fn test_single_invalid_is_capital_error() {
        let err = run(&CalculatorConfig::default(), 1.0, 0.5, 1.0, OutputFormat::Table).unwrap_err();
        assert!(matches!(err, CliError::Capital(_)));
        assert!(err.to_string().contains("pd = 1"));
    }
}
