//! Compute command implementation
//!
//! Reads exposures from CSV (`id,pd,lgd,ead`, `id` optional) and computes
//! their metrics with `capital_core::batch`.

use std::io;
use std::path::Path;

use capital_core::batch::evaluate_batch_with;
use capital_core::{BatchSummary, CalculatorConfig, ExposureInput};
use serde::Deserialize;
use tracing::{info, warn};

use super::output::{render, OutputFormat, ResultRow};
use crate::{CliError, Result};

/// One CSV data row.
#[derive(Debug, Clone, Deserialize)]
pub struct ExposureRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub pd: f64,
    pub lgd: f64,
    pub ead: f64,
}

impl ExposureRecord {
    fn input(&self) -> ExposureInput {
        ExposureInput {
            pd: self.pd,
            lgd: self.lgd,
            ead: self.ead,
        }
    }
}

fn record_id(record: &ExposureRecord, index: usize) -> String {
    record
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| index.to_string())
}

/// Reads every exposure record from a CSV source.
pub fn read_exposures<R: io::Read>(source: R) -> Result<Vec<ExposureRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<ExposureRecord>, _>>()
        .map_err(CliError::from)
}

/// Computes result rows and the summary over the successful exposures.
///
/// With `fail_fast`, the lowest failing row aborts the run.
pub fn compute_rows(
    config: &CalculatorConfig,
    records: &[ExposureRecord],
    fail_fast: bool,
) -> Result<(Vec<ResultRow>, BatchSummary)> {
    let calculator = config.calculator();
    let inputs: Vec<ExposureInput> = records.iter().map(ExposureRecord::input).collect();
    let outcomes = evaluate_batch_with(&calculator, &inputs, &config.parallel);

    let mut rows = Vec::with_capacity(records.len());
    let mut ok_inputs = Vec::with_capacity(records.len());
    let mut ok_metrics = Vec::with_capacity(records.len());

    for (index, (record, outcome)) in records.iter().zip(&outcomes).enumerate() {
        let id = record_id(record, index);
        match outcome {
            Ok(metrics) => {
                ok_inputs.push(inputs[index]);
                ok_metrics.push(*metrics);
                rows.push(ResultRow::new(index, id, &inputs[index], Ok(metrics)));
            }
            Err(err) if fail_fast => {
                return Err(CliError::Exposure {
                    index,
                    id,
                    source: err.source.clone(),
                });
            }
            Err(err) => {
                warn!(index, id = %id, error = %err.source, "skipping exposure");
                rows.push(ResultRow::new(index, id, &inputs[index], Err(&err.source)));
            }
        }
    }

    Ok((rows, BatchSummary::from_batch(&ok_inputs, &ok_metrics)))
}

/// Run the compute command
pub fn run(
    config: &CalculatorConfig,
    exposures: &Path,
    format: OutputFormat,
    fail_fast: bool,
) -> Result<()> {
    info!("Starting computation...");
    info!("  Exposures: {}", exposures.display());
    info!("  Correlation formula: {}", config.correlation_formula);
    info!("  Rounding: {}", config.rounding);

    if !exposures.exists() {
        return Err(CliError::FileNotFound(exposures.display().to_string()));
    }

    let records = read_exposures(std::fs::File::open(exposures)?)?;
    let (rows, summary) = compute_rows(config, &records, fail_fast)?;

    let stdout = io::stdout();
    render(&mut stdout.lock(), format, &rows, &summary)?;

    info!(
        exposures = rows.len(),
        failed = rows.len() - summary.count,
        total_rwa = summary.total_rwa,
        "Computation complete"
    );
    Ok(())
}
