//! Result rendering shared by the compute commands.

use std::io::Write;

use capital_core::{BatchSummary, CapitalError, ExposureInput, RiskMetrics};
use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// Output format for computed metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table with a summary footer
    Table,
    /// CSV with one row per exposure
    Csv,
    /// JSON document with results and summary
    Json,
}

/// One output line: the exposure plus either its metrics or its error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub index: usize,
    pub id: String,
    pub pd: f64,
    pub lgd: f64,
    pub ead: f64,
    pub expected_loss: Option<f64>,
    pub asset_correlation: Option<f64>,
    pub capital_requirement: Option<f64>,
    pub rwa: Option<i64>,
    pub error: Option<String>,
}

impl ResultRow {
    pub fn new(
        index: usize,
        id: String,
        input: &ExposureInput,
        outcome: std::result::Result<&RiskMetrics, &CapitalError>,
    ) -> Self {
        let mut row = Self {
            index,
            id,
            pd: input.pd,
            lgd: input.lgd,
            ead: input.ead,
            expected_loss: None,
            asset_correlation: None,
            capital_requirement: None,
            rwa: None,
            error: None,
        };
        match outcome {
            Ok(m) => {
                row.expected_loss = Some(m.expected_loss);
                row.asset_correlation = Some(m.asset_correlation);
                row.capital_requirement = Some(m.capital_requirement);
                row.rwa = Some(m.risk_weighted_exposure_amount);
            }
            Err(e) => row.error = Some(e.to_string()),
        }
        row
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [ResultRow],
    summary: &'a BatchSummary,
    failed: usize,
}

fn fmt_opt<T: std::fmt::Display>(value: Option<T>, width: usize, precision: usize) -> String {
    match value {
        Some(v) => format!("{:>width$.precision$}", v, width = width, precision = precision),
        None => format!("{:>width$}", "-", width = width),
    }
}

/// Writes `rows` and `summary` in the requested format.
pub fn render<W: Write>(
    out: &mut W,
    format: OutputFormat,
    rows: &[ResultRow],
    summary: &BatchSummary,
) -> Result<()> {
    let failed = rows.iter().filter(|r| !r.is_ok()).count();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(
                &mut *out,
                &JsonReport {
                    results: rows,
                    summary,
                    failed,
                },
            )?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<12} {:>8} {:>6} {:>14} {:>8} {:>10} {:>10} {:>14}",
                "ID", "PD", "LGD", "EAD", "EL", "RHO", "K", "RWA"
            )?;
            writeln!(out, "{}", "-".repeat(89))?;
            for row in rows {
                write!(
                    out,
                    "{:<12} {:>8.4} {:>6.2} {:>14.2} {} {} {} {}",
                    row.id,
                    row.pd,
                    row.lgd,
                    row.ead,
                    fmt_opt(row.expected_loss, 8, 4),
                    fmt_opt(row.asset_correlation, 10, 6),
                    fmt_opt(row.capital_requirement, 10, 6),
                    fmt_opt(row.rwa, 14, 0),
                )?;
                match &row.error {
                    Some(error) => writeln!(out, "  ERROR: {}", error)?,
                    None => writeln!(out)?,
                }
            }
            writeln!(out, "{}", "-".repeat(89))?;
            writeln!(out, "Exposures:   {} ({} failed)", summary.count + failed, failed)?;
            writeln!(out, "Total EAD:   {:.2}", summary.total_ead)?;
            writeln!(out, "Total RWA:   {}", summary.total_rwa)?;
            writeln!(out, "RWA density: {:.4}", summary.rwa_density)?;
            writeln!(out, "EL amount:   {:.2}", summary.expected_loss_amount)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use capital_core::RiskParameter;

    fn sample_rows() -> (Vec<ResultRow>, BatchSummary) {
        let good_input = ExposureInput { pd: 0.1, lgd: 0.5, ead: 1_000_000.0 };
        let good = capital_core::compute_metrics(&good_input).unwrap();
        let bad_input = ExposureInput { pd: 0.1, lgd: 1.5, ead: 10.0 };
        let bad = CapitalError::InvalidParameter {
            parameter: RiskParameter::Lgd,
            value: 1.5,
        };

        let rows = vec![
            ResultRow::new(0, "A".to_string(), &good_input, Ok(&good)),
            ResultRow::new(1, "B".to_string(), &bad_input, Err(&bad)),
        ];
        let summary = BatchSummary::from_batch(&[good_input], &[good]);
        (rows, summary)
    }

    fn rendered(format: OutputFormat) -> String {
        let (rows, summary) = sample_rows();
        let mut buf = Vec::new();
        render(&mut buf, format, &rows, &summary).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_output() {
        let text = rendered(OutputFormat::Table);
        assert!(text.contains("935432"));
        assert!(text.contains("ERROR: Invalid parameter: lgd = 1.5"));
        assert!(text.contains("Exposures:   2 (1 failed)"));
        assert!(text.contains("Total RWA:   935432"));
    }

    #[test]
    fn test_csv_output() {
        let text = rendered(OutputFormat::Csv);
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "index,id,pd,lgd,ead,expected_loss,asset_correlation,capital_requirement,rwa,error"
        );
        assert!(lines.next().unwrap().contains(",935432,"));
        assert!(lines.next().unwrap().starts_with("1,B,0.1,1.5,10.0,,,,,"));
    }

    #[test]
    fn test_json_output() {
        let value: serde_json::Value = serde_json::from_str(&rendered(OutputFormat::Json)).unwrap();
        assert_eq!(value["results"][0]["rwa"], 935_432);
        assert!(value["results"][1]["rwa"].is_null());
        assert_eq!(value["failed"], 1);
        assert_eq!(value["summary"]["total_rwa"], 935_432);
    }
}
