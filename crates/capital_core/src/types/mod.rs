//! Core value types.
//!
//! - `ExposureInput`, `RiskMetrics`: per-exposure input and output values
//! - `CapitalError`, `RiskParameter`: structured errors

pub mod error;
pub mod exposure;

pub use error::{CapitalError, RiskParameter};
pub use exposure::{validate_ead, validate_lgd, validate_pd, ExposureInput, RiskMetrics};
