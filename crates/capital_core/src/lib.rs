//! # capital_core: IRB Risk Weights for Retail Exposures
//!
//! Implements the Internal Ratings-Based formulas of CRR Article 154 that map
//! a single exposure `(pd, lgd, ead)` to its regulatory capital figures:
//!
//! - Expected loss `EL = pd * lgd` (`irb::expected_loss`)
//! - Asset correlation `rho(pd)` interpolated between 0.16 and 0.03
//!   (`irb::asset_correlation`)
//! - Capital requirement `k` at the 99.9% systematic stress scenario
//!   (`irb::capital_requirement`)
//! - Risk-weighted exposure amount `round(k * 12.5 * 1.06 * EAD)`
//!   (`irb::risk_weighted_exposure_amount`)
//!
//! ## Layout
//!
//! - `types`: exposure inputs, metrics and `CapitalError`
//! - `math`: standard normal distribution functions
//! - `irb`: the four formulas and `RiskWeightCalculator`
//! - `batch`: ordered, optionally parallel evaluation of many exposures
//! - `config`: TOML configuration with environment overrides
//!
//! ## Usage Examples
//!
//! ```rust
//! use capital_core::irb::RiskWeightCalculator;
//! use capital_core::types::ExposureInput;
//!
//! let calculator = RiskWeightCalculator::default();
//! let input = ExposureInput::new(0.1, 0.5, 1_000_000.0).unwrap();
//! let metrics = calculator.compute(&input).unwrap();
//!
//! assert_eq!(metrics.expected_loss, 0.05);
//! assert!((metrics.asset_correlation - 0.0339256598449).abs() < 1e-12);
//! assert!((metrics.capital_requirement - 0.0705986597298).abs() < 1e-12);
//! assert_eq!(metrics.risk_weighted_exposure_amount, 935_432);
//! ```
//!
//! All computations are pure functions of their inputs. Out-of-domain inputs
//! are rejected with `CapitalError::InvalidParameter`, never clamped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod batch;
pub mod config;
pub mod irb;
pub mod math;
pub mod types;

pub use batch::{compute_batch, evaluate_batch, BatchError, BatchSummary, ParallelConfig};
pub use config::{CalculatorConfig, ConfigError};
pub use irb::{
    asset_correlation, capital_requirement, compute_metrics, expected_loss,
    risk_weighted_exposure_amount, CorrelationFormula, RiskWeightCalculator, RoundingPolicy,
};
pub use types::{CapitalError, ExposureInput, RiskMetrics, RiskParameter};
