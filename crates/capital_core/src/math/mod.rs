//! Mathematical building blocks.
//!
//! - `distributions`: standard normal φ, Φ and Φ⁻¹

pub mod distributions;

pub use distributions::{norm_cdf, norm_inv_cdf, norm_pdf};
