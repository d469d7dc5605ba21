//! Core traits, common domain types, and library-wide result/error structures.

use serde::{Deserialize, Serialize};

pub mod types;

pub use types::*;

/// Black-Scholes sensitivities in display units.
///
/// `vega` is per 1 volatility point (`∂V/∂σ / 100`), `theta` is per calendar day
/// (`∂V/∂t / 365`), and `rho` is per 1 rate point (`∂V/∂r / 100`). `delta` and `gamma`
/// are unscaled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// First derivative to spot.
    pub delta: f64,
    /// Second derivative to spot.
    pub gamma: f64,
    /// First derivative to volatility, per vol point.
    pub vega: f64,
    /// First derivative to calendar time, per day.
    pub theta: f64,
    /// First derivative to rate, per rate point.
    pub rho: f64,
}

impl Greeks {
    /// All sensitivities zero; the value returned for expired options.
    pub const ZERO: Self = Self {
        delta: 0.0,
        gamma: 0.0,
        vega: 0.0,
        theta: 0.0,
        rho: 0.0,
    };

    /// Vega per unit of volatility, i.e. the true `∂V/∂σ`.
    #[inline]
    pub fn raw_vega(&self) -> f64 {
        self.vega * 100.0
    }
}

/// Pricing engine abstraction over the shared parameter record.
pub trait PricingEngine {
    /// Prices one option.
    fn price(&self, params: &OptionParameters) -> Result<PricingResult, PricingError>;
}

/// Unified engine result payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Present value.
    pub price: f64,
    /// Greeks in display units.
    pub greeks: Greeks,
}

/// Engine and model errors surfaced by the checked API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// Input validation error.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Non-convergence in an iterative algorithm.
    #[error("convergence failure: {0}")]
    ConvergenceFailure(String),
    /// Numerical issue (overflow, invalid state, etc.).
    #[error("numerical error: {0}")]
    NumericalError(String),
}
