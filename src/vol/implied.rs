//! Black-Scholes implied-volatility inversion.
//!
//! Newton-Raphson on `σ ↦ BS(σ) - market_price` starting from a fixed guess, with the
//! iterate clamped to `(0, max_vol]`. When vega collapses (deep ITM/OTM, very short
//! expiry) or the iteration budget runs out, the solver stops and reports the last
//! iterate together with the reason, so callers can decide whether to trust it.
//! An optional bisection pass can be enabled for those two cases.

use serde::{Deserialize, Serialize};

use crate::core::{OptionParameters, PricingError};
use crate::pricing::european::{black_scholes_greeks, black_scholes_price};

const BISECTION_MAX_STEPS: usize = 200;

/// Tuning knobs for [`ImpliedVolSolver`].
///
/// Every field has a default, so a partial JSON object is a valid config:
/// ```
/// use bscalc::vol::implied::SolverConfig;
///
/// let cfg = SolverConfig::from_json(r#"{ "tolerance": 1e-8 }"#).unwrap();
/// assert_eq!(cfg.tolerance, 1e-8);
/// assert_eq!(cfg.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Starting volatility for Newton.
    pub initial_guess: f64,
    /// Newton iteration cap.
    pub max_iterations: usize,
    /// Target absolute price error.
    pub tolerance: f64,
    /// Replacement for a non-positive Newton step.
    pub min_vol: f64,
    /// Upper clamp for the iterate.
    pub max_vol: f64,
    /// Below this raw vega the Newton step is considered unstable.
    pub vega_floor: f64,
    /// Bisect on `[min_vol, max_vol]` when Newton stalls.
    pub bisection_fallback: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.5,
            max_iterations: 100,
            tolerance: 1e-5,
            min_vol: 1e-5,
            max_vol: 5.0,
            vega_floor: 1e-8,
            bisection_fallback: false,
        }
    }
}

impl SolverConfig {
    /// Parses a JSON config; omitted fields take their defaults.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] for malformed JSON or an invalid config.
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| PricingError::InvalidInput(format!("solver config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns [`PricingError::InvalidInput`] when the bounds or tolerances are unusable.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(PricingError::InvalidInput("tolerance must be > 0".to_string()));
        }
        if self.max_iterations == 0 {
            return Err(PricingError::InvalidInput("max_iterations must be > 0".to_string()));
        }
        let bounds_ok =
            self.min_vol > 0.0 && self.min_vol < self.max_vol && self.max_vol.is_finite();
        if !bounds_ok {
            return Err(PricingError::InvalidInput(format!(
                "vol bounds must satisfy 0 < min_vol < max_vol, got [{}, {}]",
                self.min_vol, self.max_vol
            )));
        }
        if self.initial_guess.is_nan()
            || self.initial_guess <= 0.0
            || self.initial_guess > self.max_vol
        {
            return Err(PricingError::InvalidInput(format!(
                "initial_guess must be in (0, max_vol], got {}",
                self.initial_guess
            )));
        }
        if self.vega_floor.is_nan() || self.vega_floor < 0.0 {
            return Err(PricingError::InvalidInput("vega_floor must be >= 0".to_string()));
        }
        Ok(())
    }
}

/// How an implied-volatility solve ended.
///
/// Every variant carries a usable volatility via [`ImpliedVolOutcome::vol`]; only
/// [`ImpliedVolOutcome::is_converged`] says whether it reprices the market within
/// tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImpliedVolOutcome {
    /// Market price at or below intrinsic value; there is no time value to explain.
    NoTimeValue,
    /// Newton reached the price tolerance.
    Converged { vol: f64, iterations: usize },
    /// Vega fell below the floor; `vol` is the iterate at that point.
    VegaCollapsed {
        vol: f64,
        iterations: usize,
        residual: f64,
    },
    /// Iteration budget spent without reaching tolerance.
    ///
    /// `residual` is the price error of the last evaluated iterate.
    Exhausted {
        vol: f64,
        iterations: usize,
        residual: f64,
    },
    /// Newton stalled and the bisection fallback reached the price tolerance.
    Bisected { vol: f64, iterations: usize },
}

impl ImpliedVolOutcome {
    /// Best volatility estimate; `0.0` when there is no time value.
    pub fn vol(&self) -> f64 {
        match *self {
            Self::NoTimeValue => 0.0,
            Self::Converged { vol, .. }
            | Self::VegaCollapsed { vol, .. }
            | Self::Exhausted { vol, .. }
            | Self::Bisected { vol, .. } => vol,
        }
    }

    /// Pricing evaluations spent (Newton plus bisection).
    pub fn iterations(&self) -> usize {
        match *self {
            Self::NoTimeValue => 0,
            Self::Converged { iterations, .. }
            | Self::VegaCollapsed { iterations, .. }
            | Self::Exhausted { iterations, .. }
            | Self::Bisected { iterations, .. } => iterations,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(
            self,
            Self::NoTimeValue | Self::Converged { .. } | Self::Bisected { .. }
        )
    }

    /// Short machine-friendly status label.
    pub fn status(&self) -> &'static str {
        match self {
            Self::NoTimeValue => "no_time_value",
            Self::Converged { .. } => "converged",
            Self::VegaCollapsed { .. } => "vega_collapsed",
            Self::Exhausted { .. } => "exhausted",
            Self::Bisected { .. } => "bisected",
        }
    }

    /// Strict view: the volatility if the solve converged, an error otherwise.
    ///
    /// # Errors
    /// Returns [`PricingError::ConvergenceFailure`] for `VegaCollapsed` and `Exhausted`.
    pub fn into_result(self) -> Result<f64, PricingError> {
        match self {
            Self::VegaCollapsed {
                vol,
                iterations,
                residual,
            } => Err(PricingError::ConvergenceFailure(format!(
                "vega collapsed after {iterations} iterations at vol={vol}, residual={residual:e}"
            ))),
            Self::Exhausted {
                vol,
                iterations,
                residual,
            } => Err(PricingError::ConvergenceFailure(format!(
                "no convergence after {iterations} iterations, last vol={vol}, residual={residual:e}"
            ))),
            other => Ok(other.vol()),
        }
    }
}

/// Newton-Raphson implied-volatility solver.
///
/// # Examples
/// ```
/// use bscalc::core::{OptionParameters, OptionType};
/// use bscalc::pricing::european::black_scholes_price;
/// use bscalc::vol::implied::ImpliedVolSolver;
///
/// let params = OptionParameters::new(OptionType::Put, 100.0, 110.0, 0.75, 0.01, 0.35);
/// let market = black_scholes_price(&params);
///
/// let outcome = ImpliedVolSolver::default().solve(market, &params);
/// assert!(outcome.is_converged());
/// assert!((outcome.vol() - 0.35).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImpliedVolSolver {
    config: SolverConfig,
}

impl ImpliedVolSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Recovers the volatility that reprices `market_price`.
    ///
    /// `params.vol` is ignored. Inputs are not validated; see [`Self::solve_checked`].
    pub fn solve(&self, market_price: f64, params: &OptionParameters) -> ImpliedVolOutcome {
        let cfg = &self.config;

        let intrinsic = params.intrinsic();
        if market_price <= intrinsic {
            tracing::debug!(market_price, intrinsic, "no time value, implied vol is zero");
            return ImpliedVolOutcome::NoTimeValue;
        }

        let mut sigma = cfg.initial_guess;
        let mut residual = f64::NAN;

        for i in 0..cfg.max_iterations {
            let trial = params.with_vol(sigma);
            let diff = black_scholes_price(&trial) - market_price;
            let raw_vega = black_scholes_greeks(&trial).raw_vega();
            tracing::trace!(iteration = i, sigma, diff, raw_vega, "newton step");

            if diff.abs() < cfg.tolerance {
                let outcome = ImpliedVolOutcome::Converged {
                    vol: sigma,
                    iterations: i + 1,
                };
                log_outcome(&outcome);
                return outcome;
            }

            if raw_vega.abs() < cfg.vega_floor {
                let stalled = ImpliedVolOutcome::VegaCollapsed {
                    vol: sigma,
                    iterations: i + 1,
                    residual: diff,
                };
                return self.finish(stalled, market_price, params);
            }

            sigma -= diff / raw_vega;
            if sigma <= 0.0 {
                sigma = cfg.min_vol;
            }
            if sigma > cfg.max_vol {
                sigma = cfg.max_vol;
            }
            residual = diff;
        }

        let exhausted = ImpliedVolOutcome::Exhausted {
            vol: sigma,
            iterations: cfg.max_iterations,
            residual,
        };
        self.finish(exhausted, market_price, params)
    }

    /// [`Self::solve`] behind input and config validation.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] for a negative or non-finite market price,
    /// contract fields outside their domain, or an invalid [`SolverConfig`].
    pub fn solve_checked(
        &self,
        market_price: f64,
        params: &OptionParameters,
    ) -> Result<ImpliedVolOutcome, PricingError> {
        self.config.validate()?;
        params.validate_contract()?;
        if !market_price.is_finite() || market_price < 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "market_price must be finite and >= 0, got {market_price}"
            )));
        }
        Ok(self.solve(market_price, params))
    }

    fn finish(
        &self,
        stalled: ImpliedVolOutcome,
        market_price: f64,
        params: &OptionParameters,
    ) -> ImpliedVolOutcome {
        let outcome = if self.config.bisection_fallback {
            self.bisect(market_price, params, stalled.iterations())
        } else {
            stalled
        };
        log_outcome(&outcome);
        outcome
    }

    fn bisect(
        &self,
        market_price: f64,
        params: &OptionParameters,
        spent: usize,
    ) -> ImpliedVolOutcome {
        let cfg = &self.config;
        let excess = |sigma: f64| black_scholes_price(&params.with_vol(sigma)) - market_price;

        let mut lo = cfg.min_vol;
        let mut hi = cfg.max_vol;
        let mut f_lo = excess(lo);
        let mut evaluations = spent + 1;

        for _ in 0..BISECTION_MAX_STEPS {
            let mid = 0.5 * (lo + hi);
            let f_mid = excess(mid);
            evaluations += 1;
            if f_mid.abs() < cfg.tolerance {
                return ImpliedVolOutcome::Bisected {
                    vol: mid,
                    iterations: evaluations,
                };
            }
            if f_lo * f_mid <= 0.0 {
                hi = mid;
            } else {
                lo = mid;
                f_lo = f_mid;
            }
        }

        let mid = 0.5 * (lo + hi);
        ImpliedVolOutcome::Exhausted {
            vol: mid,
            iterations: evaluations + 1,
            residual: excess(mid),
        }
    }
}

fn log_outcome(outcome: &ImpliedVolOutcome) {
    tracing::debug!(
        status = outcome.status(),
        vol = outcome.vol(),
        iterations = outcome.iterations(),
        "implied vol solve finished"
    );
}

/// Implied volatility with the default solver, always returning a number.
///
/// Non-converged solves return their best iterate; use [`ImpliedVolSolver::solve`] to
/// inspect how the solve ended.
///
/// # Examples
/// ```
/// use bscalc::core::{OptionParameters, OptionType};
/// use bscalc::pricing::european::black_scholes_price;
/// use bscalc::vol::implied::implied_volatility;
///
/// let params = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.3);
/// let iv = implied_volatility(black_scholes_price(&params), &params);
/// assert!((iv - 0.3).abs() < 1e-3);
/// ```
pub fn implied_volatility(market_price: f64, params: &OptionParameters) -> f64 {
    ImpliedVolSolver::default().solve(market_price, params).vol()
}
