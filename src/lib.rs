//! bscalc prices European calls and puts under Black-Scholes-Merton, computes their
//! Greeks, and inverts market prices to implied volatility.
//!
//! Every computation is a pure function of one [`core::OptionParameters`] record: no
//! caches, no global state, so calls may run concurrently without coordination.
//!
//! References: Hull, *Options, Futures, and Other Derivatives* (11th ed.), Ch. 15 and 19;
//! Abramowitz and Stegun (1964) 26.2.17 for the normal CDF.
//!
//! Numerical considerations:
//! - The normal CDF is a rational approximation with ~7.5e-8 absolute error; prices and
//!   parity identities hold to roughly that level, not to machine precision.
//! - Expired options (`expiry <= 0`) price at intrinsic value with zero Greeks.
//! - The implied-volatility solver always returns a number and reports separately whether
//!   it converged (see [`vol::implied::ImpliedVolOutcome`]).
//!
//! # Quick Start
//! Price a call and read its Greeks:
//! ```rust
//! use bscalc::core::{OptionParameters, OptionType};
//! use bscalc::pricing::european::{black_scholes_greeks, black_scholes_price};
//!
//! let p = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.20);
//! let px = black_scholes_price(&p);
//! assert!(px > 10.0 && px < 11.0);
//!
//! let g = black_scholes_greeks(&p);
//! assert!(g.delta > 0.0 && g.gamma > 0.0 && g.vega > 0.0);
//! ```
//!
//! Invert implied volatility:
//! ```rust
//! use bscalc::core::{OptionParameters, OptionType};
//! use bscalc::pricing::european::black_scholes_price;
//! use bscalc::vol::implied::ImpliedVolSolver;
//!
//! let p = OptionParameters::new(OptionType::Call, 120.0, 100.0, 1.0, 0.05, 0.20);
//! let market = black_scholes_price(&p);
//! let outcome = ImpliedVolSolver::default().solve(market, &p);
//! assert!(outcome.is_converged());
//! assert!((outcome.vol() - 0.20).abs() < 1.0e-3);
//! ```

pub mod core;
pub mod engines;
pub mod math;
pub mod pricing;
pub mod vol;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engines::analytic::*;
    pub use crate::pricing::european::{black_scholes_greeks, black_scholes_price};
    pub use crate::pricing::payoff::{PnlPoint, ProfileSpec, expiry_pnl_profile};
    pub use crate::vol::implied::{
        ImpliedVolOutcome, ImpliedVolSolver, SolverConfig, implied_volatility,
    };
}
