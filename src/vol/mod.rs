//! Volatility analytics.

pub mod implied;

pub use implied::{ImpliedVolOutcome, ImpliedVolSolver, SolverConfig, implied_volatility};
