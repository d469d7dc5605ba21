//! Pricing engines.

pub mod analytic;
