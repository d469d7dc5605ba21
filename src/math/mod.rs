//! Standard normal density and distribution kernels shared by the pricer, the Greeks, and
//! the implied-volatility solver.
//!
//! `normal_cdf` is the Abramowitz & Stegun 26.2.17 rational approximation. Its maximum
//! absolute error is about `7.5e-8`, so results downstream (prices, parity checks, IV
//! round-trips) should never be compared more tightly than that.

use std::f64::consts::PI;

const AS_P: f64 = 0.231_641_9;
const AS_B1: f64 = 0.319_381_530;
const AS_B2: f64 = -0.356_563_782;
const AS_B3: f64 = 1.781_477_937;
const AS_B4: f64 = -1.821_255_978;
const AS_B5: f64 = 1.330_274_429;
const AS_C: f64 = 0.398_942_28;

/// Standard normal probability density `exp(-x²/2) / sqrt(2π)`.
///
/// # Examples
/// ```
/// use bscalc::math::normal_pdf;
///
/// assert!((normal_pdf(0.0) - 0.398_942_280_4).abs() < 1e-10);
/// assert_eq!(normal_pdf(1.3), normal_pdf(-1.3));
/// ```
#[inline]
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution `P(Z <= x)`.
///
/// The polynomial is only evaluated on `x >= 0`; negative arguments use `1 - Φ(-x)`.
///
/// # Examples
/// ```
/// use bscalc::math::normal_cdf;
///
/// assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
/// assert!((normal_cdf(-1.96) - 0.025).abs() < 1e-4);
/// ```
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + AS_P * z);
    let poly = ((((AS_B5 * t + AS_B4) * t + AS_B3) * t + AS_B2) * t + AS_B1) * t;
    let upper = 1.0 - AS_C * (-0.5 * z * z).exp() * poly;
    if x >= 0.0 { upper } else { 1.0 - upper }
}
