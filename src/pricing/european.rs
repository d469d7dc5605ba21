//! Module `pricing::european`.
//!
//! Closed-form Black-Scholes-Merton price and Greeks for European options on a
//! non-dividend-paying underlying: `black_scholes_price`, `black_scholes_greeks`.
//!
//! References: Hull (11th ed.), Ch. 15 and 19.
//!
//! Edge policies:
//! - `expiry <= 0`: price is intrinsic value and every Greek is zero.
//! - `vol <= 0` with `expiry > 0` is outside the closed-form domain. Price falls back to
//!   the discounted forward intrinsic `max(0, ±(S - K·e^{-rT}))`, the `σ → 0` limit, and
//!   Greeks are zero. The implied-volatility solver never reaches this branch because it
//!   clamps its iterate to a positive floor.
//! - Negative or zero `spot`/`strike` are not checked here; NaN/∞ propagate. Use
//!   [`OptionParameters::validate`] upstream.

use crate::core::{Greeks, OptionParameters, OptionType};
use crate::math::{normal_cdf, normal_pdf};

const DAYS_PER_YEAR: f64 = 365.0;
const PERCENT: f64 = 100.0;

/// `(d1, d2)` for the general branch `expiry > 0`, `vol > 0`.
#[inline]
pub(crate) fn d1_d2(params: &OptionParameters) -> (f64, f64) {
    let sig_sqrt_t = params.vol * params.expiry.sqrt();
    let d1 = ((params.spot / params.strike).ln()
        + (params.rate + 0.5 * params.vol * params.vol) * params.expiry)
        / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// Intrinsic value `max(0, S-K)` / `max(0, K-S)`.
#[inline]
pub fn intrinsic_value(params: &OptionParameters) -> f64 {
    params.intrinsic()
}

/// Black-Scholes-Merton price with zero dividend yield.
///
/// # Examples
/// ```rust
/// use bscalc::core::{OptionParameters, OptionType};
/// use bscalc::pricing::european::black_scholes_price;
///
/// let call = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.20);
/// let put = call.with_option_type(OptionType::Put);
/// assert!((black_scholes_price(&call) - 10.4506).abs() < 1e-3);
/// assert!(black_scholes_price(&call) > black_scholes_price(&put));
/// ```
pub fn black_scholes_price(params: &OptionParameters) -> f64 {
    if params.expiry <= 0.0 {
        return intrinsic_value(params);
    }
    let df = (-params.rate * params.expiry).exp();
    if params.vol <= 0.0 {
        return params.option_type.intrinsic(params.spot, params.strike * df);
    }

    let (d1, d2) = d1_d2(params);
    match params.option_type {
        OptionType::Call => params.spot * normal_cdf(d1) - params.strike * df * normal_cdf(d2),
        OptionType::Put => params.strike * df * normal_cdf(-d2) - params.spot * normal_cdf(-d1),
    }
}

/// Black-Scholes Greeks in display units (see [`Greeks`]).
///
/// Gamma and vega do not depend on the option side and are computed by the same
/// expression for both, so call and put values are bitwise identical.
///
/// # Examples
/// ```rust
/// use bscalc::core::{OptionParameters, OptionType};
/// use bscalc::pricing::european::black_scholes_greeks;
///
/// let p = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.20);
/// let g = black_scholes_greeks(&p);
/// assert!(g.delta > 0.5 && g.gamma > 0.0 && g.vega > 0.0);
/// assert!(g.theta < 0.0 && g.rho > 0.0);
/// ```
pub fn black_scholes_greeks(params: &OptionParameters) -> Greeks {
    if params.expiry <= 0.0 || params.vol <= 0.0 {
        return Greeks::ZERO;
    }

    let OptionParameters {
        option_type,
        spot: s,
        strike: k,
        expiry: t,
        rate: r,
        vol: sigma,
    } = *params;

    let (d1, d2) = d1_d2(params);
    let sqrt_t = t.sqrt();
    let exp_rt = (-r * t).exp();
    let pdf_d1 = normal_pdf(d1);
    let cdf_d1 = normal_cdf(d1);

    let gamma = pdf_d1 / (s * sigma * sqrt_t);
    let vega = s * pdf_d1 * sqrt_t / PERCENT;
    let decay = -s * pdf_d1 * sigma / (2.0 * sqrt_t);

    let (delta, theta, rho) = match option_type {
        OptionType::Call => {
            let cdf_d2 = normal_cdf(d2);
            (
                cdf_d1,
                (decay - r * k * exp_rt * cdf_d2) / DAYS_PER_YEAR,
                k * t * exp_rt * cdf_d2 / PERCENT,
            )
        }
        OptionType::Put => {
            let cdf_neg_d2 = normal_cdf(-d2);
            (
                cdf_d1 - 1.0,
                (decay + r * k * exp_rt * cdf_neg_d2) / DAYS_PER_YEAR,
                -k * t * exp_rt * cdf_neg_d2 / PERCENT,
            )
        }
    };

    Greeks {
        delta,
        gamma,
        vega,
        theta,
        rho,
    }
}
