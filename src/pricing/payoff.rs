//! Module `pricing::payoff`.
//!
//! Profit-and-loss at expiry for a long call and a long put bought at a given premium,
//! sampled across a spot axis centered on the current spot. This is the numeric series a
//! payoff chart plots; drawing it is left to the caller.

use serde::{Deserialize, Serialize};

use crate::core::{OptionParameters, OptionType, PricingError};

/// Spot-axis layout for [`expiry_pnl_profile`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSpec {
    /// Half-width of the axis as a fraction of spot (`0.4` spans ±40%).
    pub range: f64,
    /// Number of equal increments; the profile has `steps + 1` points.
    pub steps: usize,
}

impl Default for ProfileSpec {
    fn default() -> Self {
        Self {
            range: 0.4,
            steps: 50,
        }
    }
}

impl ProfileSpec {
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] when `range` is outside `(0, 1)` or
    /// `steps == 0`.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.range.is_nan() || self.range <= 0.0 || self.range >= 1.0 {
            return Err(PricingError::InvalidInput(format!(
                "profile range must be in (0, 1), got {}",
                self.range
            )));
        }
        if self.steps == 0 {
            return Err(PricingError::InvalidInput("profile steps must be > 0".to_string()));
        }
        Ok(())
    }
}

/// One sample of the expiry P&L profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlPoint {
    /// Spot at expiry.
    pub spot: f64,
    /// Long call payoff minus premium paid.
    pub call_pnl: f64,
    /// Long put payoff minus premium paid.
    pub put_pnl: f64,
}

/// P&L at expiry for a long call and a long put on the contract in `params`.
///
/// The axis runs from `floor(S·(1-range))` to `ceil(S·(1+range))` in `spec.steps` equal
/// increments, so both ends are whole currency units.
///
/// # Errors
/// Returns [`PricingError::InvalidInput`] for an invalid `spec` or non-positive spot.
///
/// # Examples
/// ```rust
/// use bscalc::core::{OptionParameters, OptionType};
/// use bscalc::pricing::payoff::{expiry_pnl_profile, ProfileSpec};
///
/// let p = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2);
/// let pts = expiry_pnl_profile(&p, 10.45, 5.57, &ProfileSpec::default()).unwrap();
/// assert_eq!(pts.len(), 51);
/// assert_eq!(pts[0].spot, 60.0);
/// assert!((pts[0].call_pnl + 10.45).abs() < 1e-12);
/// ```
pub fn expiry_pnl_profile(
    params: &OptionParameters,
    call_premium: f64,
    put_premium: f64,
    spec: &ProfileSpec,
) -> Result<Vec<PnlPoint>, PricingError> {
    spec.validate()?;
    if !params.spot.is_finite() || params.spot <= 0.0 {
        return Err(PricingError::InvalidInput(format!(
            "spot must be finite and > 0, got {}",
            params.spot
        )));
    }

    let lo = (params.spot * (1.0 - spec.range)).floor();
    let hi = (params.spot * (1.0 + spec.range)).ceil();
    let step = (hi - lo) / spec.steps as f64;

    let points = (0..=spec.steps)
        .map(|i| {
            let s = lo + step * i as f64;
            PnlPoint {
                spot: s,
                call_pnl: OptionType::Call.intrinsic(s, params.strike) - call_premium,
                put_pnl: OptionType::Put.intrinsic(s, params.strike) - put_premium,
            }
        })
        .collect();
    Ok(points)
}
