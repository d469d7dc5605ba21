use serde::{Deserialize, Serialize};

use crate::core::PricingError;

/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Returns +1.0 for calls and -1.0 for puts.
    pub fn sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }

    /// Payoff if exercised now: `max(0, S-K)` for calls, `max(0, K-S)` for puts.
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }
}

impl std::str::FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            other => Err(PricingError::InvalidInput(format!(
                "unknown option type `{other}`, expected call or put"
            ))),
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => f.write_str("call"),
            Self::Put => f.write_str("put"),
        }
    }
}

/// The five scalar model inputs plus the option side, shared by pricing, Greeks, and
/// implied-volatility inversion.
///
/// Units: `expiry` in years, `rate` and `vol` as annualized decimals (`0.05` is 5%).
///
/// # Examples
/// ```
/// use bscalc::core::{OptionParameters, OptionType};
///
/// let params = OptionParameters::new(OptionType::Call, 100.0, 105.0, 0.5, 0.03, 0.25);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.with_option_type(OptionType::Put).option_type, OptionType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParameters {
    /// Call or put.
    pub option_type: OptionType,
    /// Spot price `S`.
    pub spot: f64,
    /// Strike `K`.
    pub strike: f64,
    /// Time to expiry `T` in years.
    pub expiry: f64,
    /// Continuously compounded risk-free rate `r`.
    pub rate: f64,
    /// Annualized volatility `σ`.
    pub vol: f64,
}

impl OptionParameters {
    /// Builds a parameter record; no validation is performed.
    pub fn new(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        vol: f64,
    ) -> Self {
        Self {
            option_type,
            spot,
            strike,
            expiry,
            rate,
            vol,
        }
    }

    /// Same contract and market, different volatility.
    #[inline]
    pub fn with_vol(self, vol: f64) -> Self {
        Self { vol, ..self }
    }

    /// Same inputs, opposite or explicit side.
    #[inline]
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    #[inline]
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Intrinsic value of the contract at the current spot.
    #[inline]
    pub fn intrinsic(&self) -> f64 {
        self.option_type.intrinsic(self.spot, self.strike)
    }

    /// Checks the domain that the closed-form kernels assume.
    ///
    /// The kernels themselves never call this; it is meant for input-facing layers.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] for non-finite fields, `spot <= 0`,
    /// `strike <= 0`, `expiry < 0`, or `vol <= 0`.
    pub fn validate(&self) -> Result<(), PricingError> {
        self.validate_contract()?;
        if !self.vol.is_finite() || self.vol <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "vol must be finite and > 0, got {}",
                self.vol
            )));
        }
        Ok(())
    }

    /// Like [`Self::validate`] but ignores `vol`, for implied-volatility inputs.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] for any field outside its domain.
    pub fn validate_contract(&self) -> Result<(), PricingError> {
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "spot must be finite and > 0, got {}",
                self.spot
            )));
        }
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "strike must be finite and > 0, got {}",
                self.strike
            )));
        }
        if !self.expiry.is_finite() || self.expiry < 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "expiry must be finite and >= 0, got {}",
                self.expiry
            )));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::InvalidInput(format!(
                "rate must be finite, got {}",
                self.rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_option_type_case_insensitively() {
        assert_eq!("CALL".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" p ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!("straddle".parse::<OptionType>().is_err());
    }

    #[test]
    fn intrinsic_by_side() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(100.0, 100.0), 0.0);
    }

    #[test]
    fn sign_flips_the_payoff_direction() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
        for (s, k) in [(87.5, 100.0), (100.0, 100.0), (112.25, 100.0)] {
            let call = OptionType::Call.intrinsic(s, k);
            let put = OptionType::Put.intrinsic(s, k);
            assert_eq!(call - put, s - k);
        }
    }

    #[test]
    fn validate_rejects_out_of_domain_fields() {
        let ok = OptionParameters::new(OptionType::Put, 100.0, 100.0, 0.0, -0.01, 0.2);
        assert!(ok.validate().is_ok());

        assert!(ok.with_spot(0.0).validate().is_err());
        assert!(ok.with_vol(0.0).validate().is_err());
        assert!(ok.with_vol(f64::NAN).validate().is_err());
        assert!(OptionParameters { strike: -5.0, ..ok }.validate().is_err());
        assert!(OptionParameters { expiry: -0.1, ..ok }.validate().is_err());
        assert!(OptionParameters { rate: f64::INFINITY, ..ok }.validate().is_err());

        assert!(ok.with_vol(0.0).validate_contract().is_ok());
    }

    #[test]
    fn serde_uses_lowercase_option_type() {
        let params = OptionParameters::new(OptionType::Call, 100.0, 95.0, 1.0, 0.05, 0.2);
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"option_type\":\"call\""));
        let back: OptionParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
