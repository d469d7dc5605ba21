use crate::core::{OptionParameters, PricingEngine, PricingError, PricingResult};
use crate::pricing::european::{black_scholes_greeks, black_scholes_price};

/// Analytic Black-Scholes engine for European vanilla options.
///
/// Unlike the free functions in [`crate::pricing::european`], the engine validates its
/// inputs and reports out-of-domain parameters as errors instead of propagating NaN.
#[derive(Debug, Clone, Default)]
pub struct BlackScholesEngine;

impl BlackScholesEngine {
    /// Creates a Black-Scholes engine instance.
    pub fn new() -> Self {
        Self
    }
}

impl PricingEngine for BlackScholesEngine {
    fn price(&self, params: &OptionParameters) -> Result<PricingResult, PricingError> {
        if let Err(err) = params.validate() {
            tracing::warn!(%err, ?params, "rejected black-scholes inputs");
            return Err(err);
        }

        let price = black_scholes_price(params);
        if !price.is_finite() {
            return Err(PricingError::NumericalError(format!(
                "non-finite price {price} for {params:?}"
            )));
        }

        Ok(PricingResult {
            price,
            greeks: black_scholes_greeks(params),
        })
    }
}
