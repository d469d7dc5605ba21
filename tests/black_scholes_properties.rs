// Model identities checked over seeded random samples of the valid input domain:
// put-call parity, the call/put delta gap, side-independence of gamma and vega,
// the expiry boundary, and monotonicity of the call price in spot and volatility.

use approx::assert_abs_diff_eq;
use bscalc::core::{Greeks, OptionParameters, OptionType};
use bscalc::pricing::european::{black_scholes_greeks, black_scholes_price};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLES: usize = 2_000;

fn random_call(rng: &mut StdRng) -> OptionParameters {
    OptionParameters::new(
        OptionType::Call,
        rng.random_range(20.0..200.0),
        rng.random_range(20.0..200.0),
        rng.random_range(0.01..5.0),
        rng.random_range(-0.02..0.10),
        rng.random_range(0.05..1.5),
    )
}

#[test]
fn put_call_parity_holds_across_random_inputs() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..SAMPLES {
        let p = random_call(&mut rng);
        let call = black_scholes_price(&p);
        let put = black_scholes_price(&p.with_option_type(OptionType::Put));
        let forward_gap = p.spot - p.strike * (-p.rate * p.expiry).exp();
        assert!(
            (call - put - forward_gap).abs() < 1e-4,
            "parity broken for {p:?}: c-p={} s-kdf={forward_gap}",
            call - put
        );
    }
}

#[test]
fn call_delta_minus_put_delta_is_one() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..SAMPLES {
        let p = random_call(&mut rng);
        let call = black_scholes_greeks(&p);
        let put = black_scholes_greeks(&p.with_option_type(OptionType::Put));
        assert_abs_diff_eq!(call.delta - put.delta, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn gamma_and_vega_do_not_depend_on_side() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..SAMPLES {
        let p = random_call(&mut rng);
        let call = black_scholes_greeks(&p);
        let put = black_scholes_greeks(&p.with_option_type(OptionType::Put));
        assert_eq!(call.gamma.to_bits(), put.gamma.to_bits(), "gamma differs for {p:?}");
        assert_eq!(call.vega.to_bits(), put.vega.to_bits(), "vega differs for {p:?}");
    }
}

#[test]
fn expiry_boundary_is_intrinsic_with_zero_greeks() {
    for (s, k) in [(120.0, 100.0), (100.0, 100.0), (80.0, 100.0)] {
        let call = OptionParameters::new(OptionType::Call, s, k, 0.0, 0.05, 0.2);
        let put = call.with_option_type(OptionType::Put);

        assert_eq!(black_scholes_price(&call), f64::max(0.0, s - k));
        assert_eq!(black_scholes_price(&put), f64::max(0.0, k - s));
        assert_eq!(black_scholes_greeks(&call), Greeks::ZERO);
        assert_eq!(black_scholes_greeks(&put), Greeks::ZERO);
    }
}

#[test]
fn prices_are_non_negative_and_bounded() {
    let mut rng = StdRng::seed_from_u64(14);
    for _ in 0..SAMPLES {
        let p = random_call(&mut rng);
        let call = black_scholes_price(&p);
        let put = black_scholes_price(&p.with_option_type(OptionType::Put));
        // Allow for the CDF approximation error scaled by the notional.
        let slack = 1e-6 * p.spot.max(p.strike);
        assert!(call >= -slack && call <= p.spot + slack, "call {call} for {p:?}");
        let discounted_strike = p.strike * (-p.rate * p.expiry).exp();
        assert!(
            put >= -slack && put <= discounted_strike + slack,
            "put {put} for {p:?}"
        );
    }
}

#[test]
fn call_price_is_non_decreasing_in_spot() {
    let mut rng = StdRng::seed_from_u64(15);
    for _ in 0..200 {
        let base = random_call(&mut rng);
        let mut prev = black_scholes_price(&base.with_spot(10.0));
        for i in 1..=100 {
            let spot = 10.0 + 3.0 * i as f64;
            let px = black_scholes_price(&base.with_spot(spot));
            assert!(px >= prev - 1e-6, "price fell at spot={spot} for {base:?}");
            prev = px;
        }
    }
}

#[test]
fn call_price_is_non_decreasing_in_vol() {
    let mut rng = StdRng::seed_from_u64(16);
    for _ in 0..200 {
        let base = random_call(&mut rng);
        let mut prev = black_scholes_price(&base.with_vol(0.01));
        for i in 1..=100 {
            let vol = 0.01 + 0.02 * i as f64;
            let px = black_scholes_price(&base.with_vol(vol));
            assert!(px >= prev - 1e-6, "price fell at vol={vol} for {base:?}");
            prev = px;
        }
    }
}

#[test]
fn greeks_have_expected_signs() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..SAMPLES {
        let p = random_call(&mut rng);
        let call = black_scholes_greeks(&p);
        let put = black_scholes_greeks(&p.with_option_type(OptionType::Put));

        assert!((0.0..=1.0).contains(&call.delta));
        assert!((-1.0..=0.0).contains(&put.delta));
        assert!(call.gamma >= 0.0 && call.vega >= 0.0);
        assert!(call.rho >= 0.0 && put.rho <= 0.0);
    }
}
