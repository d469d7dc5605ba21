use bscalc::core::{OptionParameters, OptionType, PricingEngine};
use bscalc::engines::analytic::BlackScholesEngine;
use bscalc::pricing::european::{black_scholes_greeks, black_scholes_price};
use bscalc::vol::implied::ImpliedVolSolver;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

// Performance goals (guideline, measured on target hardware):
// - Black-Scholes price: < 50 ns
// - Greeks: < 100 ns
// - Implied vol (ATM, default tolerance): < 1 us

fn atm_call() -> OptionParameters {
    OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.20)
}

fn bench_black_scholes_price(c: &mut Criterion) {
    let params = atm_call();
    c.bench_function("black_scholes_price_call", |b| {
        b.iter(|| black_box(black_scholes_price(black_box(&params))))
    });
}

fn bench_black_scholes_greeks(c: &mut Criterion) {
    let params = atm_call().with_option_type(OptionType::Put);
    c.bench_function("black_scholes_greeks_put", |b| {
        b.iter(|| black_box(black_scholes_greeks(black_box(&params))))
    });
}

fn bench_engine(c: &mut Criterion) {
    let params = atm_call();
    let engine = BlackScholesEngine::new();
    c.bench_function("black_scholes_engine_checked", |b| {
        b.iter(|| {
            let result = engine
                .price(black_box(&params))
                .expect("pricing should succeed");
            black_box(result)
        })
    });
}

fn bench_implied_vol(c: &mut Criterion) {
    let solver = ImpliedVolSolver::default();
    let mut group = c.benchmark_group("implied_vol_newton");

    for strike in [80.0_f64, 100.0, 120.0] {
        let params = atm_call().with_vol(f64::NAN);
        let params = OptionParameters { strike, ..params };
        let market = black_scholes_price(&params.with_vol(0.3));
        group.bench_with_input(BenchmarkId::from_parameter(strike), &strike, |b, _| {
            b.iter(|| black_box(solver.solve(black_box(market), black_box(&params))))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_black_scholes_price,
    bench_black_scholes_greeks,
    bench_engine,
    bench_implied_vol
);
criterion_main!(benches);
