//! Command-line Black-Scholes calculator.
//!
//! Price mode prints call and put value plus Greeks side by side; IV mode
//! (`--market-price`) inverts one option's premium to implied volatility.

use std::process::ExitCode;

use bscalc::core::{OptionParameters, OptionType, PricingEngine, PricingError};
use bscalc::engines::analytic::BlackScholesEngine;
use bscalc::pricing::payoff::{ProfileSpec, expiry_pnl_profile};
use bscalc::vol::implied::{ImpliedVolSolver, SolverConfig};

const USAGE: &str = "\
usage: bscalc --spot S --strike K --expiry T --rate R [--vol SIGMA]
              [--market-price P --type call|put] [--config FILE] [--pnl] [--json]

  price mode (default): needs --vol; prints call/put price and Greeks
  iv mode: --market-price switches to implied volatility for --type (default call)
  --config FILE   JSON solver config, e.g. {\"tolerance\": 1e-8, \"bisection_fallback\": true}
  --pnl           also print P&L at expiry across spot +/-40%
  --json          emit JSON instead of a table

log verbosity follows RUST_LOG (default warn)";

#[derive(Debug, Default)]
struct Args {
    spot: Option<f64>,
    strike: Option<f64>,
    expiry: Option<f64>,
    rate: Option<f64>,
    vol: Option<f64>,
    market_price: Option<f64>,
    option_type: Option<OptionType>,
    config: Option<String>,
    pnl: bool,
    json: bool,
    help: bool,
}

fn parse_f64(flag: &str, value: &str) -> Result<f64, PricingError> {
    value
        .parse::<f64>()
        .map_err(|_| PricingError::InvalidInput(format!("{flag}: `{value}` is not a number")))
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args, PricingError> {
    let mut args = Args::default();
    let mut it = raw.into_iter();

    while let Some(arg) = it.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--pnl" => args.pnl = true,
            "--json" => args.json = true,
            "-h" | "--help" => args.help = true,
            "--spot" | "--strike" | "--expiry" | "--rate" | "--vol" | "--market-price"
            | "--type" | "--config" => {
                let value = match inline {
                    Some(v) => v,
                    None => it.next().ok_or_else(|| {
                        PricingError::InvalidInput(format!("{flag} needs a value"))
                    })?,
                };
                match flag.as_str() {
                    "--spot" => args.spot = Some(parse_f64(&flag, &value)?),
                    "--strike" => args.strike = Some(parse_f64(&flag, &value)?),
                    "--expiry" => args.expiry = Some(parse_f64(&flag, &value)?),
                    "--rate" => args.rate = Some(parse_f64(&flag, &value)?),
                    "--vol" => args.vol = Some(parse_f64(&flag, &value)?),
                    "--market-price" => args.market_price = Some(parse_f64(&flag, &value)?),
                    "--type" => args.option_type = Some(value.parse()?),
                    _ => args.config = Some(value),
                }
            }
            other => {
                return Err(PricingError::InvalidInput(format!(
                    "unrecognized argument `{other}`"
                )));
            }
        }
    }
    Ok(args)
}

fn required(value: Option<f64>, flag: &str) -> Result<f64, PricingError> {
    value.ok_or_else(|| PricingError::InvalidInput(format!("missing {flag}")))
}

fn load_config(path: Option<&str>) -> Result<SolverConfig, PricingError> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| PricingError::InvalidInput(format!("cannot read {path}: {e}")))?;
    SolverConfig::from_json(&text)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, PricingError> {
    serde_json::to_string_pretty(value).map_err(|e| PricingError::NumericalError(e.to_string()))
}

fn run(args: Args) -> Result<(), PricingError> {
    let option_type = args.option_type.unwrap_or(OptionType::Call);
    let contract = OptionParameters::new(
        option_type,
        required(args.spot, "--spot")?,
        required(args.strike, "--strike")?,
        required(args.expiry, "--expiry")?,
        required(args.rate, "--rate")?,
        args.vol.unwrap_or(f64::NAN),
    );

    if let Some(market_price) = args.market_price {
        let solver = ImpliedVolSolver::new(load_config(args.config.as_deref())?);
        let outcome = solver.solve_checked(market_price, &contract)?;
        if args.json {
            println!("{}", to_json(&outcome)?);
        } else {
            println!("Implied Volatility ({option_type}): {:.2}%", outcome.vol() * 100.0);
            println!(
                "status: {} after {} evaluations",
                outcome.status(),
                outcome.iterations()
            );
            if !outcome.is_converged() {
                println!("warning: estimate did not reach the price tolerance");
            }
        }
        return Ok(());
    }

    required(args.vol, "--vol")?;
    let engine = BlackScholesEngine::new();
    let call = engine.price(&contract.with_option_type(OptionType::Call))?;
    let put = engine.price(&contract.with_option_type(OptionType::Put))?;

    let profile = if args.pnl {
        Some(expiry_pnl_profile(
            &contract,
            call.price,
            put.price,
            &ProfileSpec::default(),
        )?)
    } else {
        None
    };

    if args.json {
        let body = serde_json::json!({
            "params": contract,
            "call": call,
            "put": put,
            "pnl": profile,
        });
        println!("{}", to_json(&body)?);
        return Ok(());
    }

    println!("{:<8}{:>12}{:>12}", "", "Call", "Put");
    println!("{:<8}{:>12.2}{:>12.2}", "Price", call.price, put.price);
    let rows = [
        ("Delta", call.greeks.delta, put.greeks.delta),
        ("Gamma", call.greeks.gamma, put.greeks.gamma),
        ("Vega", call.greeks.vega, put.greeks.vega),
        ("Theta", call.greeks.theta, put.greeks.theta),
        ("Rho", call.greeks.rho, put.greeks.rho),
    ];
    for (label, c, p) in rows {
        println!("{label:<8}{c:>12.4}{p:>12.4}");
    }

    if let Some(points) = profile {
        println!();
        println!("{:>10}{:>12}{:>12}", "Spot", "Call P&L", "Put P&L");
        for pt in points {
            println!(
                "{:>10}{:>12.2}{:>12.2}",
                pt.spot.round(),
                pt.call_pnl,
                pt.put_pnl
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ PricingError::InvalidInput(_)) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
