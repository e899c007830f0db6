//! Closed-form geometric Asian option price.
//!
//! The geometric average of lognormals is itself lognormal, so the price
//! is Black-Scholes with moment-matched drift and volatility:
//!   adj_rate = (r - σ²/2)·(n+1)/(2n) + adj_vol²/2
//!   adj_vol² = σ²·(n+1)(2n+1)/(6n²)
//! This is the control-variate expectation for arithmetic Asians.

use crate::core::OptionType;
use crate::math::normal_cdf;

/// Discrete geometric Asian price with `num_obs` equally spaced
/// observations. Degenerate inputs price to zero.
pub fn asian_geometric_closed(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    num_obs: usize,
) -> f64 {
    if spot <= 0.0 || strike <= 0.0 || time <= 0.0 || num_obs == 0 {
        return 0.0;
    }

    let n = num_obs as f64;
    let var = vol * vol;

    let adj_var = var * (n + 1.0) * (2.0 * n + 1.0) / (6.0 * n * n);
    let adj_rate = (rate - 0.5 * var) * (n + 1.0) / (2.0 * n) + 0.5 * adj_var;
    let adj_vol = adj_var.sqrt();

    let sqrt_t = time.sqrt();
    let d1 = ((spot / strike).ln() + (adj_rate + 0.5 * adj_var) * time) / (adj_vol * sqrt_t);
    let d2 = d1 - adj_vol * sqrt_t;

    let df = (-rate * time).exp();
    let growth = ((adj_rate - rate) * time).exp();

    match option_type {
        OptionType::Call => spot * growth * normal_cdf(d1) - strike * df * normal_cdf(d2),
        OptionType::Put => strike * df * normal_cdf(-d2) - spot * growth * normal_cdf(-d1),
    }
}
