//! Merton jump-diffusion series solution.
//!
//! The price is a Poisson-weighted sum of Black-Scholes prices with
//! jump-adjusted rate and volatility:
//!   C = Σₙ e^{-λ'T}(λ'T)ⁿ/n! · BS(S, K, rₙ, σₙ, T)
//! with λ' = λ(1+k), rₙ = r - λk + n·ln(1+k)/T, σₙ² = σ² + n·σⱼ²/T.

use crate::engines::analytic::black_scholes::black_scholes_call;

/// Terms summed before the tail is declared negligible.
const MAX_TERMS: usize = 50;

/// Merton series call price. At λ = 0 the sum collapses to Black-Scholes.
pub fn merton_series_call(
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    sigma: f64,
    lambda: f64,
    mu_j: f64,
    sigma_j: f64,
) -> f64 {
    if spot <= 0.0 || strike <= 0.0 || time <= 0.0 {
        return (spot - strike).max(0.0);
    }

    let k = (mu_j + 0.5 * sigma_j * sigma_j).exp() - 1.0;
    let lambda_prime = lambda * (1.0 + k);

    let mut price = 0.0;
    let mut poisson_weight = (-lambda_prime * time).exp();

    for n in 0..MAX_TERMS {
        if n > 0 {
            poisson_weight *= lambda_prime * time / n as f64;
        }

        let r_n = rate - lambda * k + n as f64 * (1.0 + k).ln() / time;
        let sigma_n = (sigma * sigma + n as f64 * sigma_j * sigma_j / time).sqrt();

        price += poisson_weight * black_scholes_call(spot, strike, r_n, sigma_n, time);

        if poisson_weight < 1e-15 && n > 10 {
            break;
        }
    }

    price
}

/// Merton series put price via put-call parity.
pub fn merton_series_put(
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    sigma: f64,
    lambda: f64,
    mu_j: f64,
    sigma_j: f64,
) -> f64 {
    let call = merton_series_call(spot, strike, rate, time, sigma, lambda, mu_j, sigma_j);
    call - spot + strike * (-rate * time).exp()
}
