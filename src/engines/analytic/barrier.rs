//! Closed-form barrier option prices under continuous monitoring.
//!
//! Reflection-principle formulas with the (H/S)^{2μ} image term,
//! μ = (r - σ²/2)/σ². Knock-in prices follow from in + out = vanilla.
//! These serve as validation references for the Brownian-bridge Monte
//! Carlo pricer, which converges to them as the step count grows.

use crate::engines::analytic::black_scholes::{black_scholes_call, black_scholes_put};
use crate::math::normal_cdf;

/// Down-and-out call. Requires S > H for a live contract; below the
/// barrier only the discounted rebate remains.
pub fn barrier_down_out_call(
    spot: f64,
    strike: f64,
    barrier: f64,
    rebate: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    if spot <= barrier {
        return rebate * (-rate * time).exp();
    }
    if strike <= barrier {
        let vanilla = black_scholes_call(spot, strike, rate, vol, time);
        let knock_in = barrier_down_in_call(spot, strike, barrier, 0.0, rate, vol, time);
        return vanilla - knock_in + rebate * (-rate * time).exp();
    }

    let sqrt_t = time.sqrt();
    let mu = (rate - 0.5 * vol * vol) / (vol * vol);

    let x1 = (spot / strike).ln() / (vol * sqrt_t) + (1.0 + mu) * vol * sqrt_t;
    let y1 = (barrier * barrier / (spot * strike)).ln() / (vol * sqrt_t) + (1.0 + mu) * vol * sqrt_t;

    let image = (barrier / spot).powf(2.0 * mu);
    let df = (-rate * time).exp();

    let call = spot * normal_cdf(x1) - strike * df * normal_cdf(x1 - vol * sqrt_t);
    let reflected =
        spot * image * normal_cdf(y1) - strike * df * image * normal_cdf(y1 - vol * sqrt_t);

    call - reflected
}

/// Down-and-in call via in + out = vanilla.
pub fn barrier_down_in_call(
    spot: f64,
    strike: f64,
    barrier: f64,
    _rebate: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    if spot <= barrier {
        return black_scholes_call(spot, strike, rate, vol, time);
    }

    let vanilla = black_scholes_call(spot, strike, rate, vol, time);
    let out = barrier_down_out_call(spot, strike, barrier, 0.0, rate, vol, time);
    vanilla - out
}

/// Up-and-out call. Worthless when the barrier sits at or below the
/// strike: the payoff region knocks the contract out first.
pub fn barrier_up_out_call(
    spot: f64,
    strike: f64,
    barrier: f64,
    rebate: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    if spot >= barrier {
        return rebate * (-rate * time).exp();
    }
    if barrier <= strike {
        return 0.0;
    }

    let vanilla = black_scholes_call(spot, strike, rate, vol, time);
    let knock_in = barrier_up_in_call(spot, strike, barrier, 0.0, rate, vol, time);
    vanilla - knock_in
}

/// Up-and-in call.
pub fn barrier_up_in_call(
    spot: f64,
    strike: f64,
    barrier: f64,
    _rebate: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    if spot >= barrier {
        return black_scholes_call(spot, strike, rate, vol, time);
    }

    let sqrt_t = time.sqrt();
    let mu = (rate - 0.5 * vol * vol) / (vol * vol);
    let image = (barrier / spot).powf(2.0 * mu);

    let y1 = (barrier / spot).ln() / (vol * sqrt_t) + (1.0 + mu) * vol * sqrt_t;
    let df = (-rate * time).exp();

    spot * image * normal_cdf(y1) - strike * df * image * normal_cdf(y1 - vol * sqrt_t)
}

/// Down-and-out put.
pub fn barrier_down_out_put(
    spot: f64,
    strike: f64,
    barrier: f64,
    rebate: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    if spot <= barrier {
        return rebate * (-rate * time).exp();
    }

    let vanilla = black_scholes_put(spot, strike, rate, vol, time);
    let knock_in = barrier_down_in_put(spot, strike, barrier, 0.0, rate, vol, time);
    vanilla - knock_in
}

/// Down-and-in put.
pub fn barrier_down_in_put(
    spot: f64,
    strike: f64,
    barrier: f64,
    _rebate: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    if spot <= barrier {
        return black_scholes_put(spot, strike, rate, vol, time);
    }

    let sqrt_t = time.sqrt();
    let mu = (rate - 0.5 * vol * vol) / (vol * vol);
    let image = (barrier / spot).powf(2.0 * mu);

    let y1 = (barrier / spot).ln() / (vol * sqrt_t) + (1.0 + mu) * vol * sqrt_t;
    let df = (-rate * time).exp();

    -spot * image * normal_cdf(-y1) + strike * df * image * normal_cdf(-y1 + vol * sqrt_t)
}

/// Up-and-out put.
pub fn barrier_up_out_put(
    spot: f64,
    strike: f64,
    barrier: f64,
    rebate: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    if spot >= barrier {
        return rebate * (-rate * time).exp();
    }
    if barrier >= strike {
        let vanilla = black_scholes_put(spot, strike, rate, vol, time);
        let knock_in = barrier_up_in_put(spot, strike, barrier, 0.0, rate, vol, time);
        return vanilla - knock_in;
    }
    0.0
}

/// Up-and-in put.
pub fn barrier_up_in_put(
    spot: f64,
    strike: f64,
    barrier: f64,
    _rebate: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    if spot >= barrier {
        return black_scholes_put(spot, strike, rate, vol, time);
    }

    let sqrt_t = time.sqrt();
    let mu = (rate - 0.5 * vol * vol) / (vol * vol);
    let image = (barrier / spot).powf(2.0 * mu);

    let y1 = (barrier / spot).ln() / (vol * sqrt_t) + (1.0 + mu) * vol * sqrt_t;
    let df = (-rate * time).exp();

    -spot * image * normal_cdf(-y1) + strike * df * image * normal_cdf(-y1 + vol * sqrt_t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn in_out_parity_reconstructs_the_vanilla_call() {
        let (s, k, h, r, vol, t) = (100.0, 100.0, 80.0, 0.05, 0.2, 1.0);
        let down_in = barrier_down_in_call(s, k, h, 0.0, r, vol, t);
        let down_out = barrier_down_out_call(s, k, h, 0.0, r, vol, t);
        let vanilla = black_scholes_call(s, k, r, vol, t);
        assert_abs_diff_eq!(down_in + down_out, vanilla, epsilon = 1e-9);
    }

    #[test]
    fn up_in_out_parity_reconstructs_the_vanilla_put() {
        let (s, k, h, r, vol, t) = (100.0, 100.0, 120.0, 0.05, 0.2, 1.0);
        let up_in = barrier_up_in_put(s, k, h, 0.0, r, vol, t);
        let up_out = barrier_up_out_put(s, k, h, 0.0, r, vol, t);
        let vanilla = black_scholes_put(s, k, r, vol, t);
        assert_abs_diff_eq!(up_in + up_out, vanilla, epsilon = 1e-9);
    }

    #[test]
    fn knocked_out_contract_pays_the_discounted_rebate() {
        let price = barrier_down_out_call(75.0, 100.0, 80.0, 3.0, 0.05, 0.2, 1.0);
        assert_abs_diff_eq!(price, 3.0 * (-0.05_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn distant_barrier_down_out_approaches_the_vanilla() {
        let (s, k, r, vol, t) = (100.0, 100.0, 0.05, 0.2, 1.0);
        let near = barrier_down_out_call(s, k, 95.0, 0.0, r, vol, t);
        let far = barrier_down_out_call(s, k, 20.0, 0.0, r, vol, t);
        let vanilla = black_scholes_call(s, k, r, vol, t);
        assert!(near < vanilla);
        assert_abs_diff_eq!(far, vanilla, epsilon = 1e-6);
    }

    #[test]
    fn up_out_call_with_barrier_below_strike_is_worthless() {
        assert_eq!(
            barrier_up_out_call(100.0, 110.0, 105.0, 0.0, 0.05, 0.2, 1.0),
            0.0
        );
    }

    #[test]
    fn barrier_prices_are_non_negative() {
        let cases = [
            barrier_down_in_call(100.0, 100.0, 80.0, 0.0, 0.05, 0.2, 1.0),
            barrier_up_in_call(100.0, 100.0, 120.0, 0.0, 0.05, 0.2, 1.0),
            barrier_down_in_put(100.0, 100.0, 80.0, 0.0, 0.05, 0.2, 1.0),
            barrier_up_out_put(100.0, 100.0, 120.0, 0.0, 0.05, 0.2, 1.0),
        ];
        for (i, price) in cases.iter().enumerate() {
            assert!(*price >= -1e-10, "case {i}: {price}");
        }
    }
}
