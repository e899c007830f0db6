//! Black-Scholes closed forms, the validation reference and control-variate
//! expectation for the GBM pricers.

use crate::core::OptionType;
use crate::math::normal_cdf;

#[inline]
fn d1_d2(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> (f64, f64) {
    let vol_sqrt_t = vol * time.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes call: S·N(d1) - K·e^(-rT)·N(d2).
///
/// Edge cases: expired options return intrinsic, zero vol returns the
/// discounted intrinsic on the forward, a non-positive strike makes the
/// call worth the spot.
pub fn black_scholes_call(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if time <= 0.0 {
        return (spot - strike).max(0.0);
    }
    if vol <= 0.0 {
        return (spot - strike * (-rate * time).exp()).max(0.0);
    }
    if strike <= 0.0 {
        return spot;
    }

    let (d1, d2) = d1_d2(spot, strike, rate, vol, time);
    spot * normal_cdf(d1) - strike * (-rate * time).exp() * normal_cdf(d2)
}

/// Black-Scholes put: K·e^(-rT)·N(-d2) - S·N(-d1).
pub fn black_scholes_put(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if time <= 0.0 {
        return (strike - spot).max(0.0);
    }
    if vol <= 0.0 {
        return (strike * (-rate * time).exp() - spot).max(0.0);
    }
    if strike <= 0.0 {
        return 0.0;
    }

    let (d1, d2) = d1_d2(spot, strike, rate, vol, time);
    strike * (-rate * time).exp() * normal_cdf(-d2) - spot * normal_cdf(-d1)
}

/// Side-dispatched convenience wrapper.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    match option_type {
        OptionType::Call => black_scholes_call(spot, strike, rate, vol, time),
        OptionType::Put => black_scholes_put(spot, strike, rate, vol, time),
    }
}
