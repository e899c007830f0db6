//! Black-76 closed forms for options on futures/forwards: price, Greeks,
//! and implied volatility.

use std::f64::consts::PI;

use crate::math::{normal_cdf, normal_pdf};

#[inline]
fn d1_d2(forward: f64, strike: f64, vol: f64, time: f64) -> (f64, f64) {
    let vol_sqrt_t = vol * time.sqrt();
    let d1 = ((forward / strike).ln() + 0.5 * vol * vol * time) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-76 call: e^(-rT)·[F·N(d1) - K·N(d2)].
pub fn black76_call(forward: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if time <= 0.0 {
        return (forward - strike).max(0.0);
    }
    if vol <= 0.0 {
        return (-rate * time).exp() * (forward - strike).max(0.0);
    }
    if forward <= 0.0 || strike <= 0.0 {
        return 0.0;
    }

    let (d1, d2) = d1_d2(forward, strike, vol, time);
    (-rate * time).exp() * (forward * normal_cdf(d1) - strike * normal_cdf(d2))
}

/// Black-76 put: e^(-rT)·[K·N(-d2) - F·N(-d1)].
pub fn black76_put(forward: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if time <= 0.0 {
        return (strike - forward).max(0.0);
    }
    if vol <= 0.0 {
        return (-rate * time).exp() * (strike - forward).max(0.0);
    }
    if forward <= 0.0 || strike <= 0.0 {
        return 0.0;
    }

    let (d1, d2) = d1_d2(forward, strike, vol, time);
    (-rate * time).exp() * (strike * normal_cdf(-d2) - forward * normal_cdf(-d1))
}

/// Discounted delta with respect to the forward.
pub fn black76_delta(
    forward: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    is_call: bool,
) -> f64 {
    if time <= 0.0 || vol <= 0.0 {
        let df = (-rate * time).exp();
        return if is_call {
            if forward > strike { df } else { 0.0 }
        } else if forward < strike {
            -df
        } else {
            0.0
        };
    }

    let (d1, _) = d1_d2(forward, strike, vol, time);
    let df = (-rate * time).exp();
    if is_call {
        df * normal_cdf(d1)
    } else {
        df * (normal_cdf(d1) - 1.0)
    }
}

/// Second derivative with respect to the forward.
pub fn black76_gamma(forward: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if time <= 0.0 || vol <= 0.0 || forward <= 0.0 {
        return 0.0;
    }

    let (d1, _) = d1_d2(forward, strike, vol, time);
    (-rate * time).exp() * normal_pdf(d1) / (forward * vol * time.sqrt())
}

/// Sensitivity to the volatility (per unit of vol, not per point).
pub fn black76_vega(forward: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if time <= 0.0 || forward <= 0.0 {
        return 0.0;
    }

    let d1 = if vol <= 0.0 {
        if forward > strike { 1e10 } else { -1e10 }
    } else {
        d1_d2(forward, strike, vol, time).0
    };

    (-rate * time).exp() * forward * normal_pdf(d1) * time.sqrt()
}

/// Time decay.
pub fn black76_theta(
    forward: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    is_call: bool,
) -> f64 {
    if time <= 0.0 || vol <= 0.0 {
        return 0.0;
    }

    let (d1, d2) = d1_d2(forward, strike, vol, time);
    let df = (-rate * time).exp();
    let decay = -forward * normal_pdf(d1) * vol / (2.0 * time.sqrt());

    if is_call {
        df * (decay + rate * forward * normal_cdf(d1) - rate * strike * normal_cdf(d2))
    } else {
        df * (decay - rate * forward * normal_cdf(-d1) + rate * strike * normal_cdf(-d2))
    }
}

/// Implied Black-76 volatility by Newton-Raphson.
///
/// Starts from the Brenner-Subrahmanyam seed and bounds the iterate to
/// (0, 5]. Returns the last iterate when vega collapses before the price
/// tolerance of 1e-10 is met.
pub fn black76_implied_vol(
    forward: f64,
    strike: f64,
    rate: f64,
    time: f64,
    price: f64,
    is_call: bool,
) -> f64 {
    if time <= 0.0 || price <= 0.0 {
        return 0.0;
    }

    let df = (-rate * time).exp();
    let mut sigma = (2.0 * PI / time).sqrt() * price / (df * forward);

    for _ in 0..50 {
        let model_price = if is_call {
            black76_call(forward, strike, rate, sigma, time)
        } else {
            black76_put(forward, strike, rate, sigma, time)
        };
        let vega = black76_vega(forward, strike, rate, sigma, time);

        if vega < 1e-12 {
            break;
        }

        let diff = model_price - price;
        if diff.abs() < 1e-10 {
            break;
        }

        sigma -= diff / vega;
        if sigma <= 0.0 {
            sigma = 0.001;
        }
        if sigma > 5.0 {
            sigma = 5.0;
        }
    }

    sigma
}
