//! Closed-form digital (binary) option prices.

use crate::math::normal_cdf;

/// Cash-or-nothing call: Q·e^(-rT)·N(d2).
pub fn digital_cash_call(
    spot: f64,
    strike: f64,
    payout: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    if time <= 0.0 {
        return if spot > strike { payout } else { 0.0 };
    }
    if vol <= 0.0 {
        let df = (-rate * time).exp();
        return if spot > strike * df { payout * df } else { 0.0 };
    }

    let d2 = ((spot / strike).ln() + (rate - 0.5 * vol * vol) * time) / (vol * time.sqrt());
    payout * (-rate * time).exp() * normal_cdf(d2)
}

/// Cash-or-nothing put: Q·e^(-rT)·N(-d2).
pub fn digital_cash_put(
    spot: f64,
    strike: f64,
    payout: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> f64 {
    if time <= 0.0 {
        return if spot < strike { payout } else { 0.0 };
    }
    if vol <= 0.0 {
        let df = (-rate * time).exp();
        return if spot < strike * df { payout * df } else { 0.0 };
    }

    let d2 = ((spot / strike).ln() + (rate - 0.5 * vol * vol) * time) / (vol * time.sqrt());
    payout * (-rate * time).exp() * normal_cdf(-d2)
}

/// Asset-or-nothing call: S·N(d1).
pub fn digital_asset_call(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if time <= 0.0 {
        return if spot > strike { spot } else { 0.0 };
    }
    if vol <= 0.0 {
        return if spot > strike * (-rate * time).exp() {
            spot
        } else {
            0.0
        };
    }

    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt());
    spot * normal_cdf(d1)
}

/// Asset-or-nothing put: S·N(-d1).
pub fn digital_asset_put(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if time <= 0.0 {
        return if spot < strike { spot } else { 0.0 };
    }
    if vol <= 0.0 {
        return if spot < strike * (-rate * time).exp() {
            spot
        } else {
            0.0
        };
    }

    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt());
    spot * normal_cdf(-d1)
}
