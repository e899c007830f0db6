//! Closed-form lookback option prices under continuous monitoring,
//! evaluated at inception (running extreme equal to the spot).
//!
//! Floating-strike forms follow Goldman-Sosin-Gatto (1979); fixed-strike
//! forms follow Conze-Viswanathan (1991). The r → 0 limits are obtained by
//! expanding the (σ²/2r)-scaled bracket to first order rather than by an
//! ad-hoc approximation, so the formulas stay continuous in the rate.
//!
//! Discretely monitored Monte Carlo estimates sit slightly inside these
//! continuous-monitoring values; tests compare at loose tolerances.

use crate::math::{normal_cdf, normal_pdf};

/// Rates below this magnitude use the r → 0 expansion.
const SMALL_RATE: f64 = 1e-10;

struct GsgTerms {
    /// a1 = (r/σ + σ/2)·√T
    a1: f64,
    /// a2 = a1 - σ√T
    a2: f64,
    /// a3 = a1 - (2r/σ)·√T
    a3: f64,
    df: f64,
    /// σ²/(2r), only meaningful away from r = 0.
    half_var_over_rate: f64,
}

fn gsg_terms(rate: f64, vol: f64, time: f64) -> GsgTerms {
    let sqrt_t = time.sqrt();
    let a1 = (rate / vol + 0.5 * vol) * sqrt_t;
    GsgTerms {
        a1,
        a2: a1 - vol * sqrt_t,
        a3: a1 - (2.0 * rate / vol) * sqrt_t,
        df: (-rate * time).exp(),
        half_var_over_rate: if rate.abs() < SMALL_RATE {
            0.0
        } else {
            vol * vol / (2.0 * rate)
        },
    }
}

/// Floating-strike lookback call: pays S(T) - min S.
pub fn lookback_floating_call(spot: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if spot <= 0.0 || time <= 0.0 || vol <= 0.0 {
        return 0.0;
    }

    let t = gsg_terms(rate, vol, time);

    if rate.abs() < SMALL_RATE {
        // limit of (σ²/2r)·[e^{-rT}N(-a3) - N(-a1)] as r → 0, with
        // a = σ√T/2 the common limit of a1 and a3.
        let a = 0.5 * vol * time.sqrt();
        let bracket_slope = -time * normal_cdf(-a) + 2.0 * normal_pdf(a) * time.sqrt() / vol;
        return spot * (normal_cdf(a) - normal_cdf(-a))
            + spot * 0.5 * vol * vol * bracket_slope;
    }

    spot * normal_cdf(t.a1) - spot * t.df * normal_cdf(t.a2)
        + spot * t.half_var_over_rate * (t.df * normal_cdf(-t.a3) - normal_cdf(-t.a1))
}

/// Floating-strike lookback put: pays max S - S(T).
pub fn lookback_floating_put(spot: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if spot <= 0.0 || time <= 0.0 || vol <= 0.0 {
        return 0.0;
    }

    let t = gsg_terms(rate, vol, time);

    if rate.abs() < SMALL_RATE {
        let a = 0.5 * vol * time.sqrt();
        let bracket_slope = time * normal_cdf(a) + 2.0 * normal_pdf(a) * time.sqrt() / vol;
        return spot * (normal_cdf(a) - normal_cdf(-a))
            + spot * 0.5 * vol * vol * bracket_slope;
    }

    spot * t.df * normal_cdf(-t.a2) - spot * normal_cdf(-t.a1)
        + spot * t.half_var_over_rate * (normal_cdf(t.a1) - t.df * normal_cdf(t.a3))
}

/// Fixed-strike lookback call: pays max(max S - K, 0).
///
/// For K ≤ S the payoff decomposes as (max S - S(T)) + (S(T) - K), so the
/// price is the floating put plus a discounted forward leg; for K > S the
/// Conze-Viswanathan image formula applies directly.
pub fn lookback_fixed_call(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if spot <= 0.0 || strike <= 0.0 || time <= 0.0 || vol <= 0.0 {
        return (spot - strike).max(0.0);
    }

    let df = (-rate * time).exp();

    if strike <= spot {
        return lookback_floating_put(spot, rate, vol, time) + spot - strike * df;
    }

    let sqrt_t = time.sqrt();
    let vol_sqrt_t = vol * sqrt_t;
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    if rate.abs() < SMALL_RATE {
        // Same first-order expansion applied to the image bracket.
        let log_m = (spot / strike).ln();
        let bracket_slope = time * normal_cdf(d1)
            + (2.0 / (vol * vol)) * log_m * normal_cdf(d1)
            + 2.0 * normal_pdf(d1) * sqrt_t / vol;
        return spot * normal_cdf(d1) - strike * normal_cdf(d2)
            + spot * 0.5 * vol * vol * bracket_slope;
    }

    let two_mu = 2.0 * rate / (vol * vol);
    let image = (spot / strike).powf(-two_mu);
    let half_var_over_rate = vol * vol / (2.0 * rate);

    spot * normal_cdf(d1) - strike * df * normal_cdf(d2)
        + spot
            * half_var_over_rate
            * (normal_cdf(d1) - df * image * normal_cdf(d1 - two_mu * vol_sqrt_t))
}

/// Fixed-strike lookback put: pays max(K - min S, 0).
///
/// For K ≥ S the payoff decomposes as (K - S(T)) + (S(T) - min S), giving
/// the floating call plus a discounted forward leg; for K < S the image
/// formula applies directly.
pub fn lookback_fixed_put(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if spot <= 0.0 || strike <= 0.0 || time <= 0.0 || vol <= 0.0 {
        return (strike - spot).max(0.0);
    }

    let df = (-rate * time).exp();

    if strike >= spot {
        return lookback_floating_call(spot, rate, vol, time) + strike * df - spot;
    }

    let sqrt_t = time.sqrt();
    let vol_sqrt_t = vol * sqrt_t;
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    if rate.abs() < SMALL_RATE {
        let log_m = (spot / strike).ln();
        let bracket_slope = -time * normal_cdf(-d1)
            - (2.0 / (vol * vol)) * log_m * normal_cdf(-d1)
            + 2.0 * normal_pdf(d1) * sqrt_t / vol;
        return strike * normal_cdf(-d2) - spot * normal_cdf(-d1)
            + spot * 0.5 * vol * vol * bracket_slope;
    }

    let two_mu = 2.0 * rate / (vol * vol);
    let image = (spot / strike).powf(-two_mu);
    let half_var_over_rate = vol * vol / (2.0 * rate);

    strike * df * normal_cdf(-d2) - spot * normal_cdf(-d1)
        + spot * half_var_over_rate * (df * image * normal_cdf(-d1 + two_mu * vol_sqrt_t) - normal_cdf(-d1))
}
