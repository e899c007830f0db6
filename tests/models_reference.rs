//! Stochastic-model tests: Heston, SABR, Merton, and Black-76 against
//! their references and limiting cases.

use quantmc::engines::analytic::{
    black76_call, black_scholes_call, merton_series_call, sabr_implied_vol,
};
use quantmc::models::{HestonScheme, feller_condition_holds};
use quantmc::{McContext, OptionType};

#[test]
fn heston_atm_call_lands_in_the_documented_band() {
    let mut ctx = McContext::new()
        .with_seed(42)
        .with_paths(50_000);
    ctx.set_steps(100);

    let price = ctx.heston_call(100.0, 100.0, 0.05, 1.0, 0.04, 2.0, 0.04, 0.3, -0.7);
    assert!(price > 5.0 && price < 20.0, "heston atm call={price}");
}

#[test]
fn heston_qe_scheme_agrees_with_euler() {
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);
    ctx.set_steps(100);

    let euler = ctx.heston_call(100.0, 100.0, 0.05, 1.0, 0.04, 2.0, 0.04, 0.3, -0.7);
    let qe = ctx.heston_price(
        OptionType::Call,
        HestonScheme::QuadraticExponential,
        100.0,
        100.0,
        0.05,
        1.0,
        0.04,
        2.0,
        0.04,
        0.3,
        -0.7,
    );

    assert!((euler - qe).abs() <= 0.75, "euler={euler} qe={qe}");
}

#[test]
fn heston_with_tiny_vol_of_vol_collapses_to_black_scholes() {
    // sigma -> 0 freezes the variance at v0, recovering GBM with
    // vol = sqrt(v0) = 0.2.
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);
    ctx.set_steps(100);

    let heston = ctx.heston_call(100.0, 100.0, 0.05, 1.0, 0.04, 2.0, 0.04, 0.001, 0.0);
    let bs = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
    assert!((heston - bs).abs() <= 0.75, "heston={heston} bs={bs}");
}

#[test]
fn feller_predicate_reference_cases() {
    assert!(feller_condition_holds(2.0, 0.04, 0.3));
    assert!(!feller_condition_holds(2.0, 0.04, 1.0));
}

#[test]
fn merton_series_converges_to_black_scholes_without_jumps() {
    let series = merton_series_call(100.0, 100.0, 0.05, 1.0, 0.20, 0.0, -0.1, 0.15);
    let bs = black_scholes_call(100.0, 100.0, 0.05, 0.20, 1.0);
    assert!((series - bs).abs() <= 0.01, "series={series} bs={bs}");
}

#[test]
fn merton_mc_tracks_the_series_solution() {
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);

    let mc = ctx.merton_call(100.0, 100.0, 0.05, 1.0, 0.20, 1.0, -0.10, 0.15);
    let series = merton_series_call(100.0, 100.0, 0.05, 1.0, 0.20, 1.0, -0.10, 0.15);

    assert!((mc - series).abs() <= 1.0, "mc={mc} series={series}");
}

#[test]
fn merton_with_vanishing_intensity_prices_like_gbm() {
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);

    let merton = ctx.merton_call(100.0, 100.0, 0.05, 1.0, 0.20, 1e-9, -0.10, 0.15);
    let bs = black_scholes_call(100.0, 100.0, 0.05, 0.20, 1.0);
    assert!((merton - bs).abs() <= 1.0, "merton={merton} bs={bs}");
}

#[test]
fn sabr_lognormal_limit_prices_like_black76() {
    // beta = 1, nu = 0 is exact lognormal with vol alpha; the Euler MC
    // should track the Black-76 closed form.
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);
    ctx.set_steps(100);

    let mc = ctx.sabr_call(100.0, 100.0, 0.05, 1.0, 0.20, 1.0, 0.0, 0.0);
    let analytic = black76_call(100.0, 100.0, 0.05, 0.20, 1.0);
    assert!((mc - analytic).abs() <= 0.50, "mc={mc} black76={analytic}");
}

#[test]
fn sabr_hagan_vol_reprices_the_lognormal_case() {
    let vol = sabr_implied_vol(100.0, 100.0, 1.0, 0.20, 1.0, 0.0, 0.0);
    assert!((vol - 0.20).abs() <= 1e-9, "hagan vol={vol}");
}

#[test]
fn sabr_smile_prices_wings_above_the_flat_model() {
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);
    ctx.set_steps(100);

    let flat = ctx.sabr_put(100.0, 80.0, 0.05, 1.0, 0.20, 1.0, 0.0, 0.0);
    let smiled = ctx.sabr_put(100.0, 80.0, 0.05, 1.0, 0.20, 1.0, -0.5, 0.6);
    assert!(
        smiled > flat,
        "downside smile missing: smiled={smiled} flat={flat}"
    );
}

#[test]
fn black76_mc_put_call_parity() {
    let mut ctx = McContext::new()
        .with_seed(42)
        .with_paths(100_000)
        .with_antithetic(true);

    let call = ctx.black76_call(100.0, 95.0, 0.05, 0.20, 1.0);
    let put = ctx.black76_put(100.0, 95.0, 0.05, 0.20, 1.0);
    let parity = (-0.05_f64).exp() * (100.0 - 95.0);

    assert!(
        (call - put - parity).abs() <= 0.30,
        "C-P={} expected={parity}",
        call - put
    );
}
