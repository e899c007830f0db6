//! Digital and lookback option tests.

use quantmc::engines::analytic::{
    digital_cash_call, lookback_floating_call, lookback_floating_put,
};
use quantmc::{DigitalPayout, LookbackStrike, McContext};

#[test]
fn digital_cash_call_matches_the_closed_form() {
    // Closed form at (100, 100, T=1, r=5%, sigma=20%, Q=1) is near 0.476.
    let closed = digital_cash_call(100.0, 100.0, 1.0, 0.05, 0.20, 1.0);
    assert!((closed - 0.476).abs() <= 0.10, "closed={closed}");

    let mut ctx = McContext::new().with_seed(42).with_paths(100_000);
    let mc = ctx.digital_call(100.0, 100.0, 1.0, 0.05, 0.20, 1.0, DigitalPayout::Cash);
    assert!((mc - closed).abs() <= 0.10, "mc={mc} closed={closed}");
}

#[test]
fn digital_cash_parity_sums_to_the_discounted_payout() {
    let mut ctx = McContext::new().with_seed(42).with_paths(100_000);

    let call = ctx.digital_call(100.0, 100.0, 1.0, 0.05, 0.20, 1.0, DigitalPayout::Cash);
    let put = ctx.digital_put(100.0, 100.0, 1.0, 0.05, 0.20, 1.0, DigitalPayout::Cash);
    let bond = (-0.05_f64).exp();

    assert!(
        (call + put - bond).abs() <= 0.01,
        "call={call} put={put} bond={bond}"
    );
}

#[test]
fn asset_digital_scales_with_the_payout_region() {
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);

    let deep_itm = ctx.digital_call(150.0, 100.0, 0.0, 0.05, 0.20, 1.0, DigitalPayout::Asset);
    let deep_otm = ctx.digital_call(60.0, 100.0, 0.0, 0.05, 0.20, 1.0, DigitalPayout::Asset);

    assert!(deep_itm > 100.0, "deep ITM asset call={deep_itm}");
    assert!(deep_otm < 15.0, "deep OTM asset call={deep_otm}");
}

#[test]
fn floating_lookback_mc_tracks_the_analytic_forms() {
    // 1000 monitoring points keep the discrete-extreme bias inside the
    // loose tolerance against continuous-monitoring analytics.
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);

    let mc_call = ctx.lookback_call(100.0, 100.0, 0.05, 0.20, 1.0, 1000, LookbackStrike::Floating);
    let analytic_call = lookback_floating_call(100.0, 0.05, 0.20, 1.0);
    assert!(
        (mc_call - analytic_call).abs() <= 1.0,
        "floating call mc={mc_call} analytic={analytic_call}"
    );

    let mc_put = ctx.lookback_put(100.0, 100.0, 0.05, 0.20, 1.0, 1000, LookbackStrike::Floating);
    let analytic_put = lookback_floating_put(100.0, 0.05, 0.20, 1.0);
    assert!(
        (mc_put - analytic_put).abs() <= 1.0,
        "floating put mc={mc_put} analytic={analytic_put}"
    );
}

#[test]
fn lookback_payoffs_respect_their_construction_bounds() {
    let mut ctx = McContext::new().with_seed(42).with_paths(30_000);

    // Floating payoffs are non-negative by construction.
    let call = ctx.lookback_call(100.0, 100.0, 0.05, 0.20, 1.0, 252, LookbackStrike::Floating);
    let put = ctx.lookback_put(100.0, 100.0, 0.05, 0.20, 1.0, 252, LookbackStrike::Floating);
    assert!(call > 0.0);
    assert!(put > 0.0);

    // Fixed lookbacks dominate their vanilla counterparts.
    let fixed_call = ctx.lookback_call(100.0, 100.0, 0.05, 0.20, 1.0, 252, LookbackStrike::Fixed);
    let european = ctx.european_call(100.0, 100.0, 0.05, 0.20, 1.0);
    assert!(
        fixed_call >= european - 0.05,
        "fixed={fixed_call} european={european}"
    );
}

#[test]
fn digital_and_lookback_are_reproducible() {
    let mut a = McContext::new().with_seed(9).with_paths(20_000);
    let mut b = McContext::new().with_seed(9).with_paths(20_000);

    let da = a.digital_call(100.0, 100.0, 1.0, 0.05, 0.20, 1.0, DigitalPayout::Cash);
    let db = b.digital_call(100.0, 100.0, 1.0, 0.05, 0.20, 1.0, DigitalPayout::Cash);
    assert_eq!(da.to_bits(), db.to_bits());

    let la = a.lookback_put(100.0, 100.0, 0.05, 0.20, 1.0, 64, LookbackStrike::Fixed);
    let lb = b.lookback_put(100.0, 100.0, 0.05, 0.20, 1.0, 64, LookbackStrike::Fixed);
    assert_eq!(la.to_bits(), lb.to_bits());
}
