//! Barrier option tests: agreement with the continuous-monitoring
//! analytics (the Brownian bridge closes most of the discretization gap)
//! and the knock-in/knock-out parity.

use quantmc::engines::analytic::{barrier_down_out_call, black_scholes_call};
use quantmc::{BarrierKind, McContext};

#[test]
fn down_out_call_matches_the_analytic_reference() {
    let mut ctx = McContext::new().with_seed(42).with_paths(100_000);
    let mc = ctx.barrier_call(
        100.0,
        100.0,
        80.0,
        0.0,
        0.05,
        0.20,
        1.0,
        252,
        BarrierKind::DownOut,
    );
    let analytic = barrier_down_out_call(100.0, 100.0, 80.0, 0.0, 0.05, 0.20, 1.0);

    assert!(
        (mc - analytic).abs() <= 1.0,
        "down-out call mc={mc} analytic={analytic}"
    );
}

#[test]
fn knock_in_plus_knock_out_reconstructs_the_vanilla() {
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);

    let down_in = ctx.barrier_call(
        100.0,
        100.0,
        80.0,
        0.0,
        0.05,
        0.20,
        1.0,
        252,
        BarrierKind::DownIn,
    );
    let down_out = ctx.barrier_call(
        100.0,
        100.0,
        80.0,
        0.0,
        0.05,
        0.20,
        1.0,
        252,
        BarrierKind::DownOut,
    );
    let vanilla = black_scholes_call(100.0, 100.0, 0.05, 0.20, 1.0);

    assert!(
        (down_in + down_out - vanilla).abs() <= 1.5,
        "in+out={} vanilla={vanilla}",
        down_in + down_out
    );
}

#[test]
fn up_out_call_stays_inside_its_bounds() {
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);
    let price = ctx.barrier_call(
        100.0,
        100.0,
        130.0,
        0.0,
        0.05,
        0.20,
        1.0,
        252,
        BarrierKind::UpOut,
    );

    // Worth something below the vanilla: the knock-out caps the upside.
    assert!(price > 0.0 && price < 15.0, "up-out call={price}");

    let vanilla = black_scholes_call(100.0, 100.0, 0.05, 0.20, 1.0);
    assert!(price < vanilla, "up-out={price} vanilla={vanilla}");
}

#[test]
fn bridge_correction_prices_above_vertex_only_monitoring_for_knock_in() {
    // The bridge sees crossings the coarse grid misses: a coarse
    // knock-in priced with the bridge dominates one with many fewer
    // monitoring dates only through the continuous correction, so both
    // land near the analytic value.
    let mut coarse = McContext::new().with_seed(42).with_paths(50_000);
    let coarse_price = coarse.barrier_call(
        100.0,
        100.0,
        85.0,
        0.0,
        0.05,
        0.20,
        1.0,
        16,
        BarrierKind::DownIn,
    );

    let mut fine = McContext::new().with_seed(42).with_paths(50_000);
    let fine_price = fine.barrier_call(
        100.0,
        100.0,
        85.0,
        0.0,
        0.05,
        0.20,
        1.0,
        504,
        BarrierKind::DownIn,
    );

    assert!(
        (coarse_price - fine_price).abs() <= 0.75,
        "coarse={coarse_price} fine={fine_price}"
    );
}

#[test]
fn knock_out_value_decreases_as_the_barrier_tightens() {
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);

    let loose = ctx.barrier_call(
        100.0,
        100.0,
        70.0,
        0.0,
        0.05,
        0.20,
        1.0,
        128,
        BarrierKind::DownOut,
    );
    let tight = ctx.barrier_call(
        100.0,
        100.0,
        95.0,
        0.0,
        0.05,
        0.20,
        1.0,
        128,
        BarrierKind::DownOut,
    );

    assert!(tight < loose, "tight={tight} loose={loose}");
}

#[test]
fn barrier_put_parity_against_the_mc_vanilla() {
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);

    let up_in = ctx.barrier_put(
        100.0,
        100.0,
        120.0,
        0.0,
        0.05,
        0.20,
        1.0,
        252,
        BarrierKind::UpIn,
    );
    let up_out = ctx.barrier_put(
        100.0,
        100.0,
        120.0,
        0.0,
        0.05,
        0.20,
        1.0,
        252,
        BarrierKind::UpOut,
    );
    let vanilla = ctx.european_put(100.0, 100.0, 0.05, 0.20, 1.0);

    assert!(
        (up_in + up_out - vanilla).abs() <= 1.5,
        "in+out={} vanilla={vanilla}",
        up_in + up_out
    );
}

#[test]
fn rebate_is_collected_on_knock_out() {
    let mut ctx = McContext::new().with_seed(42).with_paths(50_000);

    let without = ctx.barrier_call(
        100.0,
        100.0,
        95.0,
        0.0,
        0.05,
        0.20,
        1.0,
        128,
        BarrierKind::DownOut,
    );
    let with_rebate = ctx.barrier_call(
        100.0,
        100.0,
        95.0,
        4.0,
        0.05,
        0.20,
        1.0,
        128,
        BarrierKind::DownOut,
    );

    assert!(
        with_rebate > without,
        "rebate ignored: with={with_rebate} without={without}"
    );
}
