//! Least-squares Monte Carlo (Longstaff-Schwartz) for early exercise.
//!
//! Forward-simulate the full path table, seed cash flows with the terminal
//! intrinsic, then walk backward: discount one step, regress the cash flow
//! of in-the-money paths on three weighted-Laguerre basis functions of
//! x = S/K, and exercise where the immediate intrinsic beats the estimated
//! continuation. The regression solves the 3x3 normal equations by LU with
//! partial pivoting; singular or under-determined steps are skipped.
//!
//! For non-dividend-paying calls early exercise is never optimal, so the
//! method lands within regression noise of the European price.

use nalgebra::{Matrix3, Vector3};

use crate::core::error::{McError, PriceResult};
use crate::core::{McContext, OptionType};
use crate::models::GbmPath;

/// Basis dimension for the continuation regression.
pub(crate) const NUM_BASIS: usize = 3;

/// Bermudan fine-path refinement: sub-steps per exercise instant, and the
/// floor on the total simulation grid.
const SUBSTEPS_PER_EXERCISE: usize = 10;
const MIN_BERMUDAN_SUBSTEPS: usize = 50;

/// Weighted Laguerre basis {1, 1 - x, 1 - 2x + x²/2} of x = S/K.
#[inline]
fn basis(x: f64) -> [f64; NUM_BASIS] {
    [1.0, 1.0 - x, 1.0 - 2.0 * x + 0.5 * x * x]
}

/// Solves (XᵀX)β = Xᵀy. Returns None for singular systems so the caller
/// can skip the step.
fn regress(xtx: &Matrix3<f64>, xty: &Vector3<f64>) -> Option<Vector3<f64>> {
    let lu = xtx.lu();
    let det = lu.determinant();
    if !det.is_finite() || det.abs() < 1e-12 {
        return None;
    }
    lu.solve(xty).filter(|beta| beta.iter().all(|b| b.is_finite()))
}

/// Allocates a zeroed table, surfacing allocation failure as OutOfMemory.
fn alloc_table(len: usize) -> Result<Vec<f64>, McError> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(len)
        .map_err(|_| McError::OutOfMemory)?;
    table.resize(len, 0.0);
    Ok(table)
}

/// Accumulates the normal equations and ITM index set at one exercise
/// step, then applies the exercise decision in place.
fn exercise_step(
    option_type: OptionType,
    strike: f64,
    spots: impl Fn(usize) -> f64,
    n_paths: usize,
    cashflow: &mut [f64],
    itm: &mut Vec<usize>,
) {
    itm.clear();
    let mut xtx = Matrix3::<f64>::zeros();
    let mut xty = Vector3::<f64>::zeros();

    for i in 0..n_paths {
        let s_t = spots(i);
        if option_type.payoff(s_t, strike) > 0.0 {
            itm.push(i);
            let b = basis(s_t / strike);
            for j in 0..NUM_BASIS {
                xty[j] += b[j] * cashflow[i];
                for k in 0..NUM_BASIS {
                    xtx[(j, k)] += b[j] * b[k];
                }
            }
        }
    }

    if itm.len() < NUM_BASIS {
        return;
    }

    let Some(beta) = regress(&xtx, &xty) else {
        return;
    };

    for &i in itm.iter() {
        let s_t = spots(i);
        let b = basis(s_t / strike);
        let continuation = beta[0] * b[0] + beta[1] * b[1] + beta[2] * b[2];
        let exercise = option_type.payoff(s_t, strike);
        if exercise > continuation {
            cashflow[i] = exercise;
        }
    }
}

/// American price over a uniform exercise grid of `num_steps` steps.
#[allow(clippy::too_many_arguments)]
pub(crate) fn american_lsm(
    ctx: &McContext,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    num_steps: usize,
) -> PriceResult {
    let n_paths = ctx.num_paths;
    let rows = num_steps + 1;
    let dt = time / num_steps as f64;
    let df = (-rate * dt).exp();

    let mut paths = alloc_table(n_paths * rows)?;
    let mut cashflow = alloc_table(n_paths)?;

    let model = GbmPath::new(spot, rate, vol, time, num_steps);
    let mut rng = ctx.rng.clone();

    for i in 0..n_paths {
        model.fill_path(&mut rng, &mut paths[i * rows..(i + 1) * rows]);
    }

    for i in 0..n_paths {
        cashflow[i] = option_type.payoff(paths[i * rows + num_steps], strike);
    }

    let mut itm = Vec::with_capacity(n_paths);
    for step in (1..num_steps).rev() {
        for cf in cashflow.iter_mut() {
            *cf *= df;
        }

        exercise_step(
            option_type,
            strike,
            |i| paths[i * rows + step],
            n_paths,
            &mut cashflow,
            &mut itm,
        );
    }

    // One more step discounts from the first exercise date to time zero.
    let total: f64 = cashflow.iter().map(|cf| cf * df).sum();
    Ok(total / n_paths as f64)
}

/// Bermudan price over explicit exercise instants given as fractions of
/// maturity, the last being 1.0.
///
/// Simulates a fine path (ten sub-steps per instant, at least fifty total)
/// and snapshots the spot at each instant; the backward induction then
/// runs only over the instants with per-gap discounting.
#[allow(clippy::too_many_arguments)]
pub(crate) fn bermudan_lsm(
    ctx: &McContext,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    exercise_times: &[f64],
) -> PriceResult {
    let n_paths = ctx.num_paths;
    let n_exercise = exercise_times.len();
    let sim_steps = (n_exercise * SUBSTEPS_PER_EXERCISE).max(MIN_BERMUDAN_SUBSTEPS);

    let mut spot_at_exercise = alloc_table(n_paths * n_exercise)?;
    let mut cashflow = alloc_table(n_paths)?;

    let ex_steps: Vec<usize> = exercise_times
        .iter()
        .map(|&fraction| {
            let f = fraction.clamp(0.0, 1.0);
            ((f * sim_steps as f64 + 0.5) as usize).min(sim_steps)
        })
        .collect();

    let model = GbmPath::new(spot, rate, vol, time, sim_steps);
    let mut rng = ctx.rng.clone();
    let mut path = vec![0.0_f64; sim_steps + 1];

    for i in 0..n_paths {
        model.fill_path(&mut rng, &mut path);
        for (j, &step) in ex_steps.iter().enumerate() {
            spot_at_exercise[i * n_exercise + j] = path[step];
        }
    }

    for i in 0..n_paths {
        cashflow[i] = option_type.payoff(spot_at_exercise[i * n_exercise + n_exercise - 1], strike);
    }

    let mut itm = Vec::with_capacity(n_paths);
    for ex_idx in (0..n_exercise.saturating_sub(1)).rev() {
        let t_this = exercise_times[ex_idx] * time;
        let t_next = exercise_times[ex_idx + 1] * time;
        let df = (-rate * (t_next - t_this)).exp();

        for cf in cashflow.iter_mut() {
            *cf *= df;
        }

        exercise_step(
            option_type,
            strike,
            |i| spot_at_exercise[i * n_exercise + ex_idx],
            n_paths,
            &mut cashflow,
            &mut itm,
        );
    }

    let df_first = (-rate * exercise_times[0] * time).exp();
    let total: f64 = cashflow.iter().map(|cf| cf * df_first).sum();
    Ok(total / n_paths as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_values_at_the_money() {
        let b = basis(1.0);
        assert_eq!(b[0], 1.0);
        assert_eq!(b[1], 0.0);
        assert!((b[2] - (-0.5)).abs() < 1e-15);
    }

    #[test]
    fn regression_recovers_a_quadratic() {
        // y = 2·L0 - 3·L1 + 0.5·L2 sampled at a few abscissae.
        let coeffs = [2.0, -3.0, 0.5];
        let mut xtx = Matrix3::<f64>::zeros();
        let mut xty = Vector3::<f64>::zeros();

        for i in 0..50 {
            let x = 0.5 + i as f64 * 0.02;
            let b = basis(x);
            let y = coeffs[0] * b[0] + coeffs[1] * b[1] + coeffs[2] * b[2];
            for j in 0..NUM_BASIS {
                xty[j] += b[j] * y;
                for k in 0..NUM_BASIS {
                    xtx[(j, k)] += b[j] * b[k];
                }
            }
        }

        let beta = regress(&xtx, &xty).expect("well-conditioned system");
        for j in 0..NUM_BASIS {
            assert!((beta[j] - coeffs[j]).abs() < 1e-8, "beta[{j}]={}", beta[j]);
        }
    }

    #[test]
    fn singular_system_is_rejected() {
        // Every sample at the same abscissa makes the design rank one.
        let mut xtx = Matrix3::<f64>::zeros();
        let mut xty = Vector3::<f64>::zeros();
        let b = basis(1.0);
        for _ in 0..10 {
            for j in 0..NUM_BASIS {
                xty[j] += b[j] * 2.0;
                for k in 0..NUM_BASIS {
                    xtx[(j, k)] += b[j] * b[k];
                }
            }
        }
        assert!(regress(&xtx, &xty).is_none());
    }

    #[test]
    fn american_put_beats_intrinsic_on_a_small_run() {
        let ctx = McContext::new().with_seed(42).with_paths(5_000);
        let price = american_lsm(&ctx, OptionType::Put, 90.0, 100.0, 0.05, 0.2, 1.0, 20)
            .expect("pricing succeeds");
        assert!(price >= 10.0 - 0.3, "price={price}");
    }

    #[test]
    fn bermudan_single_instant_is_european() {
        // One exercise instant at maturity leaves no early-exercise loop.
        let ctx = McContext::new().with_seed(42).with_paths(20_000);
        let single = bermudan_lsm(&ctx, OptionType::Put, 100.0, 100.0, 0.05, 0.2, 1.0, &[1.0])
            .expect("pricing succeeds");
        use crate::engines::analytic::black_scholes::black_scholes_put;
        let european = black_scholes_put(100.0, 100.0, 0.05, 0.2, 1.0);
        assert!((single - european).abs() < 0.5, "single={single} european={european}");
    }
}
