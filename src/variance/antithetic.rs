//! Antithetic pairing: evaluate each payoff at (+Z, -Z) so odd-moment
//! noise cancels. One normal draw yields two paths; the reported path
//! count is 2·pairs and the final mean divides by it.

use crate::engines::monte_carlo::PartialSums;
use crate::math::McRng;
use crate::models::GbmPath;

/// Accumulates `pairs` antithetic terminal payoffs.
pub(crate) fn paired_terminal_sums<F>(rng: &mut McRng, pairs: usize, payoff_of_z: F) -> PartialSums
where
    F: Fn(f64) -> f64,
{
    let mut sums = PartialSums::default();
    for _ in 0..pairs {
        let z = rng.next_normal();
        sums.push(payoff_of_z(z));
        sums.push(payoff_of_z(-z));
    }
    sums
}

/// Generates a (+Z, -Z) path pair from a single draw per step.
///
/// Both buffers must have length num_steps + 1; index 0 holds the spot.
pub(crate) fn fill_paired_paths(
    model: &GbmPath,
    rng: &mut McRng,
    plus: &mut [f64],
    minus: &mut [f64],
) {
    plus[0] = model.spot;
    minus[0] = model.spot;

    for i in 0..model.num_steps {
        let z = rng.next_normal();
        plus[i + 1] = model.step(plus[i], z);
        minus[i + 1] = model.step(minus[i], -z);
    }
}
