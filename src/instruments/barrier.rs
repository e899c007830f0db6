//! Barrier options with Brownian-bridge monitoring.
//!
//! Each path is checked discretely at its vertices and continuously in
//! between: for a segment with both endpoints on the safe side of the
//! barrier, the bridge crossing probability
//!   p = exp(-2·ln(s₁/H)·ln(s₂/H) / (σ²Δ))
//! (symmetric for up barriers) is compared against a uniform draw from
//! the same stream as the path normals, so seed determinism carries
//! through the correction.

use crate::core::error::{McError, PriceResult};
use crate::core::{BarrierKind, McContext, OptionType};
use crate::engines::monte_carlo::{PartialSums, run_parallel};
use crate::models::GbmPath;

/// Crossing probability of a Brownian bridge between `s1` and `s2`
/// against barrier `h` over a step of variance σ²Δ.
///
/// Returns 1 when an endpoint already violates the barrier.
fn bridge_hit_probability(s1: f64, s2: f64, h: f64, vol: f64, dt: f64, is_up: bool) -> f64 {
    if is_up {
        if s1 >= h || s2 >= h {
            return 1.0;
        }
        if s1 <= 0.0 || s2 <= 0.0 {
            return 0.0;
        }
        let log1 = (h / s1).ln();
        let log2 = (h / s2).ln();
        if log1 <= 0.0 || log2 <= 0.0 {
            return 1.0;
        }
        (-2.0 * log1 * log2 / (vol * vol * dt)).exp()
    } else {
        if s1 <= h || s2 <= h {
            return 1.0;
        }
        if s1 <= 0.0 || s2 <= 0.0 {
            return 0.0;
        }
        let log1 = (s1 / h).ln();
        let log2 = (s2 / h).ln();
        if log1 <= 0.0 || log2 <= 0.0 {
            return 1.0;
        }
        (-2.0 * log1 * log2 / (vol * vol * dt)).exp()
    }
}

impl McContext {
    /// Barrier call with discrete plus Brownian-bridge monitoring.
    #[allow(clippy::too_many_arguments)]
    pub fn barrier_call(
        &mut self,
        spot: f64,
        strike: f64,
        barrier: f64,
        rebate: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_steps: usize,
        kind: BarrierKind,
    ) -> f64 {
        let result = self.price_barrier(
            OptionType::Call,
            kind,
            spot,
            strike,
            barrier,
            rebate,
            rate,
            vol,
            time,
            num_steps,
        );
        self.fold(result)
    }

    /// Barrier put with discrete plus Brownian-bridge monitoring.
    #[allow(clippy::too_many_arguments)]
    pub fn barrier_put(
        &mut self,
        spot: f64,
        strike: f64,
        barrier: f64,
        rebate: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_steps: usize,
        kind: BarrierKind,
    ) -> f64 {
        let result = self.price_barrier(
            OptionType::Put,
            kind,
            spot,
            strike,
            barrier,
            rebate,
            rate,
            vol,
            time,
            num_steps,
        );
        self.fold(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn price_barrier(
        &self,
        option_type: OptionType,
        kind: BarrierKind,
        spot: f64,
        strike: f64,
        barrier: f64,
        rebate: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_steps: usize,
    ) -> PriceResult {
        if spot <= 0.0 || strike <= 0.0 || barrier <= 0.0 || vol < 0.0 || time < 0.0 {
            return Err(McError::InvalidArgument);
        }
        if num_steps == 0 {
            return Err(McError::InvalidArgument);
        }

        let model = GbmPath::new(spot, rate, vol, time, num_steps);
        let dt = model.dt;
        let is_up = kind.is_up();
        let is_knock_in = kind.is_knock_in();

        let sums = run_parallel(&self.rng, self.num_paths, self.num_threads, &|rng, count| {
            let mut path = vec![0.0_f64; num_steps + 1];
            let mut sums = PartialSums::default();

            for _ in 0..count {
                model.fill_path(rng, &mut path);

                let mut hit = false;
                for j in 0..num_steps {
                    let s1 = path[j];
                    let s2 = path[j + 1];

                    // Discrete vertex check first; the bridge uniform is
                    // only consumed for interior segments.
                    let vertex_hit = if is_up {
                        s1 >= barrier || s2 >= barrier
                    } else {
                        s1 <= barrier || s2 <= barrier
                    };
                    if vertex_hit {
                        hit = true;
                        break;
                    }

                    let p_hit = bridge_hit_probability(s1, s2, barrier, vol, dt, is_up);
                    if rng.next_uniform() < p_hit {
                        hit = true;
                        break;
                    }
                }

                let terminal = path[num_steps];
                let payoff = if is_knock_in {
                    if hit {
                        option_type.payoff(terminal, strike)
                    } else {
                        0.0
                    }
                } else if hit {
                    rebate
                } else {
                    option_type.payoff(terminal, strike)
                };

                sums.push(payoff);
            }

            sums
        })?;

        Ok(model.discount * sums.mean())
    }
}
