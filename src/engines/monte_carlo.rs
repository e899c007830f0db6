//! Parallel dispatch and reduction for Monte Carlo pricers.
//!
//! The protocol fixes the result as a bit-exact function of
//! (seed, thread count, path count): worker i owns the master RNG jumped i
//! times and a half-open slice of the simulation indices, the remainder
//! spread over the first workers; partial sums come back in thread-id
//! order. A thread count of one runs inline on the caller's thread with no
//! synchronization. Changing the thread count reassigns substreams and so
//! changes the bit-exact result; reproducibility is only promised at
//! constant thread count.

use std::thread;

use crate::core::error::McError;
use crate::math::McRng;
use crate::models::GbmPath;
use crate::variance::antithetic::{fill_paired_paths, paired_terminal_sums};

/// Per-worker accumulator: payoff sum, sum of squares, and the number of
/// paths actually simulated (antithetic workers report 2·pairs).
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PartialSums {
    pub sum: f64,
    pub sum_sq: f64,
    pub paths: u64,
}

impl PartialSums {
    #[inline]
    pub fn push(&mut self, payoff: f64) {
        self.sum += payoff;
        self.sum_sq += payoff * payoff;
        self.paths += 1;
    }

    #[inline]
    pub fn merge(&mut self, other: PartialSums) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.paths += other.paths;
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.sum / self.paths as f64
    }
}

/// Runs `worker` over a partition of `total_paths` simulation indices.
///
/// The worker receives an owned substream and its simulation count, and
/// returns its partial sums. Worker-spawn failure joins the already-started
/// workers and surfaces `Threading`.
pub(crate) fn run_parallel<W>(
    master: &McRng,
    total_paths: usize,
    num_threads: u32,
    worker: &W,
) -> Result<PartialSums, McError>
where
    W: Fn(&mut McRng, usize) -> PartialSums + Sync,
{
    let threads = num_threads.max(1) as usize;
    let per_thread = total_paths / threads;
    let remainder = total_paths % threads;

    if threads == 1 {
        let mut rng = master.clone();
        return Ok(worker(&mut rng, total_paths));
    }

    // Thread i gets the master jumped exactly i times.
    let mut units: Vec<(McRng, usize)> = Vec::with_capacity(threads);
    let mut rng = master.clone();
    for i in 0..threads {
        let count = per_thread + usize::from(i < remainder);
        units.push((rng.clone(), count));
        rng.jump();
    }

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(threads);
        for (mut unit_rng, count) in units {
            let handle = thread::Builder::new()
                .spawn_scoped(scope, move || worker(&mut unit_rng, count))
                .map_err(|_| McError::Threading)?;
            handles.push(handle);
        }

        // Reduce in thread-id order so the float additions are ordered.
        let mut total = PartialSums::default();
        for handle in handles {
            let part = handle.join().map_err(|_| McError::Threading)?;
            total.merge(part);
        }
        Ok(total)
    })
}

/// Terminal-payoff accumulator for one worker's index slice.
///
/// With antithetic pairing enabled the slice is consumed as count/2 pairs
/// (at least one), evaluating the payoff at +Z and -Z per draw.
pub(crate) fn terminal_sums<F>(
    rng: &mut McRng,
    count: usize,
    antithetic: bool,
    payoff_of_z: F,
) -> PartialSums
where
    F: Fn(f64) -> f64,
{
    if antithetic {
        let pairs = (count / 2).max(1);
        return paired_terminal_sums(rng, pairs, payoff_of_z);
    }

    let mut sums = PartialSums::default();
    for _ in 0..count {
        sums.push(payoff_of_z(rng.next_normal()));
    }
    sums
}

/// Path-payoff driver over GBM paths, parallelized with the standard
/// partition. Each worker owns its path buffers.
pub(crate) fn run_gbm_path_mc<F>(
    master: &McRng,
    total_paths: usize,
    num_threads: u32,
    antithetic: bool,
    model: &GbmPath,
    payoff: F,
) -> Result<PartialSums, McError>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    run_parallel(master, total_paths, num_threads, &|rng, count| {
        let mut path = vec![0.0_f64; model.num_steps + 1];
        let mut sums = PartialSums::default();

        if antithetic {
            let mut mirror = vec![0.0_f64; model.num_steps + 1];
            let pairs = (count / 2).max(1);
            for _ in 0..pairs {
                fill_paired_paths(model, rng, &mut path, &mut mirror);
                sums.push(payoff(&path));
                sums.push(payoff(&mirror));
            }
        } else {
            for _ in 0..count {
                model.fill_path(rng, &mut path);
                sums.push(payoff(&path));
            }
        }

        sums
    })
}
