//! Merton jump-diffusion dynamics and the context pricer.
//!
//! dS/S = (r - λk)dt + σ·dW + (J - 1)dN with log J ~ N(μⱼ, σⱼ²) and N a
//! Poisson process of intensity λ. The compensator k = E[J - 1]
//! = exp(μⱼ + σⱼ²/2) - 1 keeps the discounted spot a martingale.

use crate::core::error::{McError, PriceResult};
use crate::core::{McContext, OptionType};
use crate::engines::monte_carlo::{PartialSums, run_parallel};
use crate::math::McRng;

/// Jump pricers refine to at least daily steps.
const MIN_MERTON_STEPS: usize = 252;

/// Below this λΔ the Poisson count is approximated by a Bernoulli draw.
const BERNOULLI_THRESHOLD: f64 = 0.1;

/// Merton path block with loop constants precomputed.
#[derive(Debug, Clone, Copy)]
pub struct MertonPath {
    pub spot: f64,
    pub rate: f64,
    pub sigma: f64,
    pub lambda: f64,
    pub mu_j: f64,
    pub sigma_j: f64,
    pub dt: f64,
    pub sqrt_dt: f64,
    /// Compensator k = E[J - 1].
    pub k: f64,
    /// e^(-rT)
    pub discount: f64,
    pub num_steps: usize,
}

impl MertonPath {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: f64,
        rate: f64,
        sigma: f64,
        lambda: f64,
        mu_j: f64,
        sigma_j: f64,
        time: f64,
        num_steps: usize,
    ) -> Self {
        let dt = time / num_steps as f64;
        Self {
            spot,
            rate,
            sigma,
            lambda,
            mu_j,
            sigma_j,
            dt,
            sqrt_dt: dt.sqrt(),
            k: (mu_j + 0.5 * sigma_j * sigma_j).exp() - 1.0,
            discount: (-rate * time).exp(),
            num_steps,
        }
    }

    /// One step: compensated drift, diffusion, and the sum of N jump
    /// log-returns, exponentiated together.
    #[inline]
    pub fn step(&self, s: f64, rng: &mut McRng) -> f64 {
        let z = rng.next_normal();

        let drift =
            (self.rate - self.lambda * self.k - 0.5 * self.sigma * self.sigma) * self.dt;
        let diffusion = self.sigma * self.sqrt_dt * z;

        let num_jumps = sample_poisson(rng, self.lambda * self.dt);
        let mut jump_sum = 0.0;
        for _ in 0..num_jumps {
            jump_sum += self.mu_j + self.sigma_j * rng.next_normal();
        }

        s * (drift + diffusion + jump_sum).exp()
    }

    /// Simulates the terminal spot.
    pub fn sample_terminal(&self, rng: &mut McRng) -> f64 {
        let mut s = self.spot;
        for _ in 0..self.num_steps {
            s = self.step(s, rng);
        }
        s
    }
}

/// Poisson count with mean `lambda_dt`.
///
/// Small means use a single Bernoulli draw; otherwise the inverse-transform
/// product loop on uniforms.
pub fn sample_poisson(rng: &mut McRng, lambda_dt: f64) -> u32 {
    if lambda_dt <= 0.0 {
        return 0;
    }

    if lambda_dt < BERNOULLI_THRESHOLD {
        return u32::from(rng.next_uniform() < lambda_dt);
    }

    let limit = (-lambda_dt).exp();
    let mut p = 1.0;
    let mut count = 0_u32;

    loop {
        count += 1;
        p *= rng.next_uniform();
        if p <= limit {
            break;
        }
    }

    count - 1
}

impl McContext {
    /// Monte Carlo price of a European call under Merton jump-diffusion.
    #[allow(clippy::too_many_arguments)]
    pub fn merton_call(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        time: f64,
        sigma: f64,
        lambda: f64,
        mu_j: f64,
        sigma_j: f64,
    ) -> f64 {
        let result = self.price_merton(
            OptionType::Call,
            spot,
            strike,
            rate,
            time,
            sigma,
            lambda,
            mu_j,
            sigma_j,
        );
        self.fold(result)
    }

    /// Monte Carlo price of a European put under Merton jump-diffusion.
    #[allow(clippy::too_many_arguments)]
    pub fn merton_put(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        time: f64,
        sigma: f64,
        lambda: f64,
        mu_j: f64,
        sigma_j: f64,
    ) -> f64 {
        let result = self.price_merton(
            OptionType::Put,
            spot,
            strike,
            rate,
            time,
            sigma,
            lambda,
            mu_j,
            sigma_j,
        );
        self.fold(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn price_merton(
        &self,
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate: f64,
        time: f64,
        sigma: f64,
        lambda: f64,
        mu_j: f64,
        sigma_j: f64,
    ) -> PriceResult {
        if spot <= 0.0 || strike <= 0.0 || sigma < 0.0 || lambda < 0.0 || sigma_j < 0.0 {
            return Err(McError::InvalidArgument);
        }
        if time < 0.0 {
            return Err(McError::InvalidArgument);
        }

        if time == 0.0 {
            return Ok(option_type.payoff(spot, strike));
        }

        let num_steps = self.num_steps.max(MIN_MERTON_STEPS);
        let model = MertonPath::new(spot, rate, sigma, lambda, mu_j, sigma_j, time, num_steps);

        let sums = run_parallel(&self.rng, self.num_paths, self.num_threads, &|rng, count| {
            let mut sums = PartialSums::default();
            for _ in 0..count {
                let s_t = model.sample_terminal(rng);
                sums.push(option_type.payoff(s_t, strike));
            }
            sums
        })?;

        Ok(model.discount * sums.mean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poisson_zero_intensity_never_jumps() {
        let mut rng = McRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(sample_poisson(&mut rng, 0.0), 0);
        }
    }

    #[test]
    fn poisson_mean_tracks_intensity() {
        let mut rng = McRng::seed_from_u64(2);
        for &lambda_dt in &[0.05, 0.5, 2.0] {
            let n = 200_000;
            let total: u64 = (0..n)
                .map(|_| sample_poisson(&mut rng, lambda_dt) as u64)
                .sum();
            let mean = total as f64 / n as f64;
            assert!(
                (mean - lambda_dt).abs() < 0.02,
                "lambda_dt={lambda_dt} mean={mean}"
            );
        }
    }

    #[test]
    fn compensator_matches_closed_form() {
        let model = MertonPath::new(100.0, 0.05, 0.2, 1.0, -0.1, 0.15, 1.0, 252);
        let expected = (-0.1_f64 + 0.5 * 0.15 * 0.15).exp() - 1.0;
        assert!((model.k - expected).abs() < 1e-15);
    }

    #[test]
    fn zero_jump_intensity_reduces_to_gbm_drift() {
        // With λ = 0 and no noise the step is pure compensated drift.
        let model = MertonPath::new(100.0, 0.05, 0.0, 0.0, -0.1, 0.15, 1.0, 1);
        let mut rng = McRng::seed_from_u64(3);
        let s = model.step(100.0, &mut rng);
        assert!((s - 100.0 * 0.05_f64.exp()).abs() < 1e-9);
    }

    #[test]
    fn negative_jump_intensity_is_rejected() {
        let mut ctx = McContext::new();
        assert_eq!(
            ctx.merton_call(100.0, 100.0, 0.05, 1.0, 0.2, -1.0, -0.1, 0.15),
            0.0
        );
        assert!(ctx.last_error().is_some());
    }
}
