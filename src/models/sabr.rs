//! SABR stochastic-volatility dynamics and the context pricer.
//!
//! dF = σ·F^β·dW₁, dσ = ν·σ·dW₂, dW₁dW₂ = ρ·dt. The forward absorbs at
//! zero: once a path touches F = 0 it stays there for the rest of the
//! path. The volatility is floored at 1e-10 to avoid division by zero in
//! downstream ratios. With β = 1 and ν = 0 the dynamics collapse to
//! lognormal and prices approach Black-76.

use crate::core::error::{McError, PriceResult};
use crate::core::{McContext, OptionType};
use crate::engines::monte_carlo::{PartialSums, run_parallel};
use crate::math::McRng;

/// Pricers refine to at least this many steps under stochastic vol.
const MIN_SABR_STEPS: usize = 100;

/// Floor applied to the stochastic volatility state.
const SIGMA_FLOOR: f64 = 1e-10;

/// SABR parameter block.
#[derive(Debug, Clone, Copy)]
pub struct SabrParams {
    /// Initial volatility level α.
    pub alpha: f64,
    /// CEV exponent β in [0, 1].
    pub beta: f64,
    /// Correlation ρ in (-1, 1).
    pub rho: f64,
    /// Vol of vol ν.
    pub nu: f64,
}

impl Default for SabrParams {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            beta: 1.0,
            rho: 0.0,
            nu: 0.0,
        }
    }
}

/// SABR path block with loop constants precomputed.
#[derive(Debug, Clone, Copy)]
pub struct SabrPath {
    pub forward: f64,
    pub params: SabrParams,
    pub dt: f64,
    pub sqrt_dt: f64,
    /// √(1 - ρ²) for the Cholesky split.
    pub sqrt_one_minus_rho2: f64,
    /// e^(-rT)
    pub discount: f64,
    pub num_steps: usize,
}

impl SabrPath {
    pub fn new(forward: f64, params: SabrParams, rate: f64, time: f64, num_steps: usize) -> Self {
        let dt = time / num_steps as f64;
        Self {
            forward,
            params,
            dt,
            sqrt_dt: dt.sqrt(),
            sqrt_one_minus_rho2: (1.0 - params.rho * params.rho).sqrt(),
            discount: (-rate * time).exp(),
            num_steps,
        }
    }

    /// One Euler step; returns the new (forward, volatility) pair.
    #[inline]
    pub fn step_euler(&self, f: f64, sigma: f64, z1: f64, z2: f64) -> (f64, f64) {
        let zf = z1;
        let za = self.params.rho * z1 + self.sqrt_one_minus_rho2 * z2;

        let f_next = if f <= 0.0 {
            // Absorbed: the forward never leaves zero.
            0.0
        } else {
            (f + sigma * f.powf(self.params.beta) * self.sqrt_dt * zf).max(0.0)
        };

        let sigma_next = (sigma + self.params.nu * sigma * self.sqrt_dt * za).max(SIGMA_FLOOR);

        (f_next, sigma_next)
    }

    /// Simulates the terminal forward.
    pub fn sample_terminal(&self, rng: &mut McRng) -> f64 {
        let mut f = self.forward;
        let mut sigma = self.params.alpha;

        for _ in 0..self.num_steps {
            let z1 = rng.next_normal();
            let z2 = rng.next_normal();
            let (f_next, sigma_next) = self.step_euler(f, sigma, z1, z2);
            f = f_next;
            sigma = sigma_next;
        }

        f
    }
}

impl McContext {
    /// Monte Carlo price of a European call on a forward under SABR.
    #[allow(clippy::too_many_arguments)]
    pub fn sabr_call(
        &mut self,
        forward: f64,
        strike: f64,
        rate: f64,
        time: f64,
        alpha: f64,
        beta: f64,
        rho: f64,
        nu: f64,
    ) -> f64 {
        let params = SabrParams {
            alpha,
            beta,
            rho,
            nu,
        };
        let result = self.price_sabr(OptionType::Call, forward, strike, rate, time, params);
        self.fold(result)
    }

    /// Monte Carlo price of a European put on a forward under SABR.
    #[allow(clippy::too_many_arguments)]
    pub fn sabr_put(
        &mut self,
        forward: f64,
        strike: f64,
        rate: f64,
        time: f64,
        alpha: f64,
        beta: f64,
        rho: f64,
        nu: f64,
    ) -> f64 {
        let params = SabrParams {
            alpha,
            beta,
            rho,
            nu,
        };
        let result = self.price_sabr(OptionType::Put, forward, strike, rate, time, params);
        self.fold(result)
    }

    fn price_sabr(
        &self,
        option_type: OptionType,
        forward: f64,
        strike: f64,
        rate: f64,
        time: f64,
        params: SabrParams,
    ) -> PriceResult {
        if forward <= 0.0 || strike <= 0.0 || time < 0.0 {
            return Err(McError::InvalidArgument);
        }
        if params.alpha < 0.0 || !(0.0..=1.0).contains(&params.beta) || params.nu < 0.0 {
            return Err(McError::InvalidArgument);
        }
        if !(-1.0..=1.0).contains(&params.rho) {
            return Err(McError::InvalidArgument);
        }

        if time == 0.0 {
            return Ok(option_type.payoff(forward, strike));
        }

        let num_steps = self.num_steps.max(MIN_SABR_STEPS);
        let model = SabrPath::new(forward, params, rate, time, num_steps);

        let sums = run_parallel(&self.rng, self.num_paths, self.num_threads, &|rng, count| {
            let mut sums = PartialSums::default();
            for _ in 0..count {
                let f_t = model.sample_terminal(rng);
                sums.push(option_type.payoff(f_t, strike));
            }
            sums
        })?;

        Ok(model.discount * sums.mean())
    }
}
