//! Black-76 forward dynamics and the context pricer for options on
//! futures/forwards.
//!
//! The forward is a martingale under the pricing measure, so the log drift
//! is -σ²T/2 with no cost of carry; discounting still uses e^(-rT).

use crate::core::error::{McError, PriceResult};
use crate::core::{McContext, OptionType};
use crate::engines::monte_carlo::{run_parallel, terminal_sums};
use crate::math::McRng;

/// Terminal-only Black-76 block: F(T) = F·exp(-σ²T/2 + σ√T·Z).
#[derive(Debug, Clone, Copy)]
pub struct Black76 {
    pub forward: f64,
    /// -σ²·T/2
    pub drift: f64,
    /// σ·√T
    pub diffusion: f64,
    /// e^(-rT)
    pub discount: f64,
}

impl Black76 {
    pub fn new(forward: f64, rate: f64, vol: f64, time: f64) -> Self {
        Self {
            forward,
            drift: -0.5 * vol * vol * time,
            diffusion: vol * time.sqrt(),
            discount: (-rate * time).exp(),
        }
    }

    /// Terminal forward for a given standard normal draw.
    #[inline]
    pub fn terminal(&self, z: f64) -> f64 {
        self.forward * self.diffusion.mul_add(z, self.drift).exp()
    }

    /// Terminal forward from the generator.
    #[inline]
    pub fn sample_terminal(&self, rng: &mut McRng) -> f64 {
        self.terminal(rng.next_normal())
    }
}

impl McContext {
    /// Monte Carlo price of a call on a forward under Black-76 dynamics.
    pub fn black76_call(
        &mut self,
        forward: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
    ) -> f64 {
        let result = self.price_black76(OptionType::Call, forward, strike, rate, vol, time);
        self.fold(result)
    }

    /// Monte Carlo price of a put on a forward under Black-76 dynamics.
    pub fn black76_put(
        &mut self,
        forward: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
    ) -> f64 {
        let result = self.price_black76(OptionType::Put, forward, strike, rate, vol, time);
        self.fold(result)
    }

    fn price_black76(
        &self,
        option_type: OptionType,
        forward: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
    ) -> PriceResult {
        if forward <= 0.0 || strike <= 0.0 || vol < 0.0 || time < 0.0 {
            return Err(McError::InvalidArgument);
        }

        if time == 0.0 {
            return Ok(option_type.payoff(forward, strike));
        }

        let model = Black76::new(forward, rate, vol, time);
        if vol == 0.0 {
            return Ok(model.discount * option_type.payoff(forward, strike));
        }

        let antithetic = self.antithetic;
        let sums = run_parallel(&self.rng, self.num_paths, self.num_threads, &|rng, count| {
            terminal_sums(rng, count, antithetic, |z| {
                option_type.payoff(model.terminal(z), strike)
            })
        })?;

        Ok(model.discount * sums.mean())
    }
}
