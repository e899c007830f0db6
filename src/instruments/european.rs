//! European vanilla options under GBM.
//!
//! Terminal-only: closed-form drift lets one normal draw produce S(T), so
//! no path is materialized. Antithetic pairing and the parallel dispatcher
//! both apply.

use crate::core::error::{McError, PriceResult};
use crate::core::{McContext, OptionType};
use crate::engines::monte_carlo::{run_parallel, terminal_sums};
use crate::models::Gbm;

impl McContext {
    /// Monte Carlo price of a European call.
    pub fn european_call(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
    ) -> f64 {
        let result = self.price_european(OptionType::Call, spot, strike, rate, vol, time);
        self.fold(result)
    }

    /// Monte Carlo price of a European put.
    pub fn european_put(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
    ) -> f64 {
        let result = self.price_european(OptionType::Put, spot, strike, rate, vol, time);
        self.fold(result)
    }

    fn price_european(
        &self,
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
    ) -> PriceResult {
        if spot <= 0.0 || strike <= 0.0 || vol < 0.0 || time < 0.0 {
            return Err(McError::InvalidArgument);
        }

        // Expired or deterministic contracts price analytically.
        if time == 0.0 {
            return Ok(option_type.payoff(spot, strike));
        }

        let model = Gbm::new(spot, rate, vol, time);
        if vol == 0.0 {
            let forward = spot * (rate * time).exp();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::analytic::black_scholes::black_scholes_call;

    #[test]
    fn atm_call_tracks_black_scholes() {
        let mut ctx = McContext::new().with_seed(42);
        let mc = ctx.european_call(100.0, 100.0, 0.05, 0.2, 1.0);
        let bs = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
        assert!((mc - bs).abs() <= 1.0, "mc={mc} bs={bs}");
        assert_eq!(ctx.last_error(), None);
    }

    #[test]
    fn expired_option_pays_intrinsic() {
        let mut ctx = McContext::new();
        assert_eq!(ctx.european_call(110.0, 100.0, 0.05, 0.2, 0.0), 10.0);
        assert_eq!(ctx.european_put(110.0, 100.0, 0.05, 0.2, 0.0), 0.0);
    }

    #[test]
    fn zero_vol_discounts_the_forward_intrinsic() {
        let mut ctx = McContext::new();
        let price = ctx.european_call(100.0, 100.0, 0.05, 0.0, 1.0);
        let expected = (-0.05_f64).exp() * (100.0 * 0.05_f64.exp() - 100.0);
        assert!((price - expected).abs() < 1e-12);
    }

    #[test]
    fn invalid_inputs_set_invalid_argument_and_price_zero() {
        let mut ctx = McContext::new();
        for price in [
            ctx.european_call(-1.0, 100.0, 0.05, 0.2, 1.0),
            ctx.european_call(100.0, 0.0, 0.05, 0.2, 1.0),
            ctx.european_call(100.0, 100.0, 0.05, -0.2, 1.0),
            ctx.european_call(100.0, 100.0, 0.05, 0.2, -1.0),
        ] {
            assert_eq!(price, 0.0);
            assert_eq!(ctx.last_error(), Some(McError::InvalidArgument));
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let mut ctx = McContext::new().with_seed(7).with_paths(20_000);
        let a = ctx.european_call(100.0, 100.0, 0.05, 0.2, 1.0);
        let b = ctx.european_call(100.0, 100.0, 0.05, 0.2, 1.0);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
