//! Digital (binary) options: terminal indicator payoffs.

use crate::core::error::{McError, PriceResult};
use crate::core::{DigitalPayout, McContext, OptionType};
use crate::engines::monte_carlo::{run_parallel, terminal_sums};
use crate::models::Gbm;

fn digital_payoff(
    option_type: OptionType,
    payout: DigitalPayout,
    terminal: f64,
    strike: f64,
    cash_amount: f64,
) -> f64 {
    let in_the_money = match option_type {
        OptionType::Call => terminal > strike,
        OptionType::Put => terminal < strike,
    };

    if !in_the_money {
        return 0.0;
    }

    match payout {
        DigitalPayout::Cash => cash_amount,
        DigitalPayout::Asset => terminal,
    }
}

impl McContext {
    /// Digital call: cash-or-nothing pays `payout`, asset-or-nothing pays
    /// the terminal spot.
    #[allow(clippy::too_many_arguments)]
    pub fn digital_call(
        &mut self,
        spot: f64,
        strike: f64,
        payout: f64,
        rate: f64,
        vol: f64,
        time: f64,
        kind: DigitalPayout,
    ) -> f64 {
        let result = self.price_digital(OptionType::Call, kind, spot, strike, payout, rate, vol, time);
        self.fold(result)
    }

    /// Digital put.
    #[allow(clippy::too_many_arguments)]
    pub fn digital_put(
        &mut self,
        spot: f64,
        strike: f64,
        payout: f64,
        rate: f64,
        vol: f64,
        time: f64,
        kind: DigitalPayout,
    ) -> f64 {
        let result = self.price_digital(OptionType::Put, kind, spot, strike, payout, rate, vol, time);
        self.fold(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn price_digital(
        &self,
        option_type: OptionType,
        kind: DigitalPayout,
        spot: f64,
        strike: f64,
        payout: f64,
        rate: f64,
        vol: f64,
        time: f64,
    ) -> PriceResult {
        if spot <= 0.0 || strike <= 0.0 || payout < 0.0 || vol < 0.0 || time < 0.0 {
            return Err(McError::InvalidArgument);
        }

        if time == 0.0 {
            return Ok(digital_payoff(option_type, kind, spot, strike, payout));
        }

        let model = Gbm::new(spot, rate, vol, time);
        if vol == 0.0 {
            let forward = spot * (rate * time).exp();
            return Ok(model.discount * digital_payoff(option_type, kind, forward, strike, payout));
        }

        let antithetic = self.antithetic;
        let sums = run_parallel(&self.rng, self.num_paths, self.num_threads, &|rng, count| {
            terminal_sums(rng, count, antithetic, |z| {
                digital_payoff(option_type, kind, model.terminal(z), strike, payout)
            })
        })?;

        Ok(model.discount * sums.mean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::analytic::digital::digital_cash_call;

    #[test]
    fn cash_call_tracks_the_closed_form() {
        let mut ctx = McContext::new().with_seed(42);
        let mc = ctx.digital_call(100.0, 100.0, 1.0, 0.05, 0.2, 1.0, DigitalPayout::Cash);
        let closed = digital_cash_call(100.0, 100.0, 1.0, 0.05, 0.2, 1.0);
        assert!((mc - closed).abs() <= 0.1, "mc={mc} closed={closed}");
    }

    #[test]
    fn cash_parity_is_exact_on_shared_paths() {
        // Call and put runs replay the same stream, so the indicators
        // partition every path and parity holds to float precision.
        let mut ctx = McContext::new().with_seed(42).with_paths(50_000);
        let call = ctx.digital_call(100.0, 100.0, 1.0, 0.05, 0.2, 1.0, DigitalPayout::Cash);
        let put = ctx.digital_put(100.0, 100.0, 1.0, 0.05, 0.2, 1.0, DigitalPayout::Cash);
        let bond = (-0.05_f64).exp();
        assert!((call + put - bond).abs() < 1e-9, "call={call} put={put}");
    }

    #[test]
    fn asset_digital_pays_the_terminal_spot() {
        let mut ctx = McContext::new().with_seed(42).with_paths(50_000);
        let asset_call = ctx.digital_call(100.0, 100.0, 0.0, 0.05, 0.2, 1.0, DigitalPayout::Asset);
        let asset_put = ctx.digital_put(100.0, 100.0, 0.0, 0.05, 0.2, 1.0, DigitalPayout::Asset);
        // Together they reconstruct the discounted forward.
        assert!((asset_call + asset_put - 100.0).abs() < 1.0);
    }

    #[test]
    fn expired_digital_evaluates_the_indicator() {
        let mut ctx = McContext::new();
        assert_eq!(
            ctx.digital_call(110.0, 100.0, 3.0, 0.05, 0.2, 0.0, DigitalPayout::Cash),
            3.0
        );
        assert_eq!(
            ctx.digital_put(110.0, 100.0, 3.0, 0.05, 0.2, 0.0, DigitalPayout::Cash),
            0.0
        );
    }

    #[test]
    fn negative_payout_is_rejected() {
        let mut ctx = McContext::new();
        let price = ctx.digital_call(100.0, 100.0, -1.0, 0.05, 0.2, 1.0, DigitalPayout::Cash);
        assert_eq!(price, 0.0);
        assert_eq!(ctx.last_error(), Some(McError::InvalidArgument));
    }
}
