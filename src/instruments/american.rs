//! American options: the uniform special case of the LSM engine with one
//! exercise instant per simulation step.

use crate::core::error::{McError, PriceResult};
use crate::core::{McContext, OptionType};
use crate::engines::lsm::american_lsm;

/// Exercise grid used when the caller passes zero steps (weekly).
const DEFAULT_AMERICAN_STEPS: usize = 52;

impl McContext {
    /// American call via least-squares Monte Carlo.
    ///
    /// Without dividends early exercise is never optimal for calls, so
    /// this lands within regression noise of the European price; the
    /// method earns its keep on puts.
    pub fn american_call(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_steps: usize,
    ) -> f64 {
        let result = self.price_american(OptionType::Call, spot, strike, rate, vol, time, num_steps);
        self.fold(result)
    }

    /// American put via least-squares Monte Carlo.
    pub fn american_put(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_steps: usize,
    ) -> f64 {
        let result = self.price_american(OptionType::Put, spot, strike, rate, vol, time, num_steps);
        self.fold(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn price_american(
        &self,
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_steps: usize,
    ) -> PriceResult {
        if spot <= 0.0 || strike <= 0.0 || vol < 0.0 || time < 0.0 {
            return Err(McError::InvalidArgument);
        }

        if time == 0.0 {
            return Ok(option_type.payoff(spot, strike));
        }

        let num_steps = if num_steps == 0 {
            DEFAULT_AMERICAN_STEPS
        } else {
            num_steps
        };

        american_lsm(self, option_type, spot, strike, rate, vol, time, num_steps)
    }
}
