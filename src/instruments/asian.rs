//! Asian options: payoff on the average of discrete observations.
//!
//! The path has one step per observation; averages exclude index 0, the
//! initial spot. Fixed-strike contracts settle the average against K,
//! floating-strike contracts settle the terminal spot against the average.

use crate::core::error::{McError, PriceResult};
use crate::core::{Averaging, McContext, OptionType, StrikeKind};
use crate::engines::monte_carlo::run_gbm_path_mc;
use crate::models::GbmPath;

fn average(path: &[f64], averaging: Averaging) -> f64 {
    let num_obs = path.len() - 1;
    match averaging {
        Averaging::Arithmetic => path[1..].iter().sum::<f64>() / num_obs as f64,
        Averaging::Geometric => {
            let log_sum: f64 = path[1..].iter().map(|s| s.ln()).sum();
            (log_sum / num_obs as f64).exp()
        }
    }
}

impl McContext {
    /// Arithmetic-average fixed-strike Asian call.
    pub fn asian_call(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_obs: usize,
    ) -> f64 {
        self.asian_price(
            OptionType::Call,
            Averaging::Arithmetic,
            StrikeKind::Fixed,
            spot,
            strike,
            rate,
            vol,
            time,
            num_obs,
        )
    }

    /// Arithmetic-average fixed-strike Asian put.
    pub fn asian_put(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_obs: usize,
    ) -> f64 {
        self.asian_price(
            OptionType::Put,
            Averaging::Arithmetic,
            StrikeKind::Fixed,
            spot,
            strike,
            rate,
            vol,
            time,
            num_obs,
        )
    }

    /// Geometric-average fixed-strike Asian call.
    pub fn asian_geometric_call(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_obs: usize,
    ) -> f64 {
        self.asian_price(
            OptionType::Call,
            Averaging::Geometric,
            StrikeKind::Fixed,
            spot,
            strike,
            rate,
            vol,
            time,
            num_obs,
        )
    }

    /// Geometric-average fixed-strike Asian put.
    pub fn asian_geometric_put(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_obs: usize,
    ) -> f64 {
        self.asian_price(
            OptionType::Put,
            Averaging::Geometric,
            StrikeKind::Fixed,
            spot,
            strike,
            rate,
            vol,
            time,
            num_obs,
        )
    }

    /// Fully discriminated Asian price.
    #[allow(clippy::too_many_arguments)]
    pub fn asian_price(
        &mut self,
        option_type: OptionType,
        averaging: Averaging,
        strike_kind: StrikeKind,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_obs: usize,
    ) -> f64 {
        let result = self.price_asian(
            option_type,
            averaging,
            strike_kind,
            spot,
            strike,
            rate,
            vol,
            time,
            num_obs,
        );
        self.fold(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn price_asian(
        &self,
        option_type: OptionType,
        averaging: Averaging,
        strike_kind: StrikeKind,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_obs: usize,
    ) -> PriceResult {
        if spot <= 0.0 || strike <= 0.0 || vol < 0.0 || time < 0.0 || num_obs == 0 {
            return Err(McError::InvalidArgument);
        }

        if time == 0.0 {
            return Ok(option_type.payoff(spot, strike));
        }

        let model = GbmPath::new(spot, rate, vol, time, num_obs);
        let sums = run_gbm_path_mc(
            &self.rng,
            self.num_paths,
            self.num_threads,
            self.antithetic,
            &model,
            |path| {
                let avg = average(path, averaging);
                match strike_kind {
                    StrikeKind::Fixed => option_type.payoff(avg, strike),
                    StrikeKind::Floating => option_type.payoff(path[path.len() - 1], avg),
                }
            },
        )?;

        Ok(model.discount * sums.mean())
    }
}
