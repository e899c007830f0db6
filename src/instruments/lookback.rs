//! Lookback options on the path minimum and maximum.
//!
//! Floating-strike contracts buy at the realized minimum (call) or sell at
//! the realized maximum (put), so their payoffs are non-negative by
//! construction. Fixed-strike contracts compare the extreme against K.

use crate::core::error::{McError, PriceResult};
use crate::core::{LookbackStrike, McContext, OptionType};
use crate::engines::monte_carlo::run_gbm_path_mc;
use crate::models::GbmPath;

fn path_extremes(path: &[f64]) -> (f64, f64) {
    let mut min = path[0];
    let mut max = path[0];
    for &s in &path[1..] {
        if s < min {
            min = s;
        }
        if s > max {
            max = s;
        }
    }
    (min, max)
}

impl McContext {
    /// Lookback call over `num_steps` monitoring points.
    #[allow(clippy::too_many_arguments)]
    pub fn lookback_call(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_steps: usize,
        strike_kind: LookbackStrike,
    ) -> f64 {
        let result = self.price_lookback(
            OptionType::Call,
            strike_kind,
            spot,
            strike,
            rate,
            vol,
            time,
            num_steps,
        );
        self.fold(result)
    }

    /// Lookback put over `num_steps` monitoring points.
    #[allow(clippy::too_many_arguments)]
    pub fn lookback_put(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_steps: usize,
        strike_kind: LookbackStrike,
    ) -> f64 {
        let result = self.price_lookback(
            OptionType::Put,
            strike_kind,
            spot,
            strike,
            rate,
            vol,
            time,
            num_steps,
        );
        self.fold(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn price_lookback(
        &self,
        option_type: OptionType,
        strike_kind: LookbackStrike,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_steps: usize,
    ) -> PriceResult {
        if spot <= 0.0 || strike <= 0.0 || vol < 0.0 || time < 0.0 || num_steps == 0 {
            return Err(McError::InvalidArgument);
        }

        let model = GbmPath::new(spot, rate, vol, time, num_steps);
        let sums = run_gbm_path_mc(
            &self.rng,
            self.num_paths,
            self.num_threads,
            self.antithetic,
            &model,
            |path| {
                let (min, max) = path_extremes(path);
                let terminal = path[path.len() - 1];
                match (strike_kind, option_type) {
                    (LookbackStrike::Floating, OptionType::Call) => terminal - min,
                    (LookbackStrike::Floating, OptionType::Put) => max - terminal,
                    (LookbackStrike::Fixed, OptionType::Call) => (max - strike).max(0.0),
                    (LookbackStrike::Fixed, OptionType::Put) => (strike - min).max(0.0),
                }
            },
        )?;

        Ok(model.discount * sums.mean())
    }
}
