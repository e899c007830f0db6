//! Bermudan options: early exercise restricted to a discrete schedule of
//! instants, priced by the LSM engine over exercise-date snapshots.

use crate::core::error::{McError, PriceResult};
use crate::core::{McContext, OptionType};
use crate::engines::lsm::bermudan_lsm;

impl McContext {
    /// Bermudan call over a uniform schedule of `num_exercise` instants
    /// ending at maturity.
    pub fn bermudan_call(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_exercise: usize,
    ) -> f64 {
        let result =
            self.price_bermudan_uniform(OptionType::Call, spot, strike, rate, vol, time, num_exercise);
        self.fold(result)
    }

    /// Bermudan put over a uniform schedule.
    pub fn bermudan_put(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_exercise: usize,
    ) -> f64 {
        let result =
            self.price_bermudan_uniform(OptionType::Put, spot, strike, rate, vol, time, num_exercise);
        self.fold(result)
    }

    /// Bermudan price over explicit exercise instants given as fractions
    /// of maturity. Instants outside [0, 1] are clamped; the schedule is
    /// expected to end at 1.0.
    #[allow(clippy::too_many_arguments)]
    pub fn bermudan_on_schedule(
        &mut self,
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        exercise_times: &[f64],
    ) -> f64 {
        let result =
            self.price_bermudan(option_type, spot, strike, rate, vol, time, exercise_times);
        self.fold(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn price_bermudan_uniform(
        &self,
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_exercise: usize,
    ) -> PriceResult {
        if num_exercise == 0 {
            return Err(McError::InvalidArgument);
        }

        let schedule: Vec<f64> = (1..=num_exercise)
            .map(|i| i as f64 / num_exercise as f64)
            .collect();

        self.price_bermudan(option_type, spot, strike, rate, vol, time, &schedule)
    }

    #[allow(clippy::too_many_arguments)]
    fn price_bermudan(
        &self,
        option_type: OptionType,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        exercise_times: &[f64],
    ) -> PriceResult {
        if spot <= 0.0 || strike <= 0.0 || vol < 0.0 || time < 0.0 {
            return Err(McError::InvalidArgument);
        }
        if exercise_times.is_empty() {
            return Err(McError::InvalidArgument);
        }

        if time == 0.0 {
            return Ok(option_type.payoff(spot, strike));
        }

        bermudan_lsm(
            self,
            option_type,
            spot,
            strike,
            rate,
            vol,
            time,
            exercise_times,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn more_exercise_rights_never_hurt() {
        let mut ctx = McContext::new().with_seed(42).with_paths(20_000);
        let few = ctx.bermudan_put(100.0, 100.0, 0.05, 0.2, 1.0, 4);
        let many = ctx.bermudan_put(100.0, 100.0, 0.05, 0.2, 1.0, 24);
        assert!(many >= few - 0.2, "few={few} many={many}");
    }

    #[test]
    fn explicit_schedule_matches_the_uniform_wrapper() {
        let mut ctx = McContext::new().with_seed(42).with_paths(10_000);
        let uniform = ctx.bermudan_put(100.0, 100.0, 0.05, 0.2, 1.0, 4);
        let explicit = ctx.bermudan_on_schedule(
            OptionType::Put,
            100.0,
            100.0,
            0.05,
            0.2,
            1.0,
            &[0.25, 0.5, 0.75, 1.0],
        );
        assert_eq!(uniform.to_bits(), explicit.to_bits());
    }

    #[test]
    fn empty_schedule_is_rejected() {
        let mut ctx = McContext::new();
        let price = ctx.bermudan_on_schedule(OptionType::Put, 100.0, 100.0, 0.05, 0.2, 1.0, &[]);
        assert_eq!(price, 0.0);
        assert_eq!(ctx.last_error(), Some(McError::InvalidArgument));
    }

    #[test]
    fn zero_exercise_count_is_rejected() {
        let mut ctx = McContext::new();
        assert_eq!(ctx.bermudan_put(100.0, 100.0, 0.05, 0.2, 1.0, 0), 0.0);
        assert_eq!(ctx.last_error(), Some(McError::InvalidArgument));
    }
}
