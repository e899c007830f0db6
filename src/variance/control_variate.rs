//! Control-variate estimator: Y = X - c·(Z - E[Z]) with the optimal
//! coefficient c = Cov(X, Z)/Var(Z) estimated online from the same
//! samples. Variance shrinks by the squared correlation between payoff and
//! control.
//!
//! Two built-in pairings: the terminal spot for European options
//! (E[Z] = S₀·e^{rT}) and the geometric-Asian payoff for arithmetic Asians
//! (E[Z] from the lognormal closed form).

use crate::core::error::{McError, PriceResult};
use crate::core::{McContext, OptionType};
use crate::engines::analytic::asian::asian_geometric_closed;
use crate::models::{Gbm, GbmPath};

/// Degenerate-control guard: below this sample variance the adjustment is
/// skipped and the plain mean returned.
const VAR_FLOOR: f64 = 1e-12;

/// Running sums for the control-variate regression.
///
/// E[Z] is supplied at construction and never updated while samples
/// accumulate.
#[derive(Debug, Clone, Copy)]
pub struct CvAccumulator {
    sum_x: f64,
    sum_z: f64,
    sum_xx: f64,
    sum_zz: f64,
    sum_xz: f64,
    expected_z: f64,
    n: u64,
}

impl CvAccumulator {
    /// New accumulator with the known control expectation.
    pub fn new(expected_z: f64) -> Self {
        Self {
            sum_x: 0.0,
            sum_z: 0.0,
            sum_xx: 0.0,
            sum_zz: 0.0,
            sum_xz: 0.0,
            expected_z,
            n: 0,
        }
    }

    /// Adds one (payoff, control) sample pair.
    #[inline]
    pub fn add(&mut self, x: f64, z: f64) {
        self.sum_x += x;
        self.sum_z += z;
        self.sum_xx += x * x;
        self.sum_zz += z * z;
        self.sum_xz += x * z;
        self.n += 1;
    }

    pub fn samples(&self) -> u64 {
        self.n
    }

    /// Adjusted estimate mean(X) - ĉ·(mean(Z) - E[Z]).
    ///
    /// A control with sample variance under 1e-12 leaves mean(X) unchanged.
    pub fn estimate(&self) -> f64 {
        if self.n == 0 {
            return 0.0;
        }

        let n = self.n as f64;
        let mean_x = self.sum_x / n;
        let mean_z = self.sum_z / n;

        let var_z = self.sum_zz / n - mean_z * mean_z;
        if var_z < VAR_FLOOR {
            return mean_x;
        }

        let cov_xz = self.sum_xz / n - mean_x * mean_z;
        let c = cov_xz / var_z;

        mean_x - c * (mean_z - self.expected_z)
    }

    /// Estimated residual variance fraction 1 - ρ²(X, Z).
    ///
    /// Near zero means the control removes almost all variance; near one
    /// means it buys nothing.
    pub fn variance_reduction_factor(&self) -> f64 {
        if self.n < 2 {
            return 1.0;
        }

        let n = self.n as f64;
        let mean_x = self.sum_x / n;
        let mean_z = self.sum_z / n;

        let var_x = self.sum_xx / n - mean_x * mean_x;
        let var_z = self.sum_zz / n - mean_z * mean_z;
        if var_x < VAR_FLOOR || var_z < VAR_FLOOR {
            return 1.0;
        }

        let cov_xz = self.sum_xz / n - mean_x * mean_z;
        1.0 - (cov_xz * cov_xz) / (var_x * var_z)
    }
}

impl McContext {
    /// European call with the terminal spot as control variate.
    pub fn european_call_cv(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
    ) -> f64 {
        let result = self.price_european_cv(OptionType::Call, spot, strike, rate, vol, time);
        self.fold(result)
    }

    /// European put with the terminal spot as control variate.
    pub fn european_put_cv(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
    ) -> f64 {
        let result = self.price_european_cv(OptionType::Put, spot, strike, rate, vol, time);
        self.fold(result)
    }

    fn price_european_cv(
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

        if time == 0.0 {
            return Ok(option_type.payoff(spot, strike));
        }

        let model = Gbm::new(spot, rate, vol, time);
        let expected_spot = spot * (rate * time).exp();

        let mut stats = CvAccumulator::new(expected_spot);
        let mut rng = self.rng.clone();

        for _ in 0..self.num_paths {
            let s_t = model.sample_terminal(&mut rng);
            let x = model.discount * option_type.payoff(s_t, strike);
            stats.add(x, s_t);
        }

        Ok(stats.estimate())
    }

    /// Arithmetic-average Asian call with the geometric Asian as control.
    pub fn asian_call_cv(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_obs: usize,
    ) -> f64 {
        let result = self.price_asian_cv(OptionType::Call, spot, strike, rate, vol, time, num_obs);
        self.fold(result)
    }

    /// Arithmetic-average Asian put with the geometric Asian as control.
    pub fn asian_put_cv(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        vol: f64,
        time: f64,
        num_obs: usize,
    ) -> f64 {
        let result = self.price_asian_cv(OptionType::Put, spot, strike, rate, vol, time, num_obs);
        self.fold(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn price_asian_cv(
        &self,
        option_type: OptionType,
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
        let expected_geometric =
            asian_geometric_closed(option_type, spot, strike, rate, vol, time, num_obs);

        let mut stats = CvAccumulator::new(expected_geometric);
        let mut rng = self.rng.clone();
        let mut path = vec![0.0_f64; num_obs + 1];

        for _ in 0..self.num_paths {
            model.fill_path(&mut rng, &mut path);

            // Averages exclude index 0, the initial spot.
            let mut arith_sum = 0.0;
            let mut log_sum = 0.0;
            for &s in &path[1..] {
                arith_sum += s;
                log_sum += s.ln();
            }
            let arith_avg = arith_sum / num_obs as f64;
            let geom_avg = (log_sum / num_obs as f64).exp();

            let x = model.discount * option_type.payoff(arith_avg, strike);
            let z = model.discount * option_type.payoff(geom_avg, strike);
            stats.add(x, z);
        }

        Ok(stats.estimate())
    }
}
