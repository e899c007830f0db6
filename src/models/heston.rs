//! Heston stochastic-volatility model.
//!
//! Variance follows a mean-reverting CIR process correlated with the spot:
//!   dS = r·S·dt + √v·S·dW₁,  dv = κ(θ - v)dt + σ·√v·dW₂,  dW₁dW₂ = ρdt.
//!
//! Two step schemes: a full-truncation Euler step (default) and the
//! Andersen (2008) quadratic-exponential step, which better preserves the
//! variance distribution near the origin.

use num_complex::Complex64;

use crate::core::error::{McError, PriceResult};
use crate::core::{McContext, OptionType};
use crate::engines::monte_carlo::{PartialSums, run_parallel};
use crate::math::McRng;

/// Pricers refine to at least this many steps: stochastic variance needs a
/// finer grid than the context default demands for plain path work.
const MIN_HESTON_STEPS: usize = 100;

/// Discretization scheme for the variance process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HestonScheme {
    /// Full-truncation Euler.
    #[default]
    FullTruncationEuler,
    /// Andersen quadratic-exponential.
    QuadraticExponential,
}

/// Heston path block with loop constants precomputed.
#[derive(Debug, Clone, Copy)]
pub struct HestonPath {
    pub spot: f64,
    pub v0: f64,
    pub kappa: f64,
    pub theta: f64,
    /// Vol of vol.
    pub sigma: f64,
    pub rho: f64,
    pub rate: f64,
    pub dt: f64,
    pub sqrt_dt: f64,
    /// √(1 - ρ²) for the Cholesky split.
    pub sqrt_one_minus_rho2: f64,
    /// e^(-rT)
    pub discount: f64,
    pub num_steps: usize,
}

impl HestonPath {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: f64,
        v0: f64,
        kappa: f64,
        theta: f64,
        sigma: f64,
        rho: f64,
        rate: f64,
        time: f64,
        num_steps: usize,
    ) -> Self {
        let dt = time / num_steps as f64;
        Self {
            spot,
            v0,
            kappa,
            theta,
            sigma,
            rho,
            rate,
            dt,
            sqrt_dt: dt.sqrt(),
            sqrt_one_minus_rho2: (1.0 - rho * rho).sqrt(),
            discount: (-rate * time).exp(),
            num_steps,
        }
    }

    /// One full-truncation Euler step.
    ///
    /// The variance drift acts on the untruncated value while both
    /// diffusions see √v⁺; the updated variance is stored as-is and only
    /// re-truncated when read.
    #[inline]
    pub fn step_euler(&self, s: f64, v: f64, z1: f64, z2: f64) -> (f64, f64) {
        let v_plus = v.max(0.0);
        let sqrt_v = v_plus.sqrt();

        let zv = z1;
        let zs = self.rho * z1 + self.sqrt_one_minus_rho2 * z2;

        let v_next =
            v + self.kappa * (self.theta - v) * self.dt + self.sigma * sqrt_v * self.sqrt_dt * zv;
        let s_next =
            s * ((self.rate - 0.5 * v_plus) * self.dt + sqrt_v * self.sqrt_dt * zs).exp();

        (s_next, v_next)
    }

    /// One Andersen quadratic-exponential step.
    ///
    /// Samples v(t+Δ) from its conditional moments: a shifted squared
    /// normal when ψ = s²/m² ≤ 1.5, otherwise a mixture with an atom at
    /// zero and an exponential tail. The spot integrates a trapezoidal
    /// approximation of the variance with a ρ/σ correction term.
    pub fn step_qe(&self, s: f64, v: f64, rng: &mut McRng) -> (f64, f64) {
        let v = v.max(0.0);
        let dt = self.dt;

        let exp_kdt = (-self.kappa * dt).exp();
        let m = self.theta + (v - self.theta) * exp_kdt;
        let s2 = v * self.sigma * self.sigma * exp_kdt * (1.0 - exp_kdt) / self.kappa
            + self.theta * self.sigma * self.sigma * (1.0 - exp_kdt) * (1.0 - exp_kdt)
                / (2.0 * self.kappa);

        let psi = s2 / (m * m);

        let v_next = if psi <= 1.5 {
            let b2 = 2.0 / psi - 1.0 + (2.0 / psi).sqrt() * (2.0 / psi - 1.0).sqrt();
            let a = m / (1.0 + b2);
            let b = b2.sqrt();
            let z = rng.next_normal();
            a * (b + z) * (b + z)
        } else {
            let p = (psi - 1.0) / (psi + 1.0);
            let beta = (1.0 - p) / m;
            let u = rng.next_uniform();
            if u <= p {
                0.0
            } else {
                ((1.0 - p) / (1.0 - u)).ln() / beta
            }
        };

        // Central-weight Andersen spot integration: trapezoidal variance,
        // the rho/sigma correction carrying the correlated part of W1,
        // and the residual (1 - rho^2) diffusion.
        let v_avg = 0.5 * (v + v_next);
        let z1 = rng.next_normal();

        let drift = (self.rate - 0.5 * v_avg) * dt;
        let correction =
            self.rho / self.sigma * (v_next - v - self.kappa * (self.theta - v_avg) * dt);
        let diffusion =
            ((1.0 - self.rho * self.rho) * v_avg).max(0.0).sqrt() * self.sqrt_dt * z1;

        (s * (drift + correction + diffusion).exp(), v_next)
    }

    /// Simulates a terminal spot with the requested scheme.
    pub fn sample_terminal(&self, rng: &mut McRng, scheme: HestonScheme) -> f64 {
        let mut s = self.spot;
        let mut v = self.v0;

        match scheme {
            HestonScheme::FullTruncationEuler => {
                for _ in 0..self.num_steps {
                    let z1 = rng.next_normal();
                    let z2 = rng.next_normal();
                    let (s_next, v_next) = self.step_euler(s, v, z1, z2);
                    s = s_next;
                    v = v_next;
                }
            }
            HestonScheme::QuadraticExponential => {
                for _ in 0..self.num_steps {
                    let (s_next, v_next) = self.step_qe(s, v, rng);
                    s = s_next;
                    v = v_next;
                }
            }
        }

        s
    }
}

/// Feller predicate 2κθ > σ².
///
/// When satisfied the CIR variance stays strictly positive almost surely;
/// violating it is not an error but biases the Euler scheme.
#[inline]
pub fn feller_condition_holds(kappa: f64, theta: f64, sigma: f64) -> bool {
    2.0 * kappa * theta > sigma * sigma
}

/// Heston characteristic function φ(u) = E[exp(iu·log S(T))], Gatheral
/// formulation. Exposed for Fourier-method consumers.
#[allow(clippy::too_many_arguments)]
pub fn heston_char_fn(
    u: f64,
    spot: f64,
    v0: f64,
    kappa: f64,
    theta: f64,
    sigma: f64,
    rho: f64,
    rate: f64,
    time: f64,
) -> Complex64 {
    let i = Complex64::new(0.0, 1.0);
    let iu = i * u;

    let a = rho * sigma * iu - kappa;
    let b = sigma * sigma * (iu + u * u);
    let d = (a * a + b).sqrt();

    let g_num = kappa - rho * sigma * iu - d;
    let g_den = kappa - rho * sigma * iu + d;
    let g = g_num / g_den;

    let exp_dt = (-d * time).exp();

    let c_term1 = iu * (rate * time);
    let c_inner = (1.0 - g * exp_dt) / (1.0 - g);
    let c_term2 = (kappa * theta / (sigma * sigma)) * (g_num * time - 2.0 * c_inner.ln());
    let c = c_term1 + c_term2;

    let big_d = (g_num / (sigma * sigma)) * ((1.0 - exp_dt) / (1.0 - g * exp_dt));

    (c + big_d * v0 + iu * spot.ln()).exp()
}

impl McContext {
    /// Monte Carlo price of a European call under Heston dynamics with the
    /// default full-truncation Euler scheme.
    #[allow(clippy::too_many_arguments)]
    pub fn heston_call(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        time: f64,
        v0: f64,
        kappa: f64,
        theta: f64,
        sigma: f64,
        rho: f64,
    ) -> f64 {
        self.heston_price(
            OptionType::Call,
            HestonScheme::FullTruncationEuler,
            spot,
            strike,
            rate,
            time,
            v0,
            kappa,
            theta,
            sigma,
            rho,
        )
    }

    /// Monte Carlo price of a European put under Heston dynamics.
    #[allow(clippy::too_many_arguments)]
    pub fn heston_put(
        &mut self,
        spot: f64,
        strike: f64,
        rate: f64,
        time: f64,
        v0: f64,
        kappa: f64,
        theta: f64,
        sigma: f64,
        rho: f64,
    ) -> f64 {
        self.heston_price(
            OptionType::Put,
            HestonScheme::FullTruncationEuler,
            spot,
            strike,
            rate,
            time,
            v0,
            kappa,
            theta,
            sigma,
            rho,
        )
    }

    /// Heston European price with an explicit option side and scheme.
    #[allow(clippy::too_many_arguments)]
    pub fn heston_price(
        &mut self,
        option_type: OptionType,
        scheme: HestonScheme,
        spot: f64,
        strike: f64,
        rate: f64,
        time: f64,
        v0: f64,
        kappa: f64,
        theta: f64,
        sigma: f64,
        rho: f64,
    ) -> f64 {
        let result = self.price_heston(
            option_type,
            scheme,
            spot,
            strike,
            rate,
            time,
            v0,
            kappa,
            theta,
            sigma,
            rho,
        );
        self.fold(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn price_heston(
        &self,
        option_type: OptionType,
        scheme: HestonScheme,
        spot: f64,
        strike: f64,
        rate: f64,
        time: f64,
        v0: f64,
        kappa: f64,
        theta: f64,
        sigma: f64,
        rho: f64,
    ) -> PriceResult {
        if spot <= 0.0 || strike <= 0.0 || time < 0.0 || v0 < 0.0 || kappa < 0.0 || sigma < 0.0 {
            return Err(McError::InvalidArgument);
        }
        if !(-1.0..=1.0).contains(&rho) {
            return Err(McError::InvalidArgument);
        }

        if time == 0.0 {
            return Ok(option_type.payoff(spot, strike));
        }

        let num_steps = self.num_steps.max(MIN_HESTON_STEPS);
        let model = HestonPath::new(spot, v0, kappa, theta, sigma, rho, rate, time, num_steps);

        let sums = run_parallel(&self.rng, self.num_paths, self.num_threads, &|rng, count| {
            let mut sums = PartialSums::default();
            for _ in 0..count {
                let s_t = model.sample_terminal(rng, scheme);
                sums.push(option_type.payoff(s_t, strike));
            }
            sums
        })?;

        Ok(model.discount * sums.mean())
    }
}
