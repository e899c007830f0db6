//! Geometric Brownian motion kernels.
//!
//! Two shapes, both with every loop constant precomputed at construction:
//! a terminal-only block exploiting the closed-form drift (one normal per
//! path) and a stepped block for path-dependent pricers.

use crate::math::McRng;

/// Terminal-only GBM block: S(T) = S(0)·exp((r - σ²/2)T + σ√T·Z).
#[derive(Debug, Clone, Copy)]
pub struct Gbm {
    pub spot: f64,
    /// (r - σ²/2)·T
    pub drift: f64,
    /// σ·√T
    pub diffusion: f64,
    /// e^(-rT)
    pub discount: f64,
}

impl Gbm {
    pub fn new(spot: f64, rate: f64, vol: f64, time: f64) -> Self {
        Self {
            spot,
            drift: (rate - 0.5 * vol * vol) * time,
            diffusion: vol * time.sqrt(),
            discount: (-rate * time).exp(),
        }
    }

    /// Terminal spot for a given standard normal draw.
    #[inline]
    pub fn terminal(&self, z: f64) -> f64 {
        self.spot * self.diffusion.mul_add(z, self.drift).exp()
    }

    /// Terminal spot from the generator.
    #[inline]
    pub fn sample_terminal(&self, rng: &mut McRng) -> f64 {
        self.terminal(rng.next_normal())
    }
}

/// Stepped GBM block: S(t+Δ) = S(t)·exp((r - σ²/2)Δ + σ√Δ·Z).
#[derive(Debug, Clone, Copy)]
pub struct GbmPath {
    pub spot: f64,
    pub dt: f64,
    /// (r - σ²/2)·Δ
    pub drift_dt: f64,
    /// σ·√Δ
    pub diffusion_dt: f64,
    /// e^(-rT)
    pub discount: f64,
    pub num_steps: usize,
}

impl GbmPath {
    pub fn new(spot: f64, rate: f64, vol: f64, time: f64, num_steps: usize) -> Self {
        let dt = time / num_steps as f64;
        Self {
            spot,
            dt,
            drift_dt: (rate - 0.5 * vol * vol) * dt,
            diffusion_dt: vol * dt.sqrt(),
            discount: (-rate * time).exp(),
            num_steps,
        }
    }

    /// Advances one step from `current` with the draw `z`.
    #[inline]
    pub fn step(&self, current: f64, z: f64) -> f64 {
        current * self.diffusion_dt.mul_add(z, self.drift_dt).exp()
    }

    /// Fills `path` (length num_steps + 1, index 0 = initial spot).
    pub fn fill_path(&self, rng: &mut McRng, path: &mut [f64]) {
        path[0] = self.spot;
        for i in 0..self.num_steps {
            path[i + 1] = self.step(path[i], rng.next_normal());
        }
    }
}
