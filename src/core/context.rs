//! Simulation context: the process-local configuration object every
//! pricing call reads.
//!
//! Each context is fully independent, so isolation gives thread safety
//! across contexts; one context serves one pricing call at a time. The
//! master RNG is never advanced by a pricing call (workers clone and jump
//! it), so repeated identical calls return bit-identical prices.

use crate::core::error::{McError, PriceResult};
use crate::core::types::ModelKind;
use crate::math::McRng;
use crate::models::sabr::SabrParams;

/// Default number of Monte Carlo paths.
pub const DEFAULT_PATHS: usize = 100_000;
/// Default number of time steps for path-dependent pricers.
pub const DEFAULT_STEPS: usize = 252;
/// Default master seed.
pub const DEFAULT_SEED: u64 = 0xDEAD_BEEF;
/// Default worker thread count.
pub const DEFAULT_THREADS: u32 = 1;

/// Monte Carlo simulation context.
#[derive(Debug, Clone)]
pub struct McContext {
    pub(crate) num_paths: usize,
    pub(crate) num_steps: usize,
    pub(crate) seed: u64,
    pub(crate) num_threads: u32,
    pub(crate) antithetic: bool,
    pub(crate) model: ModelKind,
    pub(crate) sabr: SabrParams,
    pub(crate) last_error: Option<McError>,
    pub(crate) rng: McRng,
}

impl Default for McContext {
    fn default() -> Self {
        Self {
            num_paths: DEFAULT_PATHS,
            num_steps: DEFAULT_STEPS,
            seed: DEFAULT_SEED,
            num_threads: DEFAULT_THREADS,
            antithetic: false,
            model: ModelKind::default(),
            sabr: SabrParams::default(),
            last_error: None,
            rng: McRng::seed_from_u64(DEFAULT_SEED),
        }
    }
}

impl McContext {
    /// Context with default parameters (100 000 paths, 252 steps, 1 thread).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path count. Zero is rejected and the prior value kept.
    pub fn set_paths(&mut self, n: usize) {
        if n > 0 {
            self.num_paths = n;
        }
    }

    pub fn paths(&self) -> usize {
        self.num_paths
    }

    /// Sets the step count for path-dependent work. Zero is rejected.
    pub fn set_steps(&mut self, n: usize) {
        if n > 0 {
            self.num_steps = n;
        }
    }

    pub fn steps(&self) -> usize {
        self.num_steps
    }

    /// Sets the master seed and reseeds the master RNG.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = McRng::seed_from_u64(seed);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sets the worker thread count, clamped to at least one.
    pub fn set_threads(&mut self, n: u32) {
        self.num_threads = n.max(1);
    }

    pub fn threads(&self) -> u32 {
        self.num_threads
    }

    /// Enables or disables antithetic pairing.
    pub fn set_antithetic(&mut self, enabled: bool) {
        self.antithetic = enabled;
    }

    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Binds a SABR parameter block to the context and selects the model.
    pub fn set_sabr(&mut self, alpha: f64, beta: f64, rho: f64, nu: f64) {
        self.sabr = SabrParams {
            alpha,
            beta,
            rho,
            nu,
        };
        self.model = ModelKind::Sabr;
    }

    pub fn sabr(&self) -> SabrParams {
        self.sabr
    }

    /// Model identifier currently bound to the context.
    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// Error recorded by the most recent failing pricing call.
    pub fn last_error(&self) -> Option<McError> {
        self.last_error
    }

    /// Builder-style seed setter for test ergonomics.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_seed(seed);
        self
    }

    /// Builder-style path-count setter.
    pub fn with_paths(mut self, n: usize) -> Self {
        self.set_paths(n);
        self
    }

    /// Builder-style thread-count setter.
    pub fn with_threads(mut self, n: u32) -> Self {
        self.set_threads(n);
        self
    }

    /// Builder-style antithetic flag.
    pub fn with_antithetic(mut self, enabled: bool) -> Self {
        self.set_antithetic(enabled);
        self
    }

    /// Folds an internal pricing result into the sentinel surface:
    /// failures land in the last-error slot and price as 0.0.
    pub(crate) fn fold(&mut self, result: PriceResult) -> f64 {
        match result {
            Ok(price) => price,
            Err(err) => {
                self.last_error = Some(err);
                0.0
            }
        }
    }
}
