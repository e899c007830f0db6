//! Numerical building blocks: normal distribution helpers, the random
//! substrate, and the Sobol quasi-random sequence.

pub mod normal;
pub mod rng;
pub mod sobol;

pub use normal::{inverse_normal_cdf, normal_cdf, normal_pdf};
pub use rng::McRng;
pub use sobol::{SOBOL_MAX_DIMENSIONS, SobolSequence};
