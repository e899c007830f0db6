//! Stochastic model kernels: per-model state-and-step primitives with
//! precomputed parameter blocks so the hot inner loops perform only adds,
//! multiplies, and one exponential per step.

pub mod black76;
pub mod gbm;
pub mod heston;
pub mod merton;
pub mod sabr;

pub use black76::Black76;
pub use gbm::{Gbm, GbmPath};
pub use heston::{HestonPath, HestonScheme, feller_condition_holds, heston_char_fn};
pub use merton::{MertonPath, sample_poisson};
pub use sabr::{SabrParams, SabrPath};
