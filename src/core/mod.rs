//! Core domain types: contract discriminators, the error taxonomy, and the
//! simulation context.

pub mod context;
pub mod error;
pub mod types;

pub use context::{DEFAULT_PATHS, DEFAULT_SEED, DEFAULT_STEPS, DEFAULT_THREADS, McContext};
pub use error::{McError, error_message};
pub use types::{
    Averaging, BarrierKind, DigitalPayout, LookbackStrike, ModelKind, OptionType, StrikeKind,
};
