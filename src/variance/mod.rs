//! Variance-reduction engines: antithetic pairing and the control-variate
//! estimator with online optimal-coefficient regression.

pub(crate) mod antithetic;
pub mod control_variate;

pub use control_variate::CvAccumulator;
