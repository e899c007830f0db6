//! Instrument pricing surface: one module per contract family, each
//! extending [`crate::core::McContext`] with its pricing calls. Every
//! routine validates numeric preconditions, records failures in the
//! context's last-error slot, and returns 0.0 on error.

pub mod american;
pub mod asian;
pub mod barrier;
pub mod bermudan;
pub mod digital;
pub mod european;
pub mod lookback;
