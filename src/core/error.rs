//! Engine error taxonomy.
//!
//! Pricing routines compute through `Result<f64, McError>` internally; the
//! public context surface folds a failure into the context's last-error
//! slot and returns a neutral 0.0. Success is the absence of an error.

/// Failure kinds surfaced by pricing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McError {
    /// A numeric precondition was rejected.
    InvalidArgument,
    /// An allocation for a simulation table failed.
    OutOfMemory,
    /// A worker thread failed to start or finish.
    Threading,
}

impl McError {
    /// Fixed English translation for the error code.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidArgument => "Invalid argument",
            Self::OutOfMemory => "Out of memory",
            Self::Threading => "Threading error",
        }
    }
}

impl std::fmt::Display for McError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for McError {}

/// Translation for an optional last-error slot, with the success string.
pub fn error_message(err: Option<McError>) -> &'static str {
    match err {
        None => "Success",
        Some(e) => e.message(),
    }
}

pub(crate) type PriceResult = Result<f64, McError>;
