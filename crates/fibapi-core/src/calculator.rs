//! Calculator trait and error type.
//!
//! `Calculator` is the seam the dispatcher selects through: the native
//! algorithm library and the accelerator both implement it.

use std::fmt;

use num_bigint::BigUint;

use crate::algorithm::{Algorithm, Implementation};
use crate::options::Options;

/// Error type for Fibonacci calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FibError {
    /// The request was rejected before any computation ran.
    #[error("{0}")]
    InvalidInput(String),

    /// A recursive algorithm hit its call-depth bound.
    #[error("Recursion limit exceeded for n={n}. Use iterative algorithm or smaller n.")]
    RecursionDepthExceeded {
        /// Index the computation was started for.
        n: u64,
    },

    /// The accelerator was requested but is not loaded.
    #[error("accelerated implementation not available")]
    AcceleratorUnavailable,

    /// A calculation error occurred.
    #[error("calculation error: {0}")]
    Calculation(String),

    /// Results from different algorithms don't match.
    #[error("result mismatch between algorithms")]
    Mismatch,
}

impl FibError {
    /// Whether the error is the caller's fault (bad input or an exhausted bound).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FibError::InvalidInput(_)
                | FibError::RecursionDepthExceeded { .. }
                | FibError::AcceleratorUnavailable
        )
    }
}

/// A set of Fibonacci algorithms behind one implementation.
pub trait Calculator: Send + Sync {
    /// Calculate F(n) with the given algorithm.
    fn calculate(&self, algorithm: Algorithm, n: u64, opts: &Options)
        -> Result<BigUint, FibError>;

    /// Which implementation this calculator reports as.
    fn implementation(&self) -> Implementation;
}

impl fmt::Debug for dyn Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Calculator({})", self.implementation())
    }
}
