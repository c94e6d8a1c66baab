//! # fibapi-core
//!
//! Fibonacci algorithm library for FibAPI: iterative, naive recursive, and
//! memoized recursive computation over arbitrary-precision integers, plus
//! the optional GMP accelerator behind the same `Calculator` trait.

pub mod accelerator;
pub mod algorithm;
pub mod calculator;
pub mod constants;
pub mod iterative;
pub mod memo;
pub mod native;
pub mod options;
pub mod recursive;
pub mod stack;

#[cfg(feature = "gmp")]
pub mod calculator_gmp;

// Re-exports
pub use accelerator::Accelerator;
pub use algorithm::{Algorithm, Implementation, ImplementationPreference};
pub use calculator::{Calculator, FibError};
pub use constants::{
    BENCHMARK_NAIVE_LIMIT, DEFAULT_MAX_RECURSION_DEPTH, DEFAULT_RECURSION_STACK_BYTES, FIB_TABLE,
    MAX_N, NAIVE_RECURSION_LIMIT,
};
pub use memo::MemoCache;
pub use native::NativeCalculator;
pub use options::Options;

use num_bigint::BigUint;

/// Compute F(n) with the iterative algorithm.
///
/// This is a convenience function for simple use cases. For algorithm
/// selection and recursion bounds, use the `Calculator` trait directly.
///
/// # Example
/// ```
/// assert_eq!(fibapi_core::fibonacci(10).to_string(), "55");
/// assert_eq!(fibapi_core::fibonacci(0).to_string(), "0");
/// ```
#[must_use]
pub fn fibonacci(n: u64) -> BigUint {
    iterative::fib_iterative(n)
}
