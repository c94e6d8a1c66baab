//! Naive recursive Fibonacci with a call-depth guard.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::calculator::FibError;

/// Compute F(n) as F(n-1) + F(n-2), exponential time.
///
/// Fails with [`FibError::RecursionDepthExceeded`] once the call depth
/// exceeds `max_depth`. The caller is responsible for running this on a
/// stack large enough for `max_depth` frames.
pub fn fib_recursive(n: u64, max_depth: usize) -> Result<BigUint, FibError> {
    step(n, 1, max_depth).map_err(|DepthExceeded| FibError::RecursionDepthExceeded { n })
}

/// Marker for an exhausted depth budget; converted once at the top level.
pub(crate) struct DepthExceeded;

fn step(n: u64, depth: usize, max_depth: usize) -> Result<BigUint, DepthExceeded> {
    if depth > max_depth {
        return Err(DepthExceeded);
    }
    match n {
        0 => Ok(BigUint::zero()),
        1 => Ok(BigUint::one()),
        _ => {
            let a = step(n - 1, depth + 1, max_depth)?;
            let b = step(n - 2, depth + 1, max_depth)?;
            Ok(a + b)
        }
    }
}
