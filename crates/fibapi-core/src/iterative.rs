//! Iterative Fibonacci.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Compute F(n) with a running pair, from index 2 upward.
///
/// # Example
/// ```
/// assert_eq!(fibapi_core::iterative::fib_iterative(10).to_string(), "55");
/// ```
#[must_use]
pub fn fib_iterative(n: u64) -> BigUint {
    if n == 0 {
        return BigUint::zero();
    }

    let mut a = BigUint::zero();
    let mut b = BigUint::one();
    for _ in 2..=n {
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }
    b
}
