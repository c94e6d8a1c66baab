//! GMP-backed accelerator using the `rug` crate.
//!
//! Only available when the `gmp` feature is enabled. Implements the same
//! three algorithms with GMP integers and converts results to `BigUint`.

use std::collections::HashMap;

use num_bigint::BigUint;
use parking_lot::Mutex;
use rug::integer::Order;
use rug::Integer;

use crate::algorithm::{Algorithm, Implementation};
use crate::calculator::{Calculator, FibError};
use crate::options::Options;
use crate::stack::with_recursion_stack;

/// Accelerated calculator backed by GMP.
#[derive(Debug, Default)]
pub struct GmpCalculator {
    memo: Mutex<HashMap<u64, Integer>>,
}

impl GmpCalculator {
    /// Create a calculator with an empty memo cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn iterative(n: u64) -> Integer {
        if n == 0 {
            return Integer::new();
        }
        let mut a = Integer::new();
        let mut b = Integer::from(1);
        for _ in 2..=n {
            a += &b;
            std::mem::swap(&mut a, &mut b);
        }
        b
    }

    fn recursive(n: u64, depth: usize, max_depth: usize) -> Option<Integer> {
        if depth > max_depth {
            return None;
        }
        match n {
            0 => Some(Integer::new()),
            1 => Some(Integer::from(1)),
            _ => {
                let mut a = Self::recursive(n - 1, depth + 1, max_depth)?;
                a += Self::recursive(n - 2, depth + 1, max_depth)?;
                Some(a)
            }
        }
    }

    fn recursive_memo(
        n: u64,
        memo: &mut HashMap<u64, Integer>,
        depth: usize,
        max_depth: usize,
    ) -> Option<Integer> {
        if depth > max_depth {
            return None;
        }
        if let Some(value) = memo.get(&n) {
            return Some(value.clone());
        }
        let value = match n {
            0 => Integer::new(),
            1 => Integer::from(1),
            _ => {
                let mut a = Self::recursive_memo(n - 1, memo, depth + 1, max_depth)?;
                a += Self::recursive_memo(n - 2, memo, depth + 1, max_depth)?;
                a
            }
        };
        memo.insert(n, value.clone());
        Some(value)
    }
}

fn to_biguint(value: &Integer) -> BigUint {
    BigUint::from_bytes_le(&value.to_digits::<u8>(Order::Lsf))
}

impl Calculator for GmpCalculator {
    fn calculate(
        &self,
        algorithm: Algorithm,
        n: u64,
        opts: &Options,
    ) -> Result<BigUint, FibError> {
        let max_depth = opts.max_recursion_depth;
        let value = match algorithm {
            Algorithm::Iterative => Self::iterative(n),
            Algorithm::Recursive => with_recursion_stack(opts.recursion_stack_bytes, || {
                Self::recursive(n, 1, max_depth).ok_or(FibError::RecursionDepthExceeded { n })
            })?,
            Algorithm::RecursiveMemo => with_recursion_stack(opts.recursion_stack_bytes, || {
                let mut memo = self.memo.lock();
                memo.clear();
                Self::recursive_memo(n, &mut memo, 1, max_depth)
                    .ok_or(FibError::RecursionDepthExceeded { n })
            })?,
        };
        Ok(to_biguint(&value))
    }

    fn implementation(&self) -> Implementation {
        Implementation::Accelerated
    }
}
