//! The pure-Rust algorithm library behind the `Calculator` trait.

use num_bigint::BigUint;

use crate::algorithm::{Algorithm, Implementation};
use crate::calculator::{Calculator, FibError};
use crate::iterative::fib_iterative;
use crate::memo::{fib_recursive_memo, MemoCache};
use crate::options::Options;
use crate::recursive::fib_recursive;
use crate::stack::with_recursion_stack;

/// Native calculator owning the memo cache used by `recursive_memo`.
#[derive(Debug, Default)]
pub struct NativeCalculator {
    memo: MemoCache,
}

impl NativeCalculator {
    /// Create a calculator with an empty memo cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The memo cache used by `recursive_memo`.
    #[must_use]
    pub fn memo(&self) -> &MemoCache {
        &self.memo
    }
}

impl Calculator for NativeCalculator {
    fn calculate(
        &self,
        algorithm: Algorithm,
        n: u64,
        opts: &Options,
    ) -> Result<BigUint, FibError> {
        let max_depth = opts.max_recursion_depth;
        match algorithm {
            Algorithm::Iterative => Ok(fib_iterative(n)),
            Algorithm::Recursive => {
                with_recursion_stack(opts.recursion_stack_bytes, || fib_recursive(n, max_depth))
            }
            Algorithm::RecursiveMemo => with_recursion_stack(opts.recursion_stack_bytes, || {
                fib_recursive_memo(n, &self.memo, max_depth)
            }),
        }
    }

    fn implementation(&self) -> Implementation {
        Implementation::Native
    }
}
