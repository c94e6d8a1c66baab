//! Memoized recursive Fibonacci and its cache.

use std::collections::HashMap;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use parking_lot::Mutex;

use crate::calculator::FibError;
use crate::recursive::DepthExceeded;

/// Cache of F(i) values shared by memoized calls.
///
/// Every memoized computation holds the lock for its whole duration and
/// clears the map first, so timings stay comparable between calls and
/// concurrent requests never observe each other's entries.
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: Mutex<HashMap<u64, BigUint>>,
}

impl MemoCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Whether F(n) is cached.
    #[must_use]
    pub fn contains(&self, n: u64) -> bool {
        self.entries.lock().contains_key(&n)
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// Compute F(n) recursively, consulting and populating `cache`.
///
/// The cache is cleared before the computation starts. On success it holds
/// F(0)..=F(n). Fails with [`FibError::RecursionDepthExceeded`] once the call
/// depth exceeds `max_depth`.
pub fn fib_recursive_memo(
    n: u64,
    cache: &MemoCache,
    max_depth: usize,
) -> Result<BigUint, FibError> {
    let mut entries = cache.entries.lock();
    entries.clear();
    step(n, &mut entries, 1, max_depth)
        .map_err(|DepthExceeded| FibError::RecursionDepthExceeded { n })
}

fn step(
    n: u64,
    memo: &mut HashMap<u64, BigUint>,
    depth: usize,
    max_depth: usize,
) -> Result<BigUint, DepthExceeded> {
    if depth > max_depth {
        return Err(DepthExceeded);
    }
    if let Some(value) = memo.get(&n) {
        return Ok(value.clone());
    }

    let value = match n {
        0 => BigUint::zero(),
        1 => BigUint::one(),
        _ => {
            let a = step(n - 1, memo, depth + 1, max_depth)?;
            let b = step(n - 2, memo, depth + 1, max_depth)?;
            a + b
        }
    };
    memo.insert(n, value.clone());
    Ok(value)
}
