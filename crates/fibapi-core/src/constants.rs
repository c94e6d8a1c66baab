//! Limits and defaults shared by the algorithms, the dispatcher, and the server.

/// Largest index accepted by the compute endpoint, regardless of algorithm.
pub const MAX_N: u64 = 10_000;

/// Largest index accepted for naive recursion on the compute endpoint.
pub const NAIVE_RECURSION_LIMIT: u64 = 40;

/// Largest index for which the benchmark matrix includes naive recursion.
///
/// Stricter than [`NAIVE_RECURSION_LIMIT`] because several algorithms run
/// back-to-back in one request.
pub const BENCHMARK_NAIVE_LIMIT: u64 = 35;

/// Default maximum call depth for the recursive algorithms.
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 12_000;

/// Default stack size (bytes) of the thread that runs recursive algorithms.
pub const DEFAULT_RECURSION_STACK_BYTES: usize = 64 * 1024 * 1024;

/// Precomputed Fibonacci values for n = 0..=93.
///
/// F(93) = 12,200,160,415,121,876,738 is the largest Fibonacci number
/// that fits in `u64`.
pub const FIB_TABLE: [u64; 94] = {
    let mut table = [0u64; 94];
    table[0] = 0;
    table[1] = 1;
    let mut i = 2;
    while i < 94 {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
};
