//! Calculation options.

use crate::constants::{DEFAULT_MAX_RECURSION_DEPTH, DEFAULT_RECURSION_STACK_BYTES};

/// Resource bounds applied to the recursive algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum call depth before a recursive algorithm gives up.
    pub max_recursion_depth: usize,
    /// Stack size (bytes) of the thread running recursive algorithms.
    pub recursion_stack_bytes: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            recursion_stack_bytes: DEFAULT_RECURSION_STACK_BYTES,
        }
    }
}

impl Options {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.max_recursion_depth == 0 {
            self.max_recursion_depth = DEFAULT_MAX_RECURSION_DEPTH;
        }
        if self.recursion_stack_bytes == 0 {
            self.recursion_stack_bytes = DEFAULT_RECURSION_STACK_BYTES;
        }
        self
    }
}

/// Parse a size string like "64M", "512K", "1G" into bytes.
///
/// An empty string parses to 0, which [`Options::normalize`] turns into the default.
pub fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0);
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s, 1)
    };

    let value: usize = num_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid size: {e}"))?;
    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {s}"))
}
