//! Algorithm and implementation selectors, as they appear on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculator::FibError;

/// Fibonacci algorithm variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Running-pair loop, O(n) time and O(1) extra space.
    #[default]
    Iterative,
    /// Naive recursion, exponential time.
    Recursive,
    /// Recursion backed by a memo cache cleared before every call.
    RecursiveMemo,
}

impl Algorithm {
    /// All algorithms in benchmark order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Iterative,
        Algorithm::RecursiveMemo,
        Algorithm::Recursive,
    ];

    /// Wire name of the algorithm.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Iterative => "iterative",
            Algorithm::Recursive => "recursive",
            Algorithm::RecursiveMemo => "recursive_memo",
        }
    }

    /// Whether the algorithm recurses and therefore needs the recursion stack.
    #[must_use]
    pub fn is_recursive(self) -> bool {
        !matches!(self, Algorithm::Iterative)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = FibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iterative" => Ok(Algorithm::Iterative),
            "recursive" => Ok(Algorithm::Recursive),
            "recursive_memo" => Ok(Algorithm::RecursiveMemo),
            other => Err(FibError::InvalidInput(format!("unknown algorithm: {other}"))),
        }
    }
}

/// Implementation that actually ran a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Implementation {
    /// The pure-Rust algorithm library.
    #[serde(rename = "native-python")]
    Native,
    /// The accelerator.
    #[serde(rename = "accelerated")]
    Accelerated,
}

impl Implementation {
    /// Wire name of the implementation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Implementation::Native => "native-python",
            Implementation::Accelerated => "accelerated",
        }
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implementation requested by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImplementationPreference {
    /// Always use the algorithm library.
    #[serde(rename = "native-python", alias = "python-native", alias = "python")]
    Native,
    /// Require the accelerator.
    #[serde(rename = "accelerated", alias = "cpp")]
    Accelerated,
    /// Use the accelerator when available.
    #[default]
    #[serde(rename = "auto")]
    Auto,
}

impl FromStr for ImplementationPreference {
    type Err = FibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native-python" | "python-native" | "python" => Ok(ImplementationPreference::Native),
            "accelerated" | "cpp" => Ok(ImplementationPreference::Accelerated),
            "auto" => Ok(ImplementationPreference::Auto),
            other => Err(FibError::InvalidInput(format!(
                "unknown implementation: {other}"
            ))),
        }
    }
}
