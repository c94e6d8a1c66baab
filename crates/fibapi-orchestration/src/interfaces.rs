//! Request and result types exchanged with the HTTP layer.

use std::collections::BTreeMap;

use num_bigint::BigUint;
use serde::Serialize;

use fibapi_core::{Algorithm, Implementation, ImplementationPreference};

/// One compute request, as received from a client.
///
/// `n` stays signed so negative indices reach validation instead of being
/// rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputationRequest {
    /// Requested index.
    pub n: i64,
    /// Algorithm to run.
    pub algorithm: Algorithm,
    /// Requested implementation.
    pub implementation: ImplementationPreference,
}

impl ComputationRequest {
    /// Request F(n) with the default algorithm and implementation.
    #[must_use]
    pub fn new(n: i64) -> Self {
        Self {
            n,
            algorithm: Algorithm::default(),
            implementation: ImplementationPreference::default(),
        }
    }

    /// Use the given algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Use the given implementation preference.
    #[must_use]
    pub fn with_implementation(mut self, implementation: ImplementationPreference) -> Self {
        self.implementation = implementation;
        self
    }
}

/// Outcome of a successful compute request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputationResult {
    /// Index that was computed.
    pub n: u64,
    /// F(n).
    #[serde(serialize_with = "json_number::serialize")]
    pub result: BigUint,
    /// Algorithm that ran.
    pub algorithm: Algorithm,
    /// Wall-clock time of the computation in milliseconds. Informational only.
    pub computation_time_ms: f64,
    /// Implementation that ran; never `auto`.
    pub implementation_used: Implementation,
}

/// One cell of the benchmark matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BenchmarkEntry {
    /// The algorithm produced a value.
    Completed {
        /// F(n).
        #[serde(serialize_with = "json_number::serialize")]
        result: BigUint,
        /// Wall-clock time in milliseconds.
        time_ms: f64,
    },
    /// The algorithm failed; `time_ms` is always `None`.
    Failed {
        /// Failure description.
        error: String,
        /// Always `None`, serialized as `null`.
        time_ms: Option<f64>,
    },
}

impl BenchmarkEntry {
    /// A failed entry with the given message.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        BenchmarkEntry::Failed {
            error: error.into(),
            time_ms: None,
        }
    }

    /// The computed value, if the entry completed.
    #[must_use]
    pub fn result(&self) -> Option<&BigUint> {
        match self {
            BenchmarkEntry::Completed { result, .. } => Some(result),
            BenchmarkEntry::Failed { .. } => None,
        }
    }

    /// The failure message, if the entry failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            BenchmarkEntry::Completed { .. } => None,
            BenchmarkEntry::Failed { error, .. } => Some(error),
        }
    }

    /// Elapsed time, if the entry completed.
    #[must_use]
    pub fn time_ms(&self) -> Option<f64> {
        match self {
            BenchmarkEntry::Completed { time_ms, .. } => Some(*time_ms),
            BenchmarkEntry::Failed { time_ms, .. } => *time_ms,
        }
    }
}

/// Outcome of a benchmark request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    /// Index that was benchmarked.
    pub n: u64,
    /// Entries keyed by `{implementation}_{algorithm}`.
    pub results: BTreeMap<String, BenchmarkEntry>,
    /// Whether the accelerated rows were attempted.
    pub accelerator_available: bool,
}

/// Key of a benchmark entry, e.g. `native-python_iterative`.
#[must_use]
pub fn benchmark_label(implementation: Implementation, algorithm: Algorithm) -> String {
    format!("{implementation}_{algorithm}")
}

/// Serialize a `BigUint` as a bare JSON number of any length.
pub mod json_number {
    use num_bigint::BigUint;
    use serde::{Serialize, Serializer};
    use serde_json::value::RawValue;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(value.to_string()).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}
