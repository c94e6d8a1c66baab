//! Timed execution and result analysis.

use std::time::{Duration, Instant};

use num_bigint::BigUint;

use fibapi_core::{Algorithm, Calculator, FibError, Options};

use crate::interfaces::BenchmarkReport;

/// Run one calculation, measuring wall-clock time around it.
pub fn execute_timed(
    calc: &dyn Calculator,
    algorithm: Algorithm,
    n: u64,
    opts: &Options,
) -> (Result<BigUint, FibError>, Duration) {
    let start = Instant::now();
    let result = calc.calculate(algorithm, n, opts);
    (result, start.elapsed())
}

/// Convert a duration to fractional milliseconds.
#[must_use]
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Check that every completed benchmark entry reports the same value.
pub fn analyze_consistency(report: &BenchmarkReport) -> Result<(), FibError> {
    let mut values = report.results.values().filter_map(|entry| entry.result());

    let Some(first) = values.next() else {
        return Err(FibError::Calculation("no valid results".into()));
    };
    if values.any(|value| value != first) {
        return Err(FibError::Mismatch);
    }
    Ok(())
}
