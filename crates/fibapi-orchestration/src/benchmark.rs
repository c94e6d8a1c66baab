//! Benchmark matrix: every applicable algorithm against every loaded implementation.

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use fibapi_core::{Algorithm, Calculator, FibError, Options, BENCHMARK_NAIVE_LIMIT};

use crate::dispatcher::Dispatcher;
use crate::interfaces::{benchmark_label, BenchmarkEntry, BenchmarkReport};
use crate::orchestrator::{as_millis_f64, execute_timed};

/// Error text recorded for native entries that exhaust the recursion bound.
pub const RECURSION_LIMIT_MESSAGE: &str = "Recursion limit exceeded";

/// Algorithms benchmarked for index `n`.
///
/// Naive recursion joins the set only for `n <= BENCHMARK_NAIVE_LIMIT`.
#[must_use]
pub fn benchmark_algorithms(n: u64) -> Vec<Algorithm> {
    let mut algorithms = vec![Algorithm::Iterative, Algorithm::RecursiveMemo];
    if n <= BENCHMARK_NAIVE_LIMIT {
        algorithms.push(Algorithm::Recursive);
    }
    algorithms
}

/// Runs the benchmark matrix through a dispatcher's calculators.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkRunner<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> BenchmarkRunner<'a> {
    /// Benchmark with the calculators and options of `dispatcher`.
    #[must_use]
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Run every algorithm for `n`, natively and then on the accelerator if loaded.
    ///
    /// Native recursion-depth failures and any accelerator failure are recorded
    /// per entry; other native failures abort the run.
    pub fn run(&self, n: i64) -> Result<BenchmarkReport, FibError> {
        let Ok(n) = u64::try_from(n) else {
            return Err(FibError::InvalidInput("n must be non-negative".into()));
        };
        let algorithms = benchmark_algorithms(n);
        let opts = self.dispatcher.options();
        let mut results = BTreeMap::new();

        let native = self.dispatcher.native();
        for &algorithm in &algorithms {
            let (outcome, elapsed) = execute_timed(native.as_ref(), algorithm, n, opts);
            let entry = match outcome {
                Ok(result) => BenchmarkEntry::Completed {
                    result,
                    time_ms: as_millis_f64(elapsed),
                },
                Err(FibError::RecursionDepthExceeded { .. }) => {
                    tracing::warn!(n, %algorithm, "benchmark: recursion depth exhausted");
                    BenchmarkEntry::failed(RECURSION_LIMIT_MESSAGE)
                }
                Err(e) => return Err(e),
            };
            results.insert(benchmark_label(native.implementation(), algorithm), entry);
        }

        let accelerator = self.dispatcher.accelerator();
        if let Some(acc) = accelerator.calculator() {
            for &algorithm in &algorithms {
                let entry = match run_isolated(acc.as_ref(), algorithm, n, opts) {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!(n, %algorithm, "benchmark: accelerator fault: {e}");
                        BenchmarkEntry::failed(e.to_string())
                    }
                };
                results.insert(benchmark_label(acc.implementation(), algorithm), entry);
            }
        }

        Ok(BenchmarkReport {
            n,
            results,
            accelerator_available: accelerator.is_available(),
        })
    }
}

/// Run one accelerated cell, turning a panic into an error.
fn run_isolated(
    calc: &dyn Calculator,
    algorithm: Algorithm,
    n: u64,
    opts: &Options,
) -> Result<BenchmarkEntry, FibError> {
    let (outcome, elapsed) =
        catch_unwind(AssertUnwindSafe(|| execute_timed(calc, algorithm, n, opts)))
            .map_err(|_| FibError::Calculation("accelerator panicked".into()))?;
    Ok(BenchmarkEntry::Completed {
        result: outcome?,
        time_ms: as_millis_f64(elapsed),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use num_bigint::BigUint;

    use super::*;
    use crate::orchestrator::analyze_consistency;
    use fibapi_core::{Accelerator, Implementation, NativeCalculator};

    struct MirrorAccelerator(NativeCalculator);

    impl Calculator for MirrorAccelerator {
        fn calculate(
            &self,
            algorithm: Algorithm,
            n: u64,
            opts: &Options,
        ) -> Result<BigUint, FibError> {
            self.0.calculate(algorithm, n, opts)
        }

        fn implementation(&self) -> Implementation {
            Implementation::Accelerated
        }
    }

    /// Accelerator that fails every algorithm except the iterative one.
    struct FaultyAccelerator;

    impl Calculator for FaultyAccelerator {
        fn calculate(
            &self,
            algorithm: Algorithm,
            n: u64,
            _opts: &Options,
        ) -> Result<BigUint, FibError> {
            match algorithm {
                Algorithm::Iterative => Ok(fibapi_core::fibonacci(n)),
                Algorithm::Recursive => panic!("native module crashed"),
                Algorithm::RecursiveMemo => Err(FibError::Calculation("out of memory".into())),
            }
        }

        fn implementation(&self) -> Implementation {
            Implementation::Accelerated
        }
    }

    fn dispatcher(accelerator: Accelerator, opts: Options) -> Dispatcher {
        Dispatcher::new(Arc::new(NativeCalculator::new()), accelerator, opts)
    }

    #[test]
    fn algorithm_set_thresholds() {
        assert_eq!(
            benchmark_algorithms(30),
            vec![Algorithm::Iterative, Algorithm::RecursiveMemo, Algorithm::Recursive]
        );
        assert_eq!(
            benchmark_algorithms(35),
            vec![Algorithm::Iterative, Algorithm::RecursiveMemo, Algorithm::Recursive]
        );
        assert_eq!(
            benchmark_algorithms(36),
            vec![Algorithm::Iterative, Algorithm::RecursiveMemo]
        );
    }

    #[test]
    fn native_only_matrix() {
        let dispatcher = dispatcher(Accelerator::Unavailable, Options::default());
        let report = BenchmarkRunner::new(&dispatcher).run(20).unwrap();

        assert_eq!(report.n, 20);
        assert!(!report.accelerator_available);
        assert_eq!(report.results.len(), 3);
        for label in [
            "native-python_iterative",
            "native-python_recursive",
            "native-python_recursive_memo",
        ] {
            let entry = &report.results[label];
            assert_eq!(entry.result(), Some(&BigUint::from(6765u32)), "{label}");
            assert!(entry.time_ms().is_some());
        }
        assert!(analyze_consistency(&report).is_ok());
    }

    #[test]
    fn naive_omitted_above_threshold() {
        let dispatcher = dispatcher(Accelerator::Unavailable, Options::default());
        let report = BenchmarkRunner::new(&dispatcher).run(36).unwrap();
        assert_eq!(report.results.len(), 2);
        assert!(!report.results.contains_key("native-python_recursive"));
    }

    #[test]
    fn negative_n_rejected() {
        let dispatcher = dispatcher(Accelerator::Unavailable, Options::default());
        assert_eq!(
            BenchmarkRunner::new(&dispatcher).run(-1),
            Err(FibError::InvalidInput("n must be non-negative".into()))
        );
    }

    #[test]
    fn accelerated_rows_added_when_available() {
        let acc = Accelerator::Available(Arc::new(MirrorAccelerator(NativeCalculator::new())));
        let dispatcher = dispatcher(acc, Options::default());
        let report = BenchmarkRunner::new(&dispatcher).run(25).unwrap();

        assert!(report.accelerator_available);
        assert_eq!(report.results.len(), 6);
        assert!(report.results.contains_key("accelerated_recursive"));
        assert!(analyze_consistency(&report).is_ok());
    }

    #[test]
    fn recursion_depth_recorded_per_entry() {
        let opts = Options {
            max_recursion_depth: 200,
            ..Options::default()
        };
        let dispatcher = dispatcher(Accelerator::Unavailable, opts);
        let report = BenchmarkRunner::new(&dispatcher).run(1000).unwrap();

        let memo = &report.results["native-python_recursive_memo"];
        assert_eq!(memo.error(), Some(RECURSION_LIMIT_MESSAGE));
        assert!(memo.time_ms().is_none());
        assert!(report.results["native-python_iterative"].result().is_some());
    }

    #[test]
    fn accelerator_faults_do_not_abort_matrix() {
        let dispatcher = dispatcher(
            Accelerator::Available(Arc::new(FaultyAccelerator)),
            Options::default(),
        );
        let report = BenchmarkRunner::new(&dispatcher).run(10).unwrap();

        assert_eq!(report.results.len(), 6);
        assert_eq!(
            report.results["accelerated_iterative"].result(),
            Some(&BigUint::from(55u32))
        );
        assert_eq!(
            report.results["accelerated_recursive_memo"].error(),
            Some("calculation error: out of memory")
        );
        assert_eq!(
            report.results["accelerated_recursive"].error(),
            Some("calculation error: accelerator panicked")
        );
        assert!(analyze_consistency(&report).is_ok());
    }
}
