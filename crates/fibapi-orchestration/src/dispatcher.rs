//! Request validation, implementation selection, and timed execution.

use std::sync::Arc;

use fibapi_core::{
    Accelerator, Algorithm, Calculator, FibError, ImplementationPreference, Options, MAX_N,
    NAIVE_RECURSION_LIMIT,
};

use crate::interfaces::{ComputationRequest, ComputationResult};
use crate::orchestrator::{as_millis_f64, execute_timed};

/// Routes compute requests to the native calculator or the accelerator.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    native: Arc<dyn Calculator>,
    accelerator: Accelerator,
    opts: Options,
}

impl Dispatcher {
    /// Create a dispatcher over a native calculator and a resolved accelerator.
    #[must_use]
    pub fn new(native: Arc<dyn Calculator>, accelerator: Accelerator, opts: Options) -> Self {
        Self {
            native,
            accelerator,
            opts: opts.normalize(),
        }
    }

    /// The accelerator capability this dispatcher was built with.
    #[must_use]
    pub fn accelerator(&self) -> &Accelerator {
        &self.accelerator
    }

    /// The native calculator.
    #[must_use]
    pub fn native(&self) -> &Arc<dyn Calculator> {
        &self.native
    }

    /// Options passed to every calculation.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Validate a request, returning the index as `u64`.
    ///
    /// Rules apply in order and the first failure wins.
    pub fn validate(&self, req: &ComputationRequest) -> Result<u64, FibError> {
        let Ok(n) = u64::try_from(req.n) else {
            return Err(FibError::InvalidInput("n must be non-negative".into()));
        };
        if req.algorithm == Algorithm::Recursive && n > NAIVE_RECURSION_LIMIT {
            return Err(FibError::InvalidInput(format!(
                "For recursive algorithm without memoization, n must be <= {NAIVE_RECURSION_LIMIT} to avoid excessive computation time"
            )));
        }
        if n > MAX_N {
            return Err(FibError::InvalidInput(format!("n must be <= {MAX_N}")));
        }
        if req.implementation == ImplementationPreference::Accelerated
            && !self.accelerator.is_available()
        {
            return Err(FibError::AcceleratorUnavailable);
        }
        Ok(n)
    }

    /// Pick the calculator for an implementation preference.
    pub fn select(
        &self,
        preference: ImplementationPreference,
    ) -> Result<&Arc<dyn Calculator>, FibError> {
        match (preference, self.accelerator.calculator()) {
            (ImplementationPreference::Native, _) | (ImplementationPreference::Auto, None) => {
                Ok(&self.native)
            }
            (ImplementationPreference::Accelerated | ImplementationPreference::Auto, Some(acc)) => {
                Ok(acc)
            }
            (ImplementationPreference::Accelerated, None) => Err(FibError::AcceleratorUnavailable),
        }
    }

    /// Validate, select, and run a request.
    pub fn compute(&self, req: &ComputationRequest) -> Result<ComputationResult, FibError> {
        let n = self.validate(req).inspect_err(|e| {
            tracing::debug!(n = req.n, algorithm = %req.algorithm, "rejected request: {e}");
        })?;
        let calc = self.select(req.implementation)?;

        let (outcome, elapsed) = execute_timed(calc.as_ref(), req.algorithm, n, &self.opts);
        let result = outcome.inspect_err(|e| {
            if let FibError::RecursionDepthExceeded { .. } = e {
                tracing::warn!(n, algorithm = %req.algorithm, "recursion depth exhausted");
            }
        })?;

        let implementation_used = calc.implementation();
        tracing::debug!(
            n,
            algorithm = %req.algorithm,
            implementation = %implementation_used,
            elapsed = ?elapsed,
            "computed"
        );

        Ok(ComputationResult {
            n,
            result,
            algorithm: req.algorithm,
            computation_time_ms: as_millis_f64(elapsed),
            implementation_used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fibapi_core::{Implementation, NativeCalculator};
    use num_bigint::BigUint;

    /// The native library reporting itself as the accelerator.
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

    fn without_accelerator() -> Dispatcher {
        Dispatcher::new(
            Arc::new(NativeCalculator::new()),
            Accelerator::Unavailable,
            Options::default(),
        )
    }

    fn with_accelerator() -> Dispatcher {
        Dispatcher::new(
            Arc::new(NativeCalculator::new()),
            Accelerator::Available(Arc::new(MirrorAccelerator(NativeCalculator::new()))),
            Options::default(),
        )
    }

    #[test]
    fn computes_known_values() {
        let dispatcher = without_accelerator();
        for (n, expected) in [(0i64, 0u32), (1, 1), (10, 55), (20, 6765)] {
            for algo in Algorithm::ALL {
                let req = ComputationRequest::new(n).with_algorithm(algo);
                let result = dispatcher.compute(&req).unwrap();
                assert_eq!(result.result, BigUint::from(expected));
                assert_eq!(result.algorithm, algo);
                assert!(result.computation_time_ms >= 0.0);
            }
        }
    }

    #[test]
    fn negative_n_rejected_first() {
        let dispatcher = without_accelerator();
        let req = ComputationRequest::new(-1)
            .with_algorithm(Algorithm::Recursive)
            .with_implementation(ImplementationPreference::Accelerated);
        assert_eq!(
            dispatcher.validate(&req),
            Err(FibError::InvalidInput("n must be non-negative".into()))
        );
    }

    #[test]
    fn naive_threshold() {
        let dispatcher = without_accelerator();
        let ok = ComputationRequest::new(40).with_algorithm(Algorithm::Recursive);
        assert_eq!(dispatcher.validate(&ok), Ok(40));

        let req = ComputationRequest::new(50).with_algorithm(Algorithm::Recursive);
        let err = dispatcher.validate(&req).unwrap_err();
        assert!(err.to_string().contains("n must be <= 40"));
    }

    #[test]
    fn naive_threshold_checked_before_ceiling() {
        let dispatcher = without_accelerator();
        let req = ComputationRequest::new(20_000).with_algorithm(Algorithm::Recursive);
        let err = dispatcher.validate(&req).unwrap_err();
        assert!(err.to_string().contains("recursive algorithm"));
    }

    #[test]
    fn global_ceiling() {
        let dispatcher = without_accelerator();
        assert_eq!(dispatcher.validate(&ComputationRequest::new(10_000)), Ok(10_000));
        let err = dispatcher
            .validate(&ComputationRequest::new(10_001).with_algorithm(Algorithm::RecursiveMemo))
            .unwrap_err();
        assert_eq!(err, FibError::InvalidInput("n must be <= 10000".into()));
    }

    #[test]
    fn ceiling_checked_before_accelerator() {
        let dispatcher = without_accelerator();
        let req = ComputationRequest::new(10_001)
            .with_implementation(ImplementationPreference::Accelerated);
        assert!(matches!(
            dispatcher.validate(&req),
            Err(FibError::InvalidInput(_))
        ));
    }

    #[test]
    fn accelerated_requires_accelerator() {
        let dispatcher = without_accelerator();
        let req =
            ComputationRequest::new(10).with_implementation(ImplementationPreference::Accelerated);
        assert_eq!(dispatcher.compute(&req), Err(FibError::AcceleratorUnavailable));
    }

    #[test]
    fn auto_falls_back_to_native() {
        let dispatcher = without_accelerator();
        let result = dispatcher.compute(&ComputationRequest::new(10)).unwrap();
        assert_eq!(result.implementation_used, Implementation::Native);
    }

    #[test]
    fn auto_prefers_accelerator() {
        let dispatcher = with_accelerator();
        let result = dispatcher.compute(&ComputationRequest::new(10)).unwrap();
        assert_eq!(result.implementation_used, Implementation::Accelerated);
    }

    #[test]
    fn native_preference_ignores_accelerator() {
        let dispatcher = with_accelerator();
        let req = ComputationRequest::new(10).with_implementation(ImplementationPreference::Native);
        let result = dispatcher.compute(&req).unwrap();
        assert_eq!(result.implementation_used, Implementation::Native);
    }

    #[test]
    fn accelerated_and_native_agree() {
        let dispatcher = with_accelerator();
        for n in [0i64, 50, 93, 94, 1000] {
            let native = dispatcher
                .compute(&ComputationRequest::new(n).with_implementation(ImplementationPreference::Native))
                .unwrap();
            let accelerated = dispatcher
                .compute(
                    &ComputationRequest::new(n)
                        .with_implementation(ImplementationPreference::Accelerated),
                )
                .unwrap();
            assert_eq!(native.result, accelerated.result, "F({n})");
        }
    }

    #[test]
    fn recursion_depth_surfaces_as_client_error() {
        let dispatcher = Dispatcher::new(
            Arc::new(NativeCalculator::new()),
            Accelerator::Unavailable,
            Options {
                max_recursion_depth: 100,
                ..Options::default()
            },
        );
        let req = ComputationRequest::new(500).with_algorithm(Algorithm::RecursiveMemo);
        let err = dispatcher.compute(&req).unwrap_err();
        assert_eq!(err, FibError::RecursionDepthExceeded { n: 500 });
        assert!(err.is_client_error());
        assert!(err.to_string().contains("n=500"));
        assert!(err.to_string().contains("iterative"));
    }

    #[test]
    fn memo_cache_cleared_between_requests() {
        let native = Arc::new(NativeCalculator::new());
        let dispatcher = Dispatcher::new(
            native.clone(),
            Accelerator::Unavailable,
            Options::default(),
        );
        let req = ComputationRequest::new(300).with_algorithm(Algorithm::RecursiveMemo);
        dispatcher.compute(&req).unwrap();
        dispatcher
            .compute(&ComputationRequest::new(5).with_algorithm(Algorithm::RecursiveMemo))
            .unwrap();
        assert_eq!(native.memo().len(), 6);
    }

    #[test]
    fn concurrent_memo_requests_are_serialized() {
        let native = Arc::new(NativeCalculator::new());
        let dispatcher = Dispatcher::new(
            native.clone(),
            Accelerator::Unavailable,
            Options::default(),
        );
        let indices: Vec<u64> = (0..12).map(|i| 100 + i * 750).collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = indices
                .iter()
                .map(|&n| {
                    let dispatcher = &dispatcher;
                    scope.spawn(move || {
                        let req = ComputationRequest::new(i64::try_from(n).unwrap())
                            .with_algorithm(Algorithm::RecursiveMemo);
                        (n, dispatcher.compute(&req).unwrap())
                    })
                })
                .collect();
            for handle in handles {
                let (n, result) = handle.join().unwrap();
                assert_eq!(result.n, n);
                assert_eq!(result.result, fibapi_core::fibonacci(n), "F({n})");
            }
        });

        // Only the last call's entries survive: F(0)..=F(n) for one requested n.
        let memo = native.memo();
        let last = indices
            .iter()
            .copied()
            .find(|&n| memo.len() == usize::try_from(n + 1).unwrap())
            .expect("cache does not match any single call");
        assert!((0..=last).all(|i| memo.contains(i)));
        assert!(!memo.contains(last + 1));
    }

    #[test]
    fn zero_options_are_normalized() {
        let dispatcher = Dispatcher::new(
            Arc::new(NativeCalculator::new()),
            Accelerator::Unavailable,
            Options {
                max_recursion_depth: 0,
                recursion_stack_bytes: 0,
            },
        );
        assert_eq!(*dispatcher.options(), Options::default());
    }
}
