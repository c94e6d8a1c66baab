//! # fibapi-orchestration
//!
//! Request dispatch, timed execution, the benchmark matrix, and result analysis.

pub mod benchmark;
pub mod dispatcher;
pub mod interfaces;
pub mod orchestrator;

pub use benchmark::BenchmarkRunner;
pub use dispatcher::Dispatcher;
pub use interfaces::{BenchmarkEntry, BenchmarkReport, ComputationRequest, ComputationResult};
pub use orchestrator::{analyze_consistency, execute_timed};
