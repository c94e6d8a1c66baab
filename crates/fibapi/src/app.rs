//! HTTP router, handlers, and server entry point.
//!
//! ## Endpoints
//!
//! - `GET /` - service description and accelerator availability
//! - `GET /fibonacci/{n}?algorithm=..&implementation=..` - compute F(n)
//! - `GET /benchmark/{n}` - run the benchmark matrix for F(n)
//! - `GET /health` - liveness check

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use fibapi_core::{
    Accelerator, Algorithm, FibError, ImplementationPreference, NativeCalculator, MAX_N,
};
use fibapi_orchestration::{
    analyze_consistency, BenchmarkReport, BenchmarkRunner, ComputationRequest, ComputationResult,
    Dispatcher,
};

use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::version;

/// Paths advertised by `GET /`.
pub const ENDPOINTS: [&str; 3] = ["/fibonacci/{n}", "/benchmark/{n}", "/health"];

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Wrap a dispatcher for sharing across handlers.
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Build state from configuration, probing for the accelerator.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let opts = config.options()?;
        let accelerator = Accelerator::detect(!config.no_accelerator);
        let dispatcher = Dispatcher::new(Arc::new(NativeCalculator::new()), accelerator, opts);
        Ok(Self::new(dispatcher))
    }

    /// The dispatcher behind this state.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
    endpoints: [&'static str; 3],
    native_accelerator_available: bool,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Query string of `GET /fibonacci/{n}`.
#[derive(Debug, Default, Deserialize)]
pub struct FibonacciQuery {
    /// Algorithm to run; defaults to `iterative`.
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Implementation to use; defaults to `auto`.
    #[serde(default)]
    pub implementation: ImplementationPreference,
}

/// Index taken from the URL path.
///
/// Any decimal integer is accepted; values outside `i64` are kept as range
/// markers so they fail validation (400) rather than parsing (422).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathIndex {
    /// Fits in `i64`.
    Value(i64),
    /// Above `i64::MAX`.
    Overflow,
    /// Below `i64::MIN`.
    Underflow,
}

impl PathIndex {
    /// Parse an optionally signed decimal integer.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        if let Ok(n) = raw.parse::<i64>() {
            return Ok(PathIndex::Value(n));
        }
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::Unprocessable(format!(
                "Invalid URL: Cannot parse `{raw}` to a `i64`"
            )));
        }
        Ok(if negative {
            PathIndex::Underflow
        } else {
            PathIndex::Overflow
        })
    }

    /// The index clamped into `i64`.
    #[must_use]
    pub fn saturating(self) -> i64 {
        match self {
            PathIndex::Value(n) => n,
            PathIndex::Overflow => i64::MAX,
            PathIndex::Underflow => i64::MIN,
        }
    }
}

fn path_index(path: Result<Path<String>, PathRejection>) -> Result<PathIndex, ApiError> {
    let Path(raw) = path.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    PathIndex::parse(&raw)
}

/// Build the service router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/fibonacci/{n}", get(fibonacci_handler))
        .route("/benchmark/{n}", get(benchmark_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Fibonacci API",
        endpoints: ENDPOINTS,
        native_accelerator_available: state.dispatcher.accelerator().is_available(),
    })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn fibonacci_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<FibonacciQuery>, QueryRejection>,
) -> Result<Json<ComputationResult>, ApiError> {
    let n = path_index(path)?.saturating();
    let Query(query) = query.map_err(|e| ApiError::Unprocessable(e.body_text()))?;

    let request = ComputationRequest::new(n)
        .with_algorithm(query.algorithm)
        .with_implementation(query.implementation);
    let dispatcher = Arc::clone(&state.dispatcher);
    let result = tokio::task::spawn_blocking(move || dispatcher.compute(&request))
        .await
        .map_err(|e| ApiError::Task(e.to_string()))??;
    Ok(Json(result))
}

async fn benchmark_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<BenchmarkReport>, ApiError> {
    let n = match path_index(path)? {
        PathIndex::Overflow => {
            return Err(FibError::InvalidInput(format!("n must be <= {MAX_N}")).into());
        }
        index => index.saturating(),
    };

    let dispatcher = Arc::clone(&state.dispatcher);
    let report = tokio::task::spawn_blocking(move || BenchmarkRunner::new(&dispatcher).run(n))
        .await
        .map_err(|e| ApiError::Task(e.to_string()))??;

    if let Err(FibError::Mismatch) = analyze_consistency(&report) {
        tracing::warn!(n = report.n, "benchmark results disagree between entries");
    }
    Ok(Json(report))
}

/// Run the server until Ctrl+C.
pub async fn run(config: &AppConfig) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        "{} listening on http://{}",
        version::full_version(),
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
