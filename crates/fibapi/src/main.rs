//! FibAPI: HTTP service computing Fibonacci numbers.

use anyhow::Result;
use fibapi_lib::{app, config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Parse CLI args and serve
    let config = config::AppConfig::parse();
    app::run(&config).await
}
