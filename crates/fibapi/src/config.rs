//! Application configuration from CLI flags and environment.

use anyhow::{anyhow, Result};
use clap::Parser;

use fibapi_core::options::{parse_size, Options};

/// FibAPI: HTTP service computing Fibonacci numbers with timing metadata.
#[derive(Parser, Debug, Clone)]
#[command(name = "fibapi", version, about)]
pub struct AppConfig {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0", env = "FIBAPI_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value = "8000", env = "FIBAPI_PORT")]
    pub port: u16,

    /// Skip accelerator detection and serve the native implementation only.
    #[arg(long, env = "FIBAPI_NO_ACCELERATOR")]
    pub no_accelerator: bool,

    /// Maximum call depth for recursive algorithms (0 = default).
    #[arg(long, default_value = "0")]
    pub max_recursion_depth: usize,

    /// Stack size for recursive algorithms (e.g., "64M", "512K").
    #[arg(long, default_value = "")]
    pub recursion_stack: String,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Socket address string to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Calculation options derived from the flags.
    pub fn options(&self) -> Result<Options> {
        let recursion_stack_bytes = parse_size(&self.recursion_stack)
            .map_err(|e| anyhow!("invalid recursion stack size: {e}"))?;
        Ok(Options {
            max_recursion_depth: self.max_recursion_depth,
            recursion_stack_bytes,
        }
        .normalize())
    }
}
