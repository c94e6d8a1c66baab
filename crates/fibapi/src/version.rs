//! Version information.

/// Get the version string.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get the full version string with the accelerator build flavour.
#[must_use]
pub fn full_version() -> String {
    format!("fibapi {} ({})", version(), build_flavour())
}

fn build_flavour() -> &'static str {
    if cfg!(feature = "gmp") {
        "gmp"
    } else {
        "native"
    }
}
