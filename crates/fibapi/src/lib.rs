//! FibAPI library: HTTP application logic for the Fibonacci service.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
