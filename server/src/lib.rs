//! # Splitsure Static Host
//!
//! Serves the built web bundle (`trunk build` output) with client-side
//! routing fallback, CORS and request tracing.

pub mod config;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use server::{create_router, init_tracing, start_server};
