//! Core utilities for the professional finder
//!
//! This crate provides shared functionality used across the workspace:
//!
//! - **Error handling**: Coded errors with context and recovery suggestions
//! - **Resilience**: Retry policy with backoff and a circuit breaker for HTTP adapters
//! - **Configuration**: TOML-based configuration with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use profinder_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("default radius: {} km", config.schema.search.default_radius_km);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig};
}
