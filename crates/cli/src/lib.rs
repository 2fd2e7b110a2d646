//! CLI utilities for the professional finder
//!
//! Provides shared CLI functionality:
//! - Output format selection
//! - Status messages
//! - Spinners

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{format_count, format_duration, OutputFormat, Status};
