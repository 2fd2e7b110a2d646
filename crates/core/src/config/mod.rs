//! Configuration loading and schema definitions
//!
//! Settings for the search front end, read from `profinder.toml`.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
