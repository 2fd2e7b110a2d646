//! Subcommand implementations

pub mod categories;
pub mod distance;
pub mod geocode;
pub mod locate;
pub mod recent;
pub mod search;
