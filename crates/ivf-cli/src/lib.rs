//! CLI library components for the import value filter.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
