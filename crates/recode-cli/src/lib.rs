//! CLI library components for the recode tool.

pub mod cli;
pub mod commands;
pub mod io;
pub mod listing;
pub mod logging;
pub mod summary;
pub mod types;
