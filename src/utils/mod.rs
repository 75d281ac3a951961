//! Utility functions and helpers
//!
//! Platform paths and logging setup for the command-line front end.

pub mod app_paths;
pub mod logging;
