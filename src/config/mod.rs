//! Configuration module
//!
//! Settings file handling: API credentials, output preferences and logging.

pub mod config;

pub use config::Config;
