//! Parsing and validation of `resim.toml` replay configuration files.
//!
//! This crate reads the optional configuration file and produces a
//! strongly-typed [`ResimConfig`] covering reset sequencing, the expectation
//! grace window, parser strictness and the record-type code table.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
