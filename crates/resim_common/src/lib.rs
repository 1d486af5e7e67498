//! Shared foundational types used across the resim replay toolchain.
//!
//! This crate provides the arbitrary-width unsigned [`Value`] carried by
//! sample commands and read back from simulation targets, plus the common
//! internal error type.

#![warn(missing_docs)]

pub mod result;
pub mod value;

pub use result::InternalError;
pub use value::{ParseValueError, Value};
