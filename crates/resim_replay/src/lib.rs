//! Sample-driven replay engine for RTL simulation regression testing.
//!
//! A recorded sample (see `resim_sample`) is replayed against a live
//! simulation target: each snapshot resets the target, re-applies the
//! recorded stimulus, and compares observed outputs against the recorded
//! expectations. The run's verdict is the conjunction of every expectation.
//!
//! # Architecture
//!
//! - [`SimTarget`] is the backend contract: advance, deposit, read
//! - [`SignalRegistry`] maps resolved signal names to target handles
//! - [`ReplayEngine`] is the per-snapshot reset/execute state machine
//! - [`RunReport`] carries the verdict and the failing expectations
//! - [`MemoryTarget`] is a loopback backend for self-checks and tests
//!
//! # Usage
//!
//! ```ignore
//! use resim_replay::{replay_sample, MemoryTarget};
//!
//! let mut target = MemoryTarget::new(sample.referenced_signals());
//! let report = replay_sample(sample, &mut target, &config.replay)?;
//! eprintln!("{}", report.summary());
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod memory;
pub mod registry;
pub mod report;
pub mod target;

pub use engine::{replay_sample, EngineState, ReplayEngine};
pub use error::ReplayError;
pub use memory::{Deposit, MemoryTarget};
pub use registry::SignalRegistry;
pub use report::{ExpectFailure, RunReport};
pub use target::{DepositMode, SignalHandle, SimTarget};
