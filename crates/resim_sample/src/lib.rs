//! Sample log parsing and the per-cycle command model.
//!
//! A sample log is a line-oriented text file of positional records. Each line
//! starts with an integer record code (see [`RecordKind`]); the remaining
//! whitespace-separated tokens are the record's fields. Parsing produces a
//! [`Sample`]: the [`ChainTable`] of signal names declared by SIGNALS records,
//! and the ordered list of [`Snapshot`]s opened by CYCLE records, each holding
//! its [`Command`]s in log order.
//!
//! # Usage
//!
//! ```ignore
//! use resim_config::ResimConfig;
//! use resim_sample::load_sample;
//!
//! let sample = load_sample("run.sample".as_ref(), &ResimConfig::default())?;
//! println!("{} snapshots", sample.snapshots().len());
//! ```
//!
//! # Modules
//!
//! - `record`: record-type codes
//! - `command`: per-snapshot commands and deposit modes
//! - `chain`: group/ordinal to signal-name resolution
//! - `snapshot`: snapshots, the parsed sample, and parse statistics
//! - `parser`: the line parser (plain or gzip input)
//! - `error`: parse errors

#![warn(missing_docs)]

pub mod chain;
pub mod command;
pub mod error;
pub mod parser;
pub mod record;
pub mod snapshot;

pub use chain::ChainTable;
pub use command::{Command, DepositMode, SignalRef};
pub use error::SampleError;
pub use parser::{load_sample, parse_sample_reader, parse_sample_str};
pub use record::RecordKind;
pub use snapshot::{ParseStats, Sample, Snapshot};
