//! The simulation target contract.
//!
//! The replay engine never touches signal storage directly. Everything goes
//! through the three primitives of [`SimTarget`]: advance time, deposit a
//! value, read a value. Signals are addressed by [`SignalHandle`], an index
//! into the target's own signal enumeration.

use resim_common::Value;
use serde::{Deserialize, Serialize};

pub use resim_sample::DepositMode;

use crate::error::ReplayError;

/// Opaque ID for a signal of a simulation target.
///
/// The raw index is the signal's position in [`SimTarget::signal_names`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SignalHandle(u32);

impl SignalHandle {
    /// Creates a `SignalHandle` from a raw index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }

    /// Returns the raw index as a `usize` for slice indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A simulation backend that owns signal state and advances time.
///
/// Calls are synchronous from the engine's point of view; a backend may take
/// as long as it needs inside each call.
pub trait SimTarget {
    /// Enumerates every signal the target exposes. The position of a name
    /// becomes its [`SignalHandle`].
    fn signal_names(&self) -> Vec<String>;

    /// Advances simulated time by `cycles` clock cycles.
    fn advance(&mut self, cycles: u64) -> Result<(), ReplayError>;

    /// Writes `value` into a signal using the given deposit semantics.
    fn deposit(
        &mut self,
        handle: SignalHandle,
        value: &Value,
        mode: DepositMode,
    ) -> Result<(), ReplayError>;

    /// Reads the current value of a signal.
    fn read(&mut self, handle: SignalHandle) -> Result<Value, ReplayError>;
}
