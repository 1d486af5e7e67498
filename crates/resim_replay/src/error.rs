//! Replay error types.
//!
//! All errors that can abort a replay run are represented as variants of
//! [`ReplayError`]. Expectation mismatches are not errors; they are recorded
//! in the [`RunReport`](crate::RunReport) and the run continues.

use resim_common::InternalError;

/// Errors that can occur while setting up or executing a replay.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// A command's `(group, id)` pair is outside the chain table.
    #[error("signal reference ({group}, {id}) is outside the chain table")]
    UnknownChain {
        /// Chain group index.
        group: usize,
        /// Position within the group.
        id: usize,
    },

    /// A resolved signal name is not known to the simulation target.
    #[error("signal '{name}' is not registered with the simulation target")]
    UnknownSignal {
        /// The fully resolved signal name.
        name: String,
    },

    /// The reset signal the replay protocol relies on is missing.
    #[error("reset signal '{name}' is not registered with the simulation target")]
    MissingResetSignal {
        /// The configured reset signal name.
        name: String,
    },

    /// The simulation backend reported a failure.
    #[error("simulation target error: {reason}")]
    Target {
        /// Backend-specific description.
        reason: String,
    },

    /// An engine invariant was violated.
    #[error(transparent)]
    Internal(#[from] InternalError),
}
