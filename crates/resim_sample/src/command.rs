//! The closed set of commands a snapshot can carry.

use resim_common::Value;
use serde::Serialize;

/// A `(group, id)` reference into the [`ChainTable`](crate::ChainTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SignalRef {
    /// Chain group index.
    pub group: usize,
    /// Position of the signal within its group.
    pub id: usize,
}

impl SignalRef {
    /// Creates a reference to signal `id` of chain `group`.
    pub fn new(group: usize, id: usize) -> Self {
        Self { group, id }
    }
}

/// How a value is written into a signal.
///
/// The distinction matters to the simulation backend only; the replay engine
/// treats every mode as "set and move on".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositMode {
    /// Ordinary drive.
    Poke,
    /// Initial or state data.
    Load,
    /// Override outside normal drive semantics.
    Force,
}

/// One operation of a snapshot, executed in log order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Command {
    /// Advance the simulation by `count` cycles.
    Step {
        /// Number of cycles.
        count: u64,
    },
    /// Deposit state data, into element `index` of the signal if present.
    Load {
        /// Signal reference.
        signal: SignalRef,
        /// Value to deposit.
        value: Value,
        /// Element index, `None` for the whole signal.
        index: Option<u64>,
    },
    /// Deposit a value with ordinary drive semantics.
    Poke {
        /// Signal reference.
        signal: SignalRef,
        /// Value to deposit.
        value: Value,
    },
    /// Override a signal's value.
    Force {
        /// Signal reference.
        signal: SignalRef,
        /// Value to deposit.
        value: Value,
    },
    /// Assert that a signal currently holds `value`.
    Expect {
        /// Signal reference.
        signal: SignalRef,
        /// Expected value.
        value: Value,
    },
}

impl Command {
    /// Lower-case command name, as used in traces and summaries.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Step { .. } => "step",
            Self::Load { .. } => "load",
            Self::Poke { .. } => "poke",
            Self::Force { .. } => "force",
            Self::Expect { .. } => "expect",
        }
    }

    /// The signal this command touches, if any.
    pub fn signal(&self) -> Option<SignalRef> {
        match self {
            Self::Step { .. } => None,
            Self::Load { signal, .. }
            | Self::Poke { signal, .. }
            | Self::Force { signal, .. }
            | Self::Expect { signal, .. } => Some(*signal),
        }
    }

    /// The element index of a LOAD, `None` for every other command.
    pub fn index(&self) -> Option<u64> {
        match self {
            Self::Load { index, .. } => *index,
            _ => None,
        }
    }

    /// The deposit mode for LOAD, POKE and FORCE commands.
    pub fn deposit_mode(&self) -> Option<DepositMode> {
        match self {
            Self::Load { .. } => Some(DepositMode::Load),
            Self::Poke { .. } => Some(DepositMode::Poke),
            Self::Force { .. } => Some(DepositMode::Force),
            Self::Step { .. } | Self::Expect { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poke() -> Command {
        Command::Poke {
            signal: SignalRef::new(1, 2),
            value: Value::from_u64(3),
        }
    }

    #[test]
    fn kind_names() {
        assert_eq!(Command::Step { count: 1 }.kind_name(), "step");
        assert_eq!(poke().kind_name(), "poke");
    }

    #[test]
    fn step_has_no_signal() {
        let step = Command::Step { count: 4 };
        assert_eq!(step.signal(), None);
        assert_eq!(step.deposit_mode(), None);
    }

    #[test]
    fn deposit_modes() {
        assert_eq!(poke().deposit_mode(), Some(DepositMode::Poke));
        let load = Command::Load {
            signal: SignalRef::new(0, 0),
            value: Value::zero(),
            index: Some(3),
        };
        assert_eq!(load.deposit_mode(), Some(DepositMode::Load));
        assert_eq!(load.index(), Some(3));
        let expect = Command::Expect {
            signal: SignalRef::new(0, 0),
            value: Value::zero(),
        };
        assert_eq!(expect.deposit_mode(), None);
        assert_eq!(expect.signal(), Some(SignalRef::new(0, 0)));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(poke()).unwrap();
        assert_eq!(json["kind"], "poke");
        assert_eq!(json["signal"]["group"], 1);
        assert_eq!(json["value"], "3");
    }
}
