//! Snapshots and the fully parsed sample.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::chain::ChainTable;
use crate::command::Command;

/// The commands recorded under one CYCLE record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Cycle number from the CYCLE record. Informational only; snapshots are
    /// replayed in log order.
    pub cycle: u64,
    /// Commands in log order.
    pub commands: Vec<Command>,
}

impl Snapshot {
    /// Creates an empty snapshot labelled with `cycle`.
    pub fn new(cycle: u64) -> Self {
        Self {
            cycle,
            commands: Vec::new(),
        }
    }
}

/// Counters collected while parsing a sample log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Non-blank lines read.
    pub records: usize,
    /// Lines with an unknown or non-numeric record code.
    pub ignored: usize,
    /// EXPECT records dropped because too few steps had elapsed since their CYCLE.
    pub suppressed_expects: usize,
    /// Fields that degraded to zero, or records dropped, in lenient mode.
    pub degraded: usize,
}

/// A parsed sample log: the chain table plus the snapshots in log order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub(crate) chains: ChainTable,
    pub(crate) snapshots: Vec<Snapshot>,
    pub(crate) stats: ParseStats,
}

impl Sample {
    /// Assembles a sample from parts.
    pub fn new(chains: ChainTable, snapshots: Vec<Snapshot>) -> Self {
        Self {
            chains,
            snapshots,
            stats: ParseStats::default(),
        }
    }

    /// The chain table declared by SIGNALS records.
    pub fn chains(&self) -> &ChainTable {
        &self.chains
    }

    /// Snapshots in log order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Parse counters.
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Total number of commands across all snapshots.
    pub fn command_count(&self) -> usize {
        self.snapshots.iter().map(|s| s.commands.len()).sum()
    }

    /// Every signal name a command resolves to, sorted and de-duplicated.
    ///
    /// Indexed LOADs contribute `name[index]`. References outside the chain
    /// table are skipped.
    pub fn referenced_signals(&self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .snapshots
            .iter()
            .flat_map(|s| s.commands.iter())
            .filter_map(|cmd| {
                let signal = cmd.signal()?;
                self.chains.signal_name(signal, cmd.index())
            })
            .collect();
        names.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::SignalRef;
    use resim_common::Value;

    #[test]
    fn referenced_signals_sorted_and_unique() {
        let mut chains = ChainTable::new();
        chains.push(0, "reset");
        chains.push(0, "io_a");
        chains.push(1, "mem");
        let mut snap = Snapshot::new(10);
        snap.commands = vec![
            Command::Poke {
                signal: SignalRef::new(0, 1),
                value: Value::from_u64(1),
            },
            Command::Step { count: 2 },
            Command::Load {
                signal: SignalRef::new(1, 0),
                value: Value::from_u64(7),
                index: Some(3),
            },
            Command::Expect {
                signal: SignalRef::new(0, 1),
                value: Value::from_u64(1),
            },
            Command::Expect {
                signal: SignalRef::new(5, 0),
                value: Value::zero(),
            },
        ];
        let sample = Sample::new(chains, vec![snap]);
        assert_eq!(sample.referenced_signals(), ["io_a", "mem[3]"]);
        assert_eq!(sample.command_count(), 5);
    }

    #[test]
    fn empty_sample() {
        let sample = Sample::default();
        assert!(sample.snapshots().is_empty());
        assert!(sample.referenced_signals().is_empty());
        assert_eq!(sample.stats(), &ParseStats::default());
    }
}
