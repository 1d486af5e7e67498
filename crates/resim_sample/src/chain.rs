//! Chain table: per-group ordered lists of signal names.

use serde::Serialize;

use crate::command::SignalRef;

/// Ordered signal names, one list per group, built from SIGNALS records.
///
/// A command's `(group, id)` pair is a position in this table. Groups are
/// created on demand; declaring a signal in group 3 of an empty table makes
/// groups 0 to 2 exist as empty lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChainTable {
    groups: Vec<Vec<String>>,
}

impl ChainTable {
    /// Highest group count a table may grow to. Group indices at or above
    /// this are rejected by [`push`](Self::push).
    pub const MAX_GROUPS: usize = 1 << 16;

    /// Creates an empty chain table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name` to chain `group`, growing the table as needed.
    ///
    /// Returns `false`, leaving the table untouched, if `group` is not below
    /// [`MAX_GROUPS`](Self::MAX_GROUPS).
    pub fn push(&mut self, group: usize, name: impl Into<String>) -> bool {
        if group >= Self::MAX_GROUPS {
            return false;
        }
        if self.groups.len() <= group {
            self.groups.resize_with(group + 1, Vec::new);
        }
        self.groups[group].push(name.into());
        true
    }

    /// Number of groups, including empty ones below the highest declared group.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// The names of one group.
    pub fn group(&self, group: usize) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Iterates over `(group, names)` pairs.
    pub fn groups(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.groups.iter().map(Vec::as_slice).enumerate()
    }

    /// Returns true if no signal has been declared.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    /// Resolves a reference to its base signal name.
    pub fn resolve(&self, signal: SignalRef) -> Option<&str> {
        self.groups
            .get(signal.group)?
            .get(signal.id)
            .map(String::as_str)
    }

    /// Resolves a reference to the full signal name, `name[index]` when an
    /// element index is given.
    pub fn signal_name(&self, signal: SignalRef, index: Option<u64>) -> Option<String> {
        let base = self.resolve(signal)?;
        Some(match index {
            Some(i) => format!("{base}[{i}]"),
            None => base.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_grows_groups() {
        let mut t = ChainTable::new();
        assert!(t.is_empty());
        t.push(2, "mem");
        assert_eq!(t.group_count(), 3);
        assert_eq!(t.group(0), Some(&[][..]));
        assert_eq!(t.group(2).unwrap(), ["mem".to_string()]);
        assert!(!t.is_empty());
    }

    #[test]
    fn growth_preserves_existing_groups() {
        let mut t = ChainTable::new();
        t.push(0, "reset");
        t.push(0, "io_in");
        t.push(4, "regfile");
        t.push(1, "clk");
        assert_eq!(t.resolve(SignalRef::new(0, 0)), Some("reset"));
        assert_eq!(t.resolve(SignalRef::new(0, 1)), Some("io_in"));
        assert_eq!(t.resolve(SignalRef::new(1, 0)), Some("clk"));
        assert_eq!(t.resolve(SignalRef::new(4, 0)), Some("regfile"));
    }

    #[test]
    fn resolve_out_of_range() {
        let mut t = ChainTable::new();
        t.push(0, "a");
        assert_eq!(t.resolve(SignalRef::new(0, 1)), None);
        assert_eq!(t.resolve(SignalRef::new(1, 0)), None);
    }

    #[test]
    fn indexed_signal_name() {
        let mut t = ChainTable::new();
        t.push(0, "mem");
        assert_eq!(
            t.signal_name(SignalRef::new(0, 0), Some(12)).as_deref(),
            Some("mem[12]")
        );
        assert_eq!(
            t.signal_name(SignalRef::new(0, 0), None).as_deref(),
            Some("mem")
        );
    }

    #[test]
    fn push_rejects_groups_past_limit() {
        let mut t = ChainTable::new();
        assert!(!t.push(ChainTable::MAX_GROUPS, "far"));
        assert!(!t.push(usize::MAX, "farther"));
        assert_eq!(t.group_count(), 0);
        assert!(t.push(ChainTable::MAX_GROUPS - 1, "last"));
        assert_eq!(t.group_count(), ChainTable::MAX_GROUPS);
    }

    #[test]
    fn groups_iterates_in_order() {
        let mut t = ChainTable::new();
        t.push(1, "b");
        t.push(0, "a");
        let collected: Vec<_> = t.groups().map(|(g, names)| (g, names.len())).collect();
        assert_eq!(collected, [(0, 1), (1, 1)]);
    }
}
