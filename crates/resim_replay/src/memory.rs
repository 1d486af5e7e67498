//! An in-memory loopback simulation target.
//!
//! [`MemoryTarget`] holds one value per signal and returns the last deposited
//! value on read. It has no logic between inputs and outputs, so replaying a
//! sample against it checks the sample's own consistency: an EXPECT passes
//! when it matches what the sample last deposited into that signal.

use resim_common::Value;

use crate::error::ReplayError;
use crate::target::{DepositMode, SignalHandle, SimTarget};

/// One recorded deposit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deposit {
    /// Target signal.
    pub handle: SignalHandle,
    /// Deposited value.
    pub value: Value,
    /// Deposit semantics.
    pub mode: DepositMode,
}

/// A simulation target backed by a plain value table.
#[derive(Clone, Debug, Default)]
pub struct MemoryTarget {
    names: Vec<String>,
    values: Vec<Value>,
    cycles: u64,
    deposits: Vec<Deposit>,
}

impl MemoryTarget {
    /// Creates a target exposing the given signals, all initialized to zero.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let values = vec![Value::zero(); names.len()];
        Self {
            names,
            values,
            cycles: 0,
            deposits: Vec::new(),
        }
    }

    /// Current value of a signal by name.
    pub fn value(&self, name: &str) -> Option<&Value> {
        let idx = self.names.iter().position(|n| n == name)?;
        self.values.get(idx)
    }

    /// Overwrites a signal's value without recording a deposit.
    ///
    /// Returns false if the signal does not exist.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(idx) => {
                self.values[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Total cycles advanced, including reset sequences.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Every deposit received, in order.
    pub fn deposits(&self) -> &[Deposit] {
        &self.deposits
    }

    fn slot(&self, handle: SignalHandle) -> Result<usize, ReplayError> {
        let idx = handle.index();
        if idx < self.values.len() {
            Ok(idx)
        } else {
            Err(ReplayError::Target {
                reason: format!(
                    "handle {} out of range ({} signals)",
                    handle.as_raw(),
                    self.values.len()
                ),
            })
        }
    }
}

impl SimTarget for MemoryTarget {
    fn signal_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn advance(&mut self, cycles: u64) -> Result<(), ReplayError> {
        self.cycles = self.cycles.saturating_add(cycles);
        Ok(())
    }

    fn deposit(
        &mut self,
        handle: SignalHandle,
        value: &Value,
        mode: DepositMode,
    ) -> Result<(), ReplayError> {
        let idx = self.slot(handle)?;
        self.values[idx] = value.clone();
        self.deposits.push(Deposit {
            handle,
            value: value.clone(),
            mode,
        });
        Ok(())
    }

    fn read(&mut self, handle: SignalHandle) -> Result<Value, ReplayError> {
        let idx = self.slot(handle)?;
        Ok(self.values[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let mut t = MemoryTarget::new(["a", "b"]);
        assert_eq!(t.signal_names(), ["a", "b"]);
        assert_eq!(t.read(SignalHandle::from_raw(1)).unwrap(), Value::zero());
        assert_eq!(t.cycles(), 0);
    }

    #[test]
    fn deposit_then_read() {
        let mut t = MemoryTarget::new(["a"]);
        let h = SignalHandle::from_raw(0);
        t.deposit(h, &Value::from_u64(9), DepositMode::Force).unwrap();
        assert_eq!(t.read(h).unwrap(), Value::from_u64(9));
        assert_eq!(t.value("a"), Some(&Value::from_u64(9)));
        assert_eq!(t.deposits().len(), 1);
        assert_eq!(t.deposits()[0].mode, DepositMode::Force);
    }

    #[test]
    fn advance_accumulates() {
        let mut t = MemoryTarget::new(Vec::<String>::new());
        t.advance(5).unwrap();
        t.advance(2).unwrap();
        assert_eq!(t.cycles(), 7);
    }

    #[test]
    fn advance_saturates() {
        let mut t = MemoryTarget::new(Vec::<String>::new());
        t.advance(u64::MAX).unwrap();
        t.advance(3).unwrap();
        assert_eq!(t.cycles(), u64::MAX);
    }

    #[test]
    fn set_bypasses_deposit_log() {
        let mut t = MemoryTarget::new(["out"]);
        assert!(t.set("out", Value::from_u64(3)));
        assert!(!t.set("missing", Value::zero()));
        assert!(t.deposits().is_empty());
        assert_eq!(t.value("out"), Some(&Value::from_u64(3)));
    }

    #[test]
    fn out_of_range_handle_errors() {
        let mut t = MemoryTarget::new(["a"]);
        let err = t.read(SignalHandle::from_raw(4)).unwrap_err();
        assert!(matches!(err, ReplayError::Target { .. }));
        let err = t
            .deposit(SignalHandle::from_raw(4), &Value::zero(), DepositMode::Poke)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
