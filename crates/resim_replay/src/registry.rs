//! Signal registry: fully qualified signal names to target handles.

use std::collections::HashMap;

use log::warn;

use crate::error::ReplayError;
use crate::target::{SignalHandle, SimTarget};

/// Maps signal names to [`SignalHandle`]s of one simulation target.
///
/// Built once from the target's signal enumeration before replay starts and
/// read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct SignalRegistry {
    handles: HashMap<String, SignalHandle>,
}

impl SignalRegistry {
    /// Builds a registry from the target's signal enumeration.
    pub fn from_target<T: SimTarget + ?Sized>(target: &T) -> Self {
        Self::from_names(target.signal_names())
    }

    /// Builds a registry where the `i`-th name gets handle `i`.
    ///
    /// If a name appears more than once, its first handle is kept.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut handles = HashMap::new();
        for (idx, name) in names.into_iter().enumerate() {
            let name = name.into();
            let handle = SignalHandle::from_raw(idx as u32);
            if handles.contains_key(&name) {
                warn!("signal '{name}' enumerated twice, keeping its first handle");
                continue;
            }
            handles.insert(name, handle);
        }
        Self { handles }
    }

    /// Looks up a signal, failing with [`ReplayError::UnknownSignal`].
    pub fn lookup(&self, name: &str) -> Result<SignalHandle, ReplayError> {
        self.get(name).ok_or_else(|| ReplayError::UnknownSignal {
            name: name.to_string(),
        })
    }

    /// Looks up a signal.
    pub fn get(&self, name: &str) -> Option<SignalHandle> {
        self.handles.get(name).copied()
    }

    /// Returns true if the signal is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handles.contains_key(name)
    }

    /// Number of registered signals.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if no signal is registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_follow_enumeration_order() {
        let reg = SignalRegistry::from_names(["reset", "clk", "mem[0]"]);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.get("reset"), Some(SignalHandle::from_raw(0)));
        assert_eq!(reg.get("mem[0]"), Some(SignalHandle::from_raw(2)));
    }

    #[test]
    fn lookup_unknown_is_typed_error() {
        let reg = SignalRegistry::from_names(["reset"]);
        let err = reg.lookup("io_out").unwrap_err();
        assert!(matches!(err, ReplayError::UnknownSignal { ref name } if name == "io_out"));
    }

    #[test]
    fn duplicate_keeps_first() {
        let reg = SignalRegistry::from_names(["a", "b", "a"]);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("a"), Some(SignalHandle::from_raw(0)));
    }

    #[test]
    fn empty_registry() {
        let reg = SignalRegistry::default();
        assert!(reg.is_empty());
        assert!(!reg.contains("reset"));
    }
}
