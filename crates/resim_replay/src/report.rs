//! Run report: the verdict of a replay plus its failing expectations.

use resim_common::Value;
use serde::Serialize;

/// An expectation that did not hold outside the grace window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExpectFailure {
    /// Cycle label of the snapshot the expectation belongs to.
    pub snapshot_cycle: u64,
    /// Resolved signal name.
    pub signal: String,
    /// Value read from the target.
    pub observed: Value,
    /// Value recorded in the sample.
    pub expected: Value,
    /// Total stepped cycles when the expectation was evaluated.
    pub total_cycles: u64,
}

/// Aggregate outcome of a replay run.
///
/// `passed` starts true and is only ever cleared.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Overall verdict.
    pub passed: bool,
    /// Cycles stepped by STEP commands. Reset sequences are not counted.
    pub total_cycles: u64,
    /// Snapshots replayed.
    pub snapshots: usize,
    /// Expectations evaluated.
    pub expects_evaluated: usize,
    /// Mismatching expectations that passed because of the grace window.
    pub expects_waived: usize,
    /// Failing expectations in evaluation order.
    pub failures: Vec<ExpectFailure>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self {
            passed: true,
            total_cycles: 0,
            snapshots: 0,
            expects_evaluated: 0,
            expects_waived: 0,
            failures: Vec::new(),
        }
    }
}

impl RunReport {
    /// The one-line summary printed at shutdown.
    pub fn summary(&self) -> String {
        format!(
            "[{}] Runs {} cycles",
            if self.passed { "PASS" } else { "FAIL" },
            self.total_cycles
        )
    }

    /// Process exit status for this verdict.
    pub fn exit_code(&self) -> i32 {
        if self.passed {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_passing() {
        let r = RunReport::default();
        assert!(r.passed);
        assert_eq!(r.exit_code(), 0);
        assert_eq!(r.summary(), "[PASS] Runs 0 cycles");
    }

    #[test]
    fn failing_summary() {
        let r = RunReport {
            passed: false,
            total_cycles: 42,
            ..RunReport::default()
        };
        assert_eq!(r.summary(), "[FAIL] Runs 42 cycles");
        assert_eq!(r.exit_code(), 1);
    }

    #[test]
    fn serializes_values_as_hex() {
        let r = RunReport {
            passed: false,
            total_cycles: 3,
            snapshots: 1,
            expects_evaluated: 1,
            expects_waived: 0,
            failures: vec![ExpectFailure {
                snapshot_cycle: 10,
                signal: "io_out".into(),
                observed: Value::from_u64(0x1),
                expected: Value::from_u64(0xff),
                total_cycles: 3,
            }],
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["passed"], false);
        assert_eq!(json["failures"][0]["observed"], "1");
        assert_eq!(json["failures"][0]["expected"], "ff");
    }
}
