//! Record-type codes of the sample log format.

use resim_config::RecordCodes;

/// The type of a sample log record, selected by the line's leading code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// `SIGNALS group name`: appends `name` to chain `group`.
    Signals,
    /// `CYCLE label cycle`: opens a new snapshot.
    Cycle,
    /// `LOAD group id value index`: state load, `index < 0` for the whole signal.
    Load,
    /// `FORCE group id value`
    Force,
    /// `POKE group id value`
    Poke,
    /// `STEP n`
    Step,
    /// `EXPECT group id value`
    Expect,
}

impl RecordKind {
    /// Maps a record code to its kind using the configured code table.
    ///
    /// Returns `None` for codes the table does not assign.
    pub fn from_code(code: u32, codes: &RecordCodes) -> Option<Self> {
        let kind = if code == codes.signals {
            Self::Signals
        } else if code == codes.cycle {
            Self::Cycle
        } else if code == codes.load {
            Self::Load
        } else if code == codes.force {
            Self::Force
        } else if code == codes.poke {
            Self::Poke
        } else if code == codes.step {
            Self::Step
        } else if code == codes.expect {
            Self::Expect
        } else {
            return None;
        };
        Some(kind)
    }

    /// Upper-case record name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Signals => "SIGNALS",
            Self::Cycle => "CYCLE",
            Self::Load => "LOAD",
            Self::Force => "FORCE",
            Self::Poke => "POKE",
            Self::Step => "STEP",
            Self::Expect => "EXPECT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_codes() {
        let codes = RecordCodes::default();
        assert_eq!(RecordKind::from_code(0, &codes), Some(RecordKind::Signals));
        assert_eq!(RecordKind::from_code(1, &codes), Some(RecordKind::Cycle));
        assert_eq!(RecordKind::from_code(2, &codes), Some(RecordKind::Load));
        assert_eq!(RecordKind::from_code(3, &codes), Some(RecordKind::Poke));
        assert_eq!(RecordKind::from_code(4, &codes), Some(RecordKind::Step));
        assert_eq!(RecordKind::from_code(5, &codes), Some(RecordKind::Expect));
        assert_eq!(RecordKind::from_code(6, &codes), Some(RecordKind::Force));
        assert_eq!(RecordKind::from_code(7, &codes), None);
    }

    #[test]
    fn remapped_codes() {
        let codes = RecordCodes {
            force: 3,
            poke: 4,
            step: 5,
            expect: 6,
            ..RecordCodes::default()
        };
        assert_eq!(RecordKind::from_code(3, &codes), Some(RecordKind::Force));
        assert_eq!(RecordKind::from_code(6, &codes), Some(RecordKind::Expect));
    }

    #[test]
    fn names() {
        assert_eq!(RecordKind::Signals.name(), "SIGNALS");
        assert_eq!(RecordKind::Expect.name(), "EXPECT");
    }
}
