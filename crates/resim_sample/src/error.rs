//! Errors raised while reading a sample log.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while opening or parsing a sample log.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// The sample file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading from an already opened sample failed.
    #[error("I/O error while reading sample: {0}")]
    Io(#[from] io::Error),

    /// A field could not be parsed as the expected number.
    #[error("line {line}: malformed {field} in {record} record: '{token}'")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Record type name.
        record: &'static str,
        /// Field name.
        field: &'static str,
        /// The offending token.
        token: String,
    },

    /// A record ended before one of its fields.
    #[error("line {line}: {record} record is missing its {field} field")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Record type name.
        record: &'static str,
        /// Field name.
        field: &'static str,
    },

    /// A SIGNALS record named a group past the chain table's limit.
    #[error("line {line}: SIGNALS group {group} exceeds the limit of {limit} groups")]
    GroupOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The requested group index.
        group: usize,
        /// Number of groups a chain table may hold.
        limit: usize,
    },

    /// A command record appeared before any CYCLE record opened a snapshot.
    #[error("line {line}: {record} record appears before the first CYCLE record")]
    CommandOutsideSnapshot {
        /// 1-based line number.
        line: usize,
        /// Record type name.
        record: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_display_names_path() {
        let e = SampleError::Open {
            path: PathBuf::from("/tmp/missing.sample"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            e.to_string(),
            "cannot open /tmp/missing.sample: no such file"
        );
    }

    #[test]
    fn group_out_of_range_display() {
        let e = SampleError::GroupOutOfRange {
            line: 3,
            group: 70000,
            limit: 65536,
        };
        assert_eq!(
            e.to_string(),
            "line 3: SIGNALS group 70000 exceeds the limit of 65536 groups"
        );
    }

    #[test]
    fn malformed_display() {
        let e = SampleError::Malformed {
            line: 7,
            record: "POKE",
            field: "value",
            token: "0xzz".into(),
        };
        assert_eq!(e.to_string(), "line 7: malformed value in POKE record: '0xzz'");
    }

    #[test]
    fn missing_field_display() {
        let e = SampleError::MissingField {
            line: 2,
            record: "LOAD",
            field: "index",
        };
        assert_eq!(e.to_string(), "line 2: LOAD record is missing its index field");
    }

    #[test]
    fn outside_snapshot_display() {
        let e = SampleError::CommandOutsideSnapshot {
            line: 1,
            record: "STEP",
        };
        assert_eq!(
            e.to_string(),
            "line 1: STEP record appears before the first CYCLE record"
        );
    }
}
