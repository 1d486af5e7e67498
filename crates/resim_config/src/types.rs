//! Configuration types deserialized from `resim.toml`.

use serde::Deserialize;

/// The top-level replay configuration parsed from `resim.toml`.
///
/// Every section is optional; an empty file yields [`ResimConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResimConfig {
    /// Reset sequencing and expectation grace settings.
    #[serde(default)]
    pub replay: ReplayConfig,
    /// Sample log parser settings.
    #[serde(default)]
    pub parser: ParserConfig,
    /// Record-type codes used by the sample log.
    #[serde(default)]
    pub records: RecordCodes,
}

/// Settings for the replay engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// Name of the reset signal asserted before every snapshot.
    pub reset_signal: String,
    /// Cycles advanced after asserting reset.
    pub reset_cycles: u64,
    /// An expectation passes unconditionally while the total cycle count is
    /// at most this value.
    pub grace_cycles: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            reset_signal: "reset".to_string(),
            reset_cycles: 5,
            grace_cycles: 1,
        }
    }
}

/// How the parser treats malformed numeric fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Malformed or missing fields are reported as errors.
    #[default]
    Strict,
    /// Malformed or missing fields degrade to zero with a warning.
    Lenient,
}

/// Settings for the sample log parser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Strict or lenient numeric field handling.
    pub mode: ParseMode,
    /// EXPECT records are dropped while the steps accumulated since the
    /// last CYCLE record are at most this value.
    pub min_expect_steps: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::Strict,
            min_expect_steps: 1,
        }
    }
}

/// The integer code that introduces each record type in a sample log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordCodes {
    /// `SIGNALS group name`
    pub signals: u32,
    /// `CYCLE label cycle`
    pub cycle: u32,
    /// `LOAD group id value index`
    pub load: u32,
    /// `POKE group id value`
    pub poke: u32,
    /// `STEP n`
    pub step: u32,
    /// `EXPECT group id value`
    pub expect: u32,
    /// `FORCE group id value`
    pub force: u32,
}

impl Default for RecordCodes {
    fn default() -> Self {
        Self {
            signals: 0,
            cycle: 1,
            load: 2,
            poke: 3,
            step: 4,
            expect: 5,
            force: 6,
        }
    }
}

impl RecordCodes {
    /// Returns every `(record name, code)` pair in a fixed order.
    pub fn entries(&self) -> [(&'static str, u32); 7] {
        [
            ("signals", self.signals),
            ("cycle", self.cycle),
            ("load", self.load),
            ("poke", self.poke),
            ("step", self.step),
            ("expect", self.expect),
            ("force", self.force),
        ]
    }
}
