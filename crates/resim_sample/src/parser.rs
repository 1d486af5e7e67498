//! Sample log parser.
//!
//! Reads the log once, line by line. SIGNALS records populate the chain
//! table; a CYCLE record opens a new snapshot and every following command
//! record lands in it until the next CYCLE. EXPECT records are kept only once
//! more than `min_expect_steps` cycles have been stepped since the snapshot
//! opened, because values sampled right after reset are not meaningful yet.
//!
//! Numeric fields are validated according to [`ParseMode`]: strict parsing
//! reports the first bad field as a [`SampleError`], lenient parsing
//! substitutes zero and logs a warning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use flate2::read::GzDecoder;
use log::{debug, warn};
use resim_common::Value;
use resim_config::{ParseMode, ResimConfig};

use crate::chain::ChainTable;
use crate::command::{Command, SignalRef};
use crate::error::SampleError;
use crate::record::RecordKind;
use crate::snapshot::{ParseStats, Sample, Snapshot};

/// Opens and parses a sample log file.
///
/// Files ending in `.gz` are decompressed on the fly. The file is closed
/// before this function returns.
pub fn load_sample(path: &Path, config: &ResimConfig) -> Result<Sample, SampleError> {
    let file = File::open(path).map_err(|source| SampleError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let gzipped = path.extension().is_some_and(|ext| ext == "gz");
    let sample = if gzipped {
        parse_sample_reader(BufReader::new(GzDecoder::new(file)), config)?
    } else {
        parse_sample_reader(BufReader::new(file), config)?
    };
    debug!(
        "parsed {}: {} snapshot(s), {} command(s)",
        path.display(),
        sample.snapshots().len(),
        sample.command_count()
    );
    Ok(sample)
}

/// Parses a sample log from any buffered reader.
pub fn parse_sample_reader<R: BufRead>(
    reader: R,
    config: &ResimConfig,
) -> Result<Sample, SampleError> {
    let mut parser = SampleParser::new(config);
    for (idx, line) in reader.lines().enumerate() {
        parser.feed_line(idx + 1, &line?)?;
    }
    Ok(parser.finish())
}

/// Parses a sample log held in memory.
pub fn parse_sample_str(text: &str, config: &ResimConfig) -> Result<Sample, SampleError> {
    parse_sample_reader(text.as_bytes(), config)
}

/// Incremental parser state.
struct SampleParser<'c> {
    config: &'c ResimConfig,
    chains: ChainTable,
    snapshots: Vec<Snapshot>,
    stats: ParseStats,
    /// Cycles stepped since the last CYCLE record.
    steps: u64,
}

impl<'c> SampleParser<'c> {
    fn new(config: &'c ResimConfig) -> Self {
        Self {
            config,
            chains: ChainTable::new(),
            snapshots: Vec::new(),
            stats: ParseStats::default(),
            steps: 0,
        }
    }

    fn feed_line(&mut self, line: usize, text: &str) -> Result<(), SampleError> {
        let mut tokens = text.split_whitespace();
        let Some(code_token) = tokens.next() else {
            return Ok(());
        };
        self.stats.records += 1;

        let kind = code_token
            .parse::<u32>()
            .ok()
            .and_then(|code| RecordKind::from_code(code, &self.config.records));
        let Some(kind) = kind else {
            self.stats.ignored += 1;
            return Ok(());
        };

        let mut fields = Fields {
            tokens,
            line,
            record: kind.name(),
            mode: self.config.parser.mode,
            degraded: 0,
        };
        let result = self.apply(kind, &mut fields);
        self.stats.degraded += fields.degraded;
        result
    }

    fn apply(&mut self, kind: RecordKind, fields: &mut Fields<'_>) -> Result<(), SampleError> {
        match kind {
            RecordKind::Signals => {
                let group: usize = fields.number("group")?;
                if let Some(name) = fields.token("name")? {
                    if !self.chains.push(group, name) {
                        fields.out_of_range_group(group)?;
                    }
                }
            }
            RecordKind::Cycle => {
                fields.token("label")?;
                let cycle: u64 = fields.number("cycle")?;
                self.snapshots.push(Snapshot::new(cycle));
                self.steps = 0;
            }
            RecordKind::Step => {
                let count: u64 = fields.number("count")?;
                if self.push_command(fields, Command::Step { count })? {
                    self.steps = self.steps.saturating_add(count);
                }
            }
            RecordKind::Load => {
                let signal = fields.signal_ref()?;
                let value = fields.value()?;
                let index: i64 = fields.number("index")?;
                let index = u64::try_from(index).ok();
                self.push_command(
                    fields,
                    Command::Load {
                        signal,
                        value,
                        index,
                    },
                )?;
            }
            RecordKind::Poke => {
                let signal = fields.signal_ref()?;
                let value = fields.value()?;
                self.push_command(fields, Command::Poke { signal, value })?;
            }
            RecordKind::Force => {
                let signal = fields.signal_ref()?;
                let value = fields.value()?;
                self.push_command(fields, Command::Force { signal, value })?;
            }
            RecordKind::Expect => {
                let signal = fields.signal_ref()?;
                let value = fields.value()?;
                if self.steps > self.config.parser.min_expect_steps {
                    self.push_command(fields, Command::Expect { signal, value })?;
                } else {
                    self.stats.suppressed_expects += 1;
                }
            }
        }
        Ok(())
    }

    /// Appends a command to the open snapshot.
    ///
    /// Returns `false` if there is no open snapshot and lenient mode dropped
    /// the command.
    fn push_command(&mut self, fields: &mut Fields<'_>, cmd: Command) -> Result<bool, SampleError> {
        match self.snapshots.last_mut() {
            Some(snapshot) => {
                snapshot.commands.push(cmd);
                Ok(true)
            }
            None => match fields.mode {
                ParseMode::Strict => Err(SampleError::CommandOutsideSnapshot {
                    line: fields.line,
                    record: fields.record,
                }),
                ParseMode::Lenient => {
                    warn!(
                        "line {}: dropping {} record before the first CYCLE record",
                        fields.line, fields.record
                    );
                    fields.degraded += 1;
                    Ok(false)
                }
            },
        }
    }

    fn finish(self) -> Sample {
        Sample {
            chains: self.chains,
            snapshots: self.snapshots,
            stats: self.stats,
        }
    }
}

/// The remaining tokens of one record, with mode-aware field extraction.
struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
    line: usize,
    record: &'static str,
    mode: ParseMode,
    degraded: usize,
}

impl<'a> Fields<'a> {
    /// Next raw token. Missing tokens are an error in strict mode and `None`
    /// in lenient mode.
    fn token(&mut self, field: &'static str) -> Result<Option<&'a str>, SampleError> {
        match self.tokens.next() {
            Some(tok) => Ok(Some(tok)),
            None => match self.mode {
                ParseMode::Strict => Err(SampleError::MissingField {
                    line: self.line,
                    record: self.record,
                    field,
                }),
                ParseMode::Lenient => {
                    warn!(
                        "line {}: {} record is missing its {field} field",
                        self.line, self.record
                    );
                    self.degraded += 1;
                    Ok(None)
                }
            },
        }
    }

    fn number<T: FromStr + Default>(&mut self, field: &'static str) -> Result<T, SampleError> {
        let Some(tok) = self.token(field)? else {
            return Ok(T::default());
        };
        self.parsed(field, tok, tok.parse().ok(), T::default())
    }

    fn value(&mut self) -> Result<Value, SampleError> {
        let Some(tok) = self.token("value")? else {
            return Ok(Value::zero());
        };
        self.parsed("value", tok, Value::from_hex_str(tok).ok(), Value::zero())
    }

    fn signal_ref(&mut self) -> Result<SignalRef, SampleError> {
        let group = self.number("group")?;
        let id = self.number("id")?;
        Ok(SignalRef::new(group, id))
    }

    fn out_of_range_group(&mut self, group: usize) -> Result<(), SampleError> {
        match self.mode {
            ParseMode::Strict => Err(SampleError::GroupOutOfRange {
                line: self.line,
                group,
                limit: ChainTable::MAX_GROUPS,
            }),
            ParseMode::Lenient => {
                warn!(
                    "line {}: skipping SIGNALS record for group {group} (limit {})",
                    self.line,
                    ChainTable::MAX_GROUPS
                );
                self.degraded += 1;
                Ok(())
            }
        }
    }

    fn parsed<T>(
        &mut self,
        field: &'static str,
        tok: &str,
        parsed: Option<T>,
        fallback: T,
    ) -> Result<T, SampleError> {
        if let Some(v) = parsed {
            return Ok(v);
        }
        match self.mode {
            ParseMode::Strict => Err(SampleError::Malformed {
                line: self.line,
                record: self.record,
                field,
                token: tok.to_string(),
            }),
            ParseMode::Lenient => {
                warn!(
                    "line {}: malformed {field} '{tok}' in {} record, using default",
                    self.line, self.record
                );
                self.degraded += 1;
                Ok(fallback)
            }
        }
    }
}
