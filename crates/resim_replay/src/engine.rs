//! Replay engine: drives a simulation target through a parsed sample.
//!
//! The engine moves through `Init → (Reset → Executing)* → Done`. A global
//! reset runs first; then every snapshot, in log order, gets its own reset
//! followed by its commands. Resetting asserts the reset signal and advances
//! the configured number of cycles; it never de-asserts reset explicitly.
//!
//! Expectation mismatches do not stop the run. The verdict starts as pass and
//! is cleared by the first failing expectation; later successes never restore
//! it. An expectation evaluated while the stepped-cycle total is within the
//! grace window passes whatever the observed value.
//!
//! Unresolvable signal references are returned as [`ReplayError`]s and end
//! the run; the caller decides whether that is fatal.

use std::mem;

use log::{debug, info};
use resim_common::{InternalError, Value};
use resim_config::ReplayConfig;
use resim_sample::{ChainTable, Command, Sample, SignalRef};

use crate::error::ReplayError;
use crate::registry::SignalRegistry;
use crate::report::{ExpectFailure, RunReport};
use crate::target::{DepositMode, SignalHandle, SimTarget};

/// Where the engine is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, nothing sent to the target yet.
    Init,
    /// Asserting reset before the snapshot with this position.
    Reset {
        /// Snapshot position in log order.
        snapshot: usize,
    },
    /// Executing the commands of the snapshot with this position.
    Executing {
        /// Snapshot position in log order.
        snapshot: usize,
    },
    /// Every snapshot has been replayed.
    Done,
}

/// Replays a [`Sample`] against a [`SimTarget`].
pub struct ReplayEngine {
    sample: Sample,
    registry: SignalRegistry,
    config: ReplayConfig,
    reset: SignalHandle,
    state: EngineState,
    report: RunReport,
}

impl ReplayEngine {
    /// Creates an engine for `sample` using handles from `registry`.
    ///
    /// Fails with [`ReplayError::MissingResetSignal`] if the configured reset
    /// signal is not registered.
    pub fn new(
        sample: Sample,
        registry: SignalRegistry,
        config: &ReplayConfig,
    ) -> Result<Self, ReplayError> {
        let reset =
            registry
                .get(&config.reset_signal)
                .ok_or_else(|| ReplayError::MissingResetSignal {
                    name: config.reset_signal.clone(),
                })?;
        Ok(Self {
            sample,
            registry,
            config: config.clone(),
            reset,
            state: EngineState::Init,
            report: RunReport::default(),
        })
    }

    /// Replays every snapshot once, in log order.
    ///
    /// Returns the final report. Calling this again after the run completed
    /// is an internal error.
    pub fn replay<T: SimTarget + ?Sized>(
        &mut self,
        target: &mut T,
    ) -> Result<&RunReport, ReplayError> {
        if self.state != EngineState::Init {
            return Err(InternalError::new(format!(
                "replay started from state {:?}",
                self.state
            ))
            .into());
        }

        self.reset(target)?;

        // The sample is moved out for the duration of the run so commands can
        // be borrowed while the engine's counters are updated.
        let sample = mem::take(&mut self.sample);
        let result = self.replay_snapshots(&sample, target);
        self.sample = sample;
        result?;

        self.state = EngineState::Done;
        Ok(&self.report)
    }

    fn replay_snapshots<T: SimTarget + ?Sized>(
        &mut self,
        sample: &Sample,
        target: &mut T,
    ) -> Result<(), ReplayError> {
        for (pos, snapshot) in sample.snapshots().iter().enumerate() {
            info!("{}", snapshot_marker(snapshot.cycle));
            self.state = EngineState::Reset { snapshot: pos };
            self.reset(target)?;

            self.state = EngineState::Executing { snapshot: pos };
            for cmd in &snapshot.commands {
                self.execute(sample.chains(), snapshot.cycle, cmd, target)?;
            }
            self.report.snapshots += 1;
        }
        Ok(())
    }

    fn execute<T: SimTarget + ?Sized>(
        &mut self,
        chains: &ChainTable,
        snapshot_cycle: u64,
        cmd: &Command,
        target: &mut T,
    ) -> Result<(), ReplayError> {
        match cmd {
            Command::Step { count } => self.step(*count, target),
            Command::Load {
                signal,
                value,
                index,
            } => self.deposit(chains, *signal, *index, value, DepositMode::Load, target),
            Command::Poke { signal, value } => {
                self.deposit(chains, *signal, None, value, DepositMode::Poke, target)
            }
            Command::Force { signal, value } => {
                self.deposit(chains, *signal, None, value, DepositMode::Force, target)
            }
            Command::Expect { signal, value } => {
                let ok = self.expect(chains, snapshot_cycle, *signal, value, target)?;
                self.report.passed &= ok;
                Ok(())
            }
        }
    }

    /// Asserts reset and advances the configured number of cycles.
    fn reset<T: SimTarget + ?Sized>(&mut self, target: &mut T) -> Result<(), ReplayError> {
        target.deposit(self.reset, &Value::from_u64(1), DepositMode::Poke)?;
        target.advance(self.config.reset_cycles)
    }

    fn step<T: SimTarget + ?Sized>(&mut self, count: u64, target: &mut T) -> Result<(), ReplayError> {
        self.report.total_cycles = self.report.total_cycles.saturating_add(count);
        debug!("{}", step_trace(count, self.report.total_cycles));
        target.advance(count)
    }

    fn deposit<T: SimTarget + ?Sized>(
        &mut self,
        chains: &ChainTable,
        signal: SignalRef,
        index: Option<u64>,
        value: &Value,
        mode: DepositMode,
        target: &mut T,
    ) -> Result<(), ReplayError> {
        let (name, handle) = self.resolve(chains, signal, index)?;
        debug!("{}", deposit_trace(mode, &name, value));
        target.deposit(handle, value, mode)
    }

    fn expect<T: SimTarget + ?Sized>(
        &mut self,
        chains: &ChainTable,
        snapshot_cycle: u64,
        signal: SignalRef,
        expected: &Value,
        target: &mut T,
    ) -> Result<bool, ReplayError> {
        let (name, handle) = self.resolve(chains, signal, None)?;
        let observed = target.read(handle)?;
        let total = self.report.total_cycles;
        let matches = observed == *expected;
        let ok = matches || total <= self.config.grace_cycles;
        debug!("{}", expect_trace(&name, &observed, expected, ok));

        self.report.expects_evaluated += 1;
        if !matches && ok {
            self.report.expects_waived += 1;
        }
        if !ok {
            self.report.failures.push(ExpectFailure {
                snapshot_cycle,
                signal: name,
                observed,
                expected: expected.clone(),
                total_cycles: total,
            });
        }
        Ok(ok)
    }

    /// Resolves a chain reference to its signal name and target handle.
    fn resolve(
        &self,
        chains: &ChainTable,
        signal: SignalRef,
        index: Option<u64>,
    ) -> Result<(String, SignalHandle), ReplayError> {
        let name = chains
            .signal_name(signal, index)
            .ok_or(ReplayError::UnknownChain {
                group: signal.group,
                id: signal.id,
            })?;
        let handle = self.registry.lookup(&name)?;
        Ok((name, handle))
    }

    /// The engine's lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns true once every snapshot has been replayed.
    pub fn is_done(&self) -> bool {
        self.state == EngineState::Done
    }

    /// The verdict so far.
    pub fn passed(&self) -> bool {
        self.report.passed
    }

    /// Cycles stepped so far.
    pub fn total_cycles(&self) -> u64 {
        self.report.total_cycles
    }

    /// The report accumulated so far.
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// The sample being replayed.
    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    /// The registry used to resolve signal names.
    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// Process exit status for the verdict: 0 on pass, 1 on failure.
    pub fn exit_code(&self) -> i32 {
        self.report.exit_code()
    }

    /// Consumes the engine, returning the summary line and the report.
    pub fn finish(self) -> (String, RunReport) {
        (self.report.summary(), self.report)
    }
}

fn snapshot_marker(cycle: u64) -> String {
    format!(" * REPLAY AT CYCLE {cycle} * ")
}

fn step_trace(count: u64, total: u64) -> String {
    format!(" * STEP {count} -> {total} *")
}

fn deposit_trace(mode: DepositMode, name: &str, value: &Value) -> String {
    let label = match mode {
        DepositMode::Poke => "POKE",
        DepositMode::Load => "LOAD",
        DepositMode::Force => "FORCE",
    };
    format!(" * {label} {name} <- {value:#x} *")
}

fn expect_trace(name: &str, observed: &Value, expected: &Value, ok: bool) -> String {
    format!(
        " * EXPECT {name} -> {observed:#x} ?= {expected:#x} : {} *",
        if ok { "PASS" } else { "FAIL" }
    )
}

/// Builds a registry from `target`, replays `sample` and returns the report.
pub fn replay_sample<T: SimTarget + ?Sized>(
    sample: Sample,
    target: &mut T,
    config: &ReplayConfig,
) -> Result<RunReport, ReplayError> {
    let registry = SignalRegistry::from_target(target);
    let mut engine = ReplayEngine::new(sample, registry, config)?;
    engine.replay(target)?;
    Ok(engine.finish().1)
}
