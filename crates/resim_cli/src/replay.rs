//! `resim replay`: load a sample, replay it and report the verdict.
//!
//! The built-in target is a [`MemoryTarget`] exposing every signal the sample
//! names plus the reset signal. Deposited values read back unchanged, so a
//! replay against it checks that the sample's expectations are consistent
//! with its own stimulus.

use std::collections::BTreeSet;
use std::path::Path;

use resim_config::ResimConfig;
use resim_replay::{replay_sample, MemoryTarget, RunReport};
use resim_sample::Sample;

use crate::{GlobalArgs, ReplayArgs, ReportFormat};

/// Runs the `resim replay` command.
///
/// Returns exit code 0 if every evaluated expectation held, 1 otherwise.
pub fn run(args: &ReplayArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resim_config::load_config(global.config.as_deref().map(Path::new))?;
    let report = replay_file(Path::new(&args.sample), &config)?;

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                for failure in &report.failures {
                    eprintln!(
                        "   mismatch at cycle {} (snapshot {}): {} = {:#x}, expected {:#x}",
                        failure.total_cycles,
                        failure.snapshot_cycle,
                        failure.signal,
                        failure.observed,
                        failure.expected
                    );
                }
                eprintln!("{}", report.summary());
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(report.exit_code())
}

/// Loads `path` and replays it against a fresh memory target.
pub fn replay_file(
    path: &Path,
    config: &ResimConfig,
) -> Result<RunReport, Box<dyn std::error::Error>> {
    let sample = resim_sample::load_sample(path, config)?;
    let mut target = MemoryTarget::new(target_signals(&sample, &config.replay.reset_signal));
    Ok(replay_sample(sample, &mut target, &config.replay)?)
}

/// Every chain signal, every indexed name the sample touches, and `reset`.
fn target_signals(sample: &Sample, reset: &str) -> BTreeSet<String> {
    let mut names: BTreeSet<String> = sample
        .chains()
        .groups()
        .flat_map(|(_, names)| names.iter().cloned())
        .collect();
    names.extend(sample.referenced_signals());
    names.insert(reset.to_string());
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_sample(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(text.as_bytes()).unwrap();
        path
    }

    fn global() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn consistent_sample_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(
            dir.path(),
            "ok.sample",
            "0 0 a\n0 0 b\n1 c 10\n3 0 0 ff\n4 2\n5 0 0 ff\n",
        );
        let report = replay_file(&path, &ResimConfig::default()).unwrap();
        assert!(report.passed);
        assert_eq!(report.total_cycles, 2);
        assert_eq!(report.expects_evaluated, 1);
    }

    #[test]
    fn inconsistent_sample_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(
            dir.path(),
            "bad.sample",
            "0 0 a\n1 c 10\n3 0 0 1\n4 3\n5 0 0 2\n",
        );
        let args = ReplayArgs {
            sample: path.to_string_lossy().into_owned(),
            format: ReportFormat::Text,
        };
        assert_eq!(run(&args, &global()).unwrap(), 1);
    }

    #[test]
    fn missing_sample_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ReplayArgs {
            sample: dir.path().join("nope.sample").to_string_lossy().into_owned(),
            format: ReportFormat::Text,
        };
        let err = run(&args, &global()).unwrap_err();
        assert!(err.to_string().contains("cannot open"));
    }

    #[test]
    fn custom_config_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("ci.toml");
        std::fs::write(&config, "[replay]\nreset_signal = \"rst_n\"\n").unwrap();
        let path = write_sample(dir.path(), "s.sample", "0 0 a\n1 c 0\n4 1\n");
        let args = ReplayArgs {
            sample: path.to_string_lossy().into_owned(),
            format: ReportFormat::Json,
        };
        let g = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some(config.to_string_lossy().into_owned()),
        };
        assert_eq!(run(&args, &g).unwrap(), 0);
    }

    #[test]
    fn target_covers_chain_and_reset() {
        let sample = resim_sample::parse_sample_str(
            "0 0 a\n0 1 mem\n1 c 0\n2 1 0 5 3\n",
            &ResimConfig::default(),
        )
        .unwrap();
        let names: Vec<String> = target_signals(&sample, "reset").into_iter().collect();
        assert_eq!(names, ["a", "mem", "mem[3]", "reset"]);
    }
}
