//! Diagnostic output setup.
//!
//! Library crates log through the `log` facade: snapshot markers at `info`,
//! per-operation traces at `debug`, lenient-parse degradations at `warn`.
//! Messages go to stderr without decoration so the trace reads like the
//! recorded replay. `RUST_LOG` overrides the level chosen from the flags.

use std::io::Write;

use log::LevelFilter;

use crate::GlobalArgs;

/// Picks the log level for the global flags.
pub fn level_for(global: &GlobalArgs) -> LevelFilter {
    if global.verbose {
        LevelFilter::Debug
    } else if global.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Installs the stderr logger. Later calls are no-ops.
pub fn init(global: &GlobalArgs) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(global))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| match record.level() {
            log::Level::Warn | log::Level::Error => {
                writeln!(buf, "{}: {}", record.level().as_str().to_lowercase(), record.args())
            }
            _ => writeln!(buf, "{}", record.args()),
        });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    let _ = builder.try_init();
}
