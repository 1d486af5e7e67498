//! `resim inspect`: summarize a sample log without replaying it.

use std::collections::BTreeMap;
use std::path::Path;

use resim_sample::{ParseStats, Sample};
use serde::Serialize;

use crate::{GlobalArgs, InspectArgs, ReportFormat};

/// One chain group and its signal names in id order.
#[derive(Debug, Serialize)]
struct GroupSummary {
    group: usize,
    signals: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SampleSummary {
    groups: Vec<GroupSummary>,
    snapshots: usize,
    first_cycle: Option<u64>,
    last_cycle: Option<u64>,
    commands: BTreeMap<&'static str, usize>,
    stats: ParseStats,
}

impl SampleSummary {
    fn of(sample: &Sample) -> Self {
        let mut commands = BTreeMap::new();
        for command in sample.snapshots().iter().flat_map(|s| &s.commands) {
            *commands.entry(command.kind_name()).or_insert(0) += 1;
        }
        Self {
            groups: sample
                .chains()
                .groups()
                .map(|(group, signals)| GroupSummary {
                    group,
                    signals: signals.to_vec(),
                })
                .collect(),
            snapshots: sample.snapshots().len(),
            first_cycle: sample.snapshots().first().map(|s| s.cycle),
            last_cycle: sample.snapshots().last().map(|s| s.cycle),
            commands,
            stats: *sample.stats(),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        for g in &self.groups {
            out.push_str(&format!("group {}: {}\n", g.group, g.signals.join(" ")));
        }
        out.push_str(&format!("snapshots: {}", self.snapshots));
        if let (Some(first), Some(last)) = (self.first_cycle, self.last_cycle) {
            out.push_str(&format!(" (cycles {first}..={last})"));
        }
        out.push('\n');
        for (kind, count) in &self.commands {
            out.push_str(&format!("{kind}: {count}\n"));
        }
        if self.stats.suppressed_expects > 0 {
            out.push_str(&format!(
                "suppressed expects: {}\n",
                self.stats.suppressed_expects
            ));
        }
        if self.stats.ignored > 0 {
            out.push_str(&format!("ignored records: {}\n", self.stats.ignored));
        }
        out
    }
}

/// Runs the `resim inspect` command.
pub fn run(args: &InspectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resim_config::load_config(global.config.as_deref().map(Path::new))?;
    let sample = resim_sample::load_sample(Path::new(&args.path), &config)?;
    let summary = SampleSummary::of(&sample);

    match args.format {
        ReportFormat::Text => print!("{}", summary.render_text()),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(0)
}
