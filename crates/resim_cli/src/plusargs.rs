//! Simulator-style `+plusarg` translation.
//!
//! Testbench harnesses pass options as `+name=value` arguments alongside the
//! simulator's own. Before clap sees the command line, `+sample=<path>`
//! becomes `replay --sample <path>` (the `replay` subcommand is implied when
//! none is given) and `+verbose` becomes `--verbose`. Under any other
//! subcommand `+sample=` is dropped, like every other plusarg, which belongs
//! to the simulator.

/// Subcommand names, for spotting the one the command line selects.
const SUBCOMMANDS: [&str; 3] = ["replay", "inspect", "help"];

/// Rewrites plusargs into their clap equivalents.
///
/// The first element (program name) is passed through unchanged. If
/// `+sample=` appears more than once, the last path wins.
pub fn translate<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut out: Vec<String> = args.next().into_iter().collect();
    let mut sample = None;

    for arg in args {
        if let Some(path) = arg.strip_prefix("+sample=") {
            sample = Some(path.to_string());
        } else if arg == "+verbose" {
            out.push("--verbose".to_string());
        } else if !arg.starts_with('+') {
            out.push(arg);
        }
    }

    let Some(path) = sample else {
        return out;
    };
    let subcommand = out
        .iter()
        .skip(1)
        .find(|a| SUBCOMMANDS.contains(&a.as_str()))
        .map(String::as_str);
    match subcommand {
        None => out.push("replay".to_string()),
        Some("replay") => {}
        Some(_) => return out,
    }
    out.push("--sample".to_string());
    out.push(path);
    out
}
