use std::fs;
use std::path::Path;
use std::process::ExitCode;

use alike_diff::report::rows;
use alike_diff::{
    compare, CompareConfig, Difference, DifferenceFormatter, FlatFormatter, LeniencyMode,
    MatchStrategy, MismatchRow,
};
use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Compare(args) => cmd_compare(&args, cli.format),
        Command::Config(args) => cmd_config(&args),
    }
}

fn cmd_compare(args: &CompareArgs, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let difference = compare_files(args)?;
    let output = match format {
        OutputFormat::Text => render_text(difference.as_ref(), args.limit),
        OutputFormat::Json => render_json(difference.as_ref())?,
    };
    println!("{output}");
    Ok(if difference.is_none() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn cmd_config(args: &LeniencyArgs) -> anyhow::Result<ExitCode> {
    let config = build_config(args)?;
    print!("{}", config.to_toml()?);
    Ok(ExitCode::SUCCESS)
}

/// Load both documents named by `args` and compare them.
pub(crate) fn compare_files(args: &CompareArgs) -> anyhow::Result<Option<Difference>> {
    let config = build_config(&args.leniency)?;
    let expected = load_document(&args.expected)?;
    let actual = load_document(&args.actual)?;
    debug!(
        expected = %args.expected.display(),
        actual = %args.actual.display(),
        modes = ?config.modes,
        "comparing documents"
    );
    Ok(compare(&expected, &actual, &config)?)
}

/// The configuration file, if any, with flags applied on top.
pub(crate) fn build_config(args: &LeniencyArgs) -> anyhow::Result<CompareConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            CompareConfig::from_toml(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => CompareConfig::default(),
    };

    let flags = [
        (args.lenient_order, LeniencyMode::LenientOrder),
        (args.ignore_defaults, LeniencyMode::IgnoreDefaults),
        (args.lenient_dates, LeniencyMode::LenientDates),
    ];
    config = config.with_modes(flags.into_iter().filter(|(on, _)| *on).map(|(_, m)| m));
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(match strategy {
            StrategyArg::Greedy => MatchStrategy::Greedy,
            StrategyArg::Optimal => MatchStrategy::Optimal {
                max_len: args.max_len,
            },
        });
    }
    Ok(config.with_identity_fields(args.identity_fields.iter().cloned()))
}

fn load_document(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

pub(crate) fn render_text(difference: Option<&Difference>, limit: usize) -> String {
    let Some(difference) = difference else {
        return format!("{} Documents match.", "✓".green().bold());
    };
    let count = difference.leaf_count();
    let mut out = format!(
        "{} {} difference{} found:\n",
        "✗".red().bold(),
        count.to_string().bold(),
        if count == 1 { "" } else { "s" }
    );
    let report = FlatFormatter::with_limit(limit).format(difference);
    for line in report.lines() {
        match line.split_once(": ") {
            Some((path, rest)) if !line.starts_with("...") => {
                out.push_str(&format!("  {}: {}\n", path.yellow(), rest));
            }
            _ => out.push_str(&format!("  {}\n", line.dimmed())),
        }
    }
    out.truncate(out.trim_end().len());
    out
}

#[derive(Serialize)]
struct JsonReport {
    equal: bool,
    mismatches: Vec<MismatchRow>,
}

pub(crate) fn render_json(difference: Option<&Difference>) -> anyhow::Result<String> {
    let report = JsonReport {
        equal: difference.is_none(),
        mismatches: difference.map(rows).unwrap_or_default(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
