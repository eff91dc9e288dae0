use anyhow::{bail, Context};
use colored::Colorize;
use serde::Serialize;

use braid_merge::{MergeEngine, MergeStats, SequenceValidator, ValidationReport};
use braid_source::{MemorySource, RecordSource, SyntheticFeed};
use braid_types::Record;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Merge(args) => cmd_merge(args, cli.format),
        Command::Demo(args) => cmd_demo(args, cli.format),
    }
}

fn cmd_merge(args: MergeArgs, format: OutputFormat) -> anyhow::Result<()> {
    if args.sources.is_empty() {
        bail!("at least one --source is required");
    }
    let backlogs: Vec<Vec<Record>> = args
        .sources
        .iter()
        .map(|list| Record::parse_list(list))
        .collect::<Result<_, _>>()
        .context("failed to parse --source")?;
    merge_and_report(backlogs, args.verify, format)
}

fn cmd_demo(args: DemoArgs, format: OutputFormat) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut feed = SyntheticFeed::new(seed)
        .max_timestamp(args.max_timestamp)
        .sorted(args.sorted);
    let backlogs: Vec<Vec<Record>> = (0..args.sources).map(|_| feed.backlog(args.records)).collect();

    if matches!(format, OutputFormat::Text) {
        println!("seed = {}", seed.to_string().cyan());
    }
    merge_and_report(backlogs, args.verify, format)
}

#[derive(Serialize)]
struct MergeOutput {
    sources: Vec<Vec<u64>>,
    merged: Vec<u64>,
    stats: MergeStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<ValidationReport>,
}

fn merge_and_report(
    backlogs: Vec<Vec<Record>>,
    verify: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let inputs: Vec<Vec<u64>> = backlogs
        .iter()
        .map(|b| b.iter().map(Record::timestamp).collect())
        .collect();
    let expected: Vec<u64> = inputs.iter().flatten().copied().collect();

    let sources: Vec<Box<dyn RecordSource>> = backlogs
        .into_iter()
        .map(|b| Box::new(MemorySource::with_backlog(b)) as Box<dyn RecordSource>)
        .collect();
    let result = MergeEngine::with_expected_records(sources, expected.len()).run();

    let validation = verify.then(|| SequenceValidator::validate(&result.sequence, &expected));

    match format {
        OutputFormat::Json => {
            let output = MergeOutput {
                sources: inputs,
                merged: result.sequence.timestamps(),
                stats: result.stats,
                validation: validation.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            for input in &inputs {
                print_data_line(input);
            }
            print_data_line(&result.sequence.timestamps());
            let s = &result.stats;
            println!(
                "{} rounds={} records={} appends={} window={} full={} max_distance={}",
                "stats:".dimmed(),
                s.rounds,
                s.records,
                s.appends,
                s.window_searches,
                s.full_searches,
                s.max_distance,
            );
            if let Some(report) = &validation {
                if report.is_valid() {
                    println!("{} sequence valid", "✓".green().bold());
                } else {
                    println!("{} sequence invalid", "✗".red().bold());
                    for violation in &report.violations {
                        println!("  {} {}", violation.kind.to_string().red(), violation.description);
                    }
                }
            }
        }
    }

    if let Some(report) = &validation {
        if !report.is_valid() {
            bail!("validation failed with {} violation(s)", report.violations.len());
        }
    }
    Ok(())
}

fn print_data_line(timestamps: &[u64]) {
    print!("data=");
    for ts in timestamps {
        print!(" {ts}");
    }
    println!();
}
