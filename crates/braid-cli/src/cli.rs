use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "braid",
    about = "Braid — merge independently ordered record streams into one timeline",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge explicit timestamp lists, one --source per stream
    Merge(MergeArgs),
    /// Generate synthetic sources and merge them
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// Comma-separated timestamps, repeatable (e.g. --source 10,30,50)
    #[arg(long = "source", value_name = "TIMESTAMPS")]
    pub sources: Vec<String>,

    /// Independently re-check order and conservation after the merge
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Number of synthetic sources
    #[arg(long, default_value_t = 10)]
    pub sources: usize,

    /// Records per source
    #[arg(long, default_value_t = 3)]
    pub records: usize,

    /// Inclusive upper bound for generated timestamps
    #[arg(long, default_value_t = 100)]
    pub max_timestamp: u64,

    /// Seed for the generator; a random seed is drawn (and printed) if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sort each generated backlog ascending
    #[arg(long)]
    pub sorted: bool,

    /// Independently re-check order and conservation after the merge
    #[arg(long)]
    pub verify: bool,
}
