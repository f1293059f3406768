use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ebitda_reward::config::Config;
use ebitda_reward::output::{self, OutputFormat};
use ebitda_reward::runner::Runner;

/// EBITDA reward scorer - score model responses in a run file against ground truth
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML run file
    run_file: PathBuf,

    /// Output format: plain or json
    #[arg(short, long, default_value = "plain")]
    output: OutputFormat,

    /// Verbose output - log every scored case
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ebitda_reward=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::from_file(&args.run_file)?;
    let runner = Runner::new(config)?;

    let results = runner.run_suites()?;

    output::print_results(&results, args.output);

    Ok(())
}
