use anyhow::Result;
use clap::Parser;
use tracing::error;

use logtally::report::{self, ReportOptions};
use logtally::utils::{setup_logging, validate_args};
use logtally::{read_source, Args};

fn run(args: &Args) -> Result<()> {
    let source = read_source(&args.input(), args.max_bytes())?;
    let result = report::analyze(&source, &ReportOptions::from(args))?;

    if args.json {
        report::print_json(&result)
    } else {
        report::print_text(&result)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    if let Err(e) = run(&args) {
        error!("Failed to read or parse the log file: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
