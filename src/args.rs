use clap::Parser;
use std::path::PathBuf;

use crate::source::{Input, DEFAULT_MAX_BYTES};

#[derive(Parser, Debug)]
#[command(
    name = "logtally",
    about = "Analyze a web-server access log to find unique clients and the most requested URLs",
    version,
    long_about = None
)]
pub struct Args {
    /// Access log to analyze ("-" reads stdin)
    pub file: PathBuf,

    /// Number of top URLs and IP addresses to display
    #[arg(short, long, default_value_t = 3)]
    pub top: usize,

    /// Number of least requested URLs and IP addresses to display
    #[arg(long)]
    pub bottom: Option<usize>,

    /// Maximum input size in MiB (0 disables the limit)
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES / 1024 / 1024)]
    pub max_size: u64,

    /// Aggregate on this many worker threads
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Mask IP addresses in the output
    #[arg(long)]
    pub redact: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn input(&self) -> Input {
        Input::from(self.file.clone())
    }

    pub fn max_bytes(&self) -> Option<u64> {
        match self.max_size {
            0 => None,
            mib => Some(mib.saturating_mul(1024 * 1024)),
        }
    }
}
