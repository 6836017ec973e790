pub mod aggregate;
pub mod args;
pub mod error;
pub mod parser;
pub mod rank;
pub mod report;
pub mod source;
pub mod stats;
pub mod utils;

pub use aggregate::{parse_log_file, parse_log_file_parallel};
pub use args::Args;
pub use error::SourceError;
pub use parser::{parse_line, LogRecord};
pub use rank::{get_bottom_n, get_top_n};
pub use report::{analyze, AnalysisReport, ReportOptions};
pub use source::{read_source, Input, LoadedSource};
pub use stats::{LogStatistics, RankedEntry, TimeSpan};
