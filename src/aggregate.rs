use anyhow::{Context, Result};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

use crate::parser::parse_line;
use crate::stats::LogStatistics;

/// Parses every line of `content` and accumulates the counts.
///
/// Lines that do not match are skipped. Never fails.
pub fn parse_log_file(content: &str) -> LogStatistics {
    let start_time = Instant::now();
    let mut stats = LogStatistics::default();
    let mut line_count = 0usize;

    for line in content.lines() {
        line_count += 1;
        if let Some(record) = parse_line(line) {
            stats.record(&record);
        }
    }

    log_summary(&stats, line_count, 1, start_time);
    stats
}

/// Same result as [`parse_log_file`], computed on a dedicated pool of
/// `workers` threads (capped at the number of CPUs).
pub fn parse_log_file_parallel(content: &str, workers: usize) -> Result<LogStatistics> {
    let start_time = Instant::now();
    let worker_count = workers.clamp(1, num_cpus::get().max(1));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .build()
        .context("Failed to build worker pool")?;

    let line_count = content.lines().count();
    let stats = pool.install(|| {
        content
            .par_lines()
            .fold(LogStatistics::default, |mut acc, line| {
                if let Some(record) = parse_line(line) {
                    acc.record(&record);
                }
                acc
            })
            .reduce(LogStatistics::default, LogStatistics::merge)
    });

    log_summary(&stats, line_count, worker_count, start_time);
    Ok(stats)
}

fn log_summary(stats: &LogStatistics, line_count: usize, worker_count: usize, start_time: Instant) {
    info!(
        action = "complete",
        component = "aggregation",
        line_count,
        matched = stats.total_requests(),
        unique_addresses = stats.distinct_addresses().len(),
        worker_count,
        duration_ms = start_time.elapsed().as_millis(),
        "Log aggregation completed"
    );
}
