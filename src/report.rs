use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;
use tracing::info;

use crate::aggregate::{parse_log_file, parse_log_file_parallel};
use crate::rank::{get_bottom_n, get_top_n};
use crate::source::LoadedSource;
use crate::stats::{RankedEntry, TimeSpan};
use crate::utils::{format_number, redact_address};
use crate::Args;

const DATE_FORMAT: &str = "%B %-d, %Y %H:%M:%S %:z";

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub top: usize,
    pub bottom: Option<usize>,
    pub workers: Option<usize>,
    pub redact: bool,
}

impl From<&Args> for ReportOptions {
    fn from(args: &Args) -> Self {
        ReportOptions {
            top: args.top,
            bottom: args.bottom,
            workers: args.workers,
            redact: args.redact,
        }
    }
}

/// Everything the renderers print, already ranked.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub size_bytes: u64,
    pub unique_addresses: usize,
    pub total_requests: u64,
    pub time_span: Option<TimeSpan>,
    pub top_paths: Vec<RankedEntry>,
    pub top_addresses: Vec<RankedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_paths: Option<Vec<RankedEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_addresses: Option<Vec<RankedEntry>>,
}

pub fn analyze(source: &LoadedSource, options: &ReportOptions) -> Result<AnalysisReport> {
    let start_time = Instant::now();
    info!(action = "start", component = "analysis", source = %source.label, "Starting log analysis");

    let stats = match options.workers {
        Some(workers) => parse_log_file_parallel(&source.content, workers)
            .context("Parallel aggregation failed")?,
        None => parse_log_file(&source.content),
    };

    let redact = |entries: Vec<RankedEntry>| -> Vec<RankedEntry> {
        if !options.redact {
            return entries;
        }
        entries
            .into_iter()
            .map(|entry| RankedEntry {
                key: redact_address(&entry.key),
                count: entry.count,
            })
            .collect()
    };

    let report = AnalysisReport {
        source: source.label.clone(),
        size_bytes: source.size_bytes,
        unique_addresses: stats.distinct_addresses().len(),
        total_requests: stats.total_requests(),
        time_span: stats.time_span(),
        top_paths: get_top_n(stats.path_counts(), options.top),
        top_addresses: redact(get_top_n(stats.address_counts(), options.top)),
        bottom_paths: options.bottom.map(|n| get_bottom_n(stats.path_counts(), n)),
        bottom_addresses: options
            .bottom
            .map(|n| redact(get_bottom_n(stats.address_counts(), n))),
    };

    info!(
        action = "complete",
        component = "analysis",
        duration_ms = start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );
    Ok(report)
}

pub fn print_text(report: &AnalysisReport) -> Result<()> {
    let stdout = io::stdout();
    write_text(report, &mut stdout.lock()).context("Failed to write report")
}

pub fn print_json(report: &AnalysisReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}

pub fn write_text(report: &AnalysisReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n--- {} Log Analysis ---", report.source)?;
    writeln!(
        out,
        "File size: {:.2} MB",
        report.size_bytes as f64 / 1024.0 / 1024.0
    )?;

    if let Some(span) = report.time_span {
        writeln!(
            out,
            "Date range: {} to {}",
            span.first.format(DATE_FORMAT),
            span.last.format(DATE_FORMAT)
        )?;
    }

    writeln!(
        out,
        "Unique IP addresses: {}",
        format_number(report.unique_addresses as u64)
    )?;
    writeln!(
        out,
        "Total requests: {}",
        format_number(report.total_requests)
    )?;

    write_ranking(out, "Top", "visited URLs", &report.top_paths)?;
    write_ranking(out, "Top", "active IP addresses", &report.top_addresses)?;

    if let Some(paths) = &report.bottom_paths {
        write_ranking(out, "Bottom", "visited URLs", paths)?;
    }
    if let Some(addresses) = &report.bottom_addresses {
        write_ranking(out, "Bottom", "active IP addresses", addresses)?;
    }
    Ok(())
}

fn write_ranking(
    out: &mut impl Write,
    heading: &str,
    subject: &str,
    entries: &[RankedEntry],
) -> io::Result<()> {
    writeln!(out, "\n{} {} {}:", heading, entries.len(), subject)?;
    if entries.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for entry in entries {
        writeln!(out, "- {}: {} requests", entry.key, format_number(entry.count))?;
    }
    Ok(())
}
