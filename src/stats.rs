use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::parser::LogRecord;

/// Earliest and latest request time seen in a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSpan {
    pub first: DateTime<FixedOffset>,
    pub last: DateTime<FixedOffset>,
}

impl TimeSpan {
    fn widen(&mut self, other: TimeSpan) {
        if other.first < self.first {
            self.first = other.first;
        }
        if other.last > self.last {
            self.last = other.last;
        }
    }
}

/// Aggregated counts for one log file.
///
/// Only built by the aggregator; callers get read-only access. Iteration
/// order of the maps is unspecified, use [`crate::rank`] for ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogStatistics {
    distinct_addresses: HashSet<String>,
    path_counts: HashMap<String, u64>,
    address_counts: HashMap<String, u64>,
    time_span: Option<TimeSpan>,
}

impl LogStatistics {
    pub fn distinct_addresses(&self) -> &HashSet<String> {
        &self.distinct_addresses
    }

    pub fn path_counts(&self) -> &HashMap<String, u64> {
        &self.path_counts
    }

    pub fn address_counts(&self) -> &HashMap<String, u64> {
        &self.address_counts
    }

    pub fn time_span(&self) -> Option<TimeSpan> {
        self.time_span
    }

    /// Number of lines that parsed successfully.
    pub fn total_requests(&self) -> u64 {
        self.address_counts.values().sum()
    }

    pub(crate) fn record(&mut self, record: &LogRecord<'_>) {
        if !self.distinct_addresses.contains(record.address) {
            self.distinct_addresses.insert(record.address.to_string());
        }
        *self.path_counts.entry(record.path.to_string()).or_insert(0) += 1;
        *self
            .address_counts
            .entry(record.address.to_string())
            .or_insert(0) += 1;

        if let Some(ts) = record.timestamp {
            self.widen_span(TimeSpan { first: ts, last: ts });
        }
    }

    pub(crate) fn merge(mut self, other: LogStatistics) -> LogStatistics {
        self.distinct_addresses.extend(other.distinct_addresses);
        for (path, count) in other.path_counts {
            *self.path_counts.entry(path).or_insert(0) += count;
        }
        for (address, count) in other.address_counts {
            *self.address_counts.entry(address).or_insert(0) += count;
        }
        if let Some(span) = other.time_span {
            self.widen_span(span);
        }
        self
    }

    fn widen_span(&mut self, span: TimeSpan) {
        match self.time_span.as_mut() {
            Some(current) => current.widen(span),
            None => self.time_span = Some(span),
        }
    }
}

/// A key and its hit count, as produced by ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: u64,
}
