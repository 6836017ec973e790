use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;

/// Address, two ignored tokens, free text, then a quoted GET request followed
/// by status and byte count. Digits are ASCII only.
static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+) \S+ \S+ .*"GET ([^ ]+) HTTP.*" [0-9]+ [0-9]+"#)
        .expect("line pattern is valid")
});

static TIMESTAMP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+ \S+ \S+ \[([^\]]+)\]").expect("timestamp pattern is valid"));

const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// One request pulled out of an access-log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub address: &'a str,
    pub path: &'a str,
    pub timestamp: Option<DateTime<FixedOffset>>,
}

/// Extracts the client address and requested path from a single line.
///
/// Returns `None` for anything that is not a `GET` request in the expected
/// layout. A missing or malformed `[timestamp]` does not reject the line.
pub fn parse_line(line: &str) -> Option<LogRecord<'_>> {
    let captures = LINE_PATTERN.captures(line)?;
    let address = captures.get(1)?.as_str();
    let path = captures.get(2)?.as_str();

    Some(LogRecord {
        address,
        path,
        timestamp: parse_timestamp(line),
    })
}

fn parse_timestamp(line: &str) -> Option<DateTime<FixedOffset>> {
    let raw = TIMESTAMP_PATTERN.captures(line)?.get(1)?.as_str();
    DateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}
