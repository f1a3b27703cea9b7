use once_cell::sync::Lazy;
use regex::Regex;

/// `2024-01-31 12:00:00,123 - LEVEL - message`
static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3}) - (\w+) - (.*)$")
        .expect("log line pattern")
});

/// One parsed trace log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

/// Parse a raw line; anything not matching the fixed pattern yields `None`
/// and is dropped by callers.
pub fn parse_line(line: &str) -> Option<LogLine> {
    let caps = LINE_PATTERN.captures(line.trim_end_matches(['\r', '\n']))?;
    Some(LogLine {
        timestamp: caps[1].to_string(),
        level: caps[2].to_string(),
        message: caps[3].to_string(),
    })
}
