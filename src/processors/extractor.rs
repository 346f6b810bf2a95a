//! Timestamp/value extraction from recognized chart text.
//!
//! Recognized text from the time-series chart is noisy: value tokens often
//! drift onto lines away from their timestamp, and individual tokens can be
//! garbled. The extractor therefore scans line-by-line for timestamps and
//! then searches a bounded forward window for the marker token and the
//! power value, silently skipping timestamps whose value never resolves.
//! Per-timestamp failures never abort extraction of the remaining text.

use crate::core::config::ExtractorConfig;
use crate::core::errors::{EngineError, EngineResult};
use crate::domain::CandidateEvent;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use tracing::debug;

/// Extracts ordered candidate events from recognized chart text.
///
/// Patterns are compiled once at construction from the supplied
/// configuration (month table, marker token, unit token).
#[derive(Debug)]
pub struct TimestampValueExtractor {
    config: ExtractorConfig,
    timestamp_pattern: Regex,
    value_pattern: Regex,
}

impl TimestampValueExtractor {
    /// Creates a new extractor from the given configuration.
    pub fn new(config: ExtractorConfig) -> EngineResult<Self> {
        config.validate()?;

        let months = config
            .months
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");
        let timestamp_pattern = Regex::new(&format!(
            r"(?i)\b(\d{{2}})-({months})-(\d{{4}})\s+(\d{{2}}):(\d{{2}}):(\d{{2}})"
        ))
        .map_err(|e| EngineError::config_error(format!("timestamp pattern: {e}")))?;

        let unit = regex::escape(&config.unit_token);
        let value_pattern = Regex::new(&format!(r"(?i)(\d+\.\d*|\.\d+|\d+|nan)\s*{unit}\b"))
            .map_err(|e| EngineError::config_error(format!("value pattern: {e}")))?;

        Ok(Self {
            config,
            timestamp_pattern,
            value_pattern,
        })
    }

    /// Scans recognized text and returns candidate events in source order.
    ///
    /// A candidate is emitted only when a timestamp, the marker token within
    /// `marker_window_lines`, and a power value within `value_window_lines`
    /// of the marker line all resolve. Duplicate timestamps are kept;
    /// deduplication belongs to the consolidation layer downstream.
    pub fn extract(&self, text: &str) -> Vec<CandidateEvent> {
        let lines: Vec<&str> = text.lines().collect();
        let marker_upper = self.config.marker_token.to_ascii_uppercase();
        let mut events = Vec::new();

        for (line_idx, line) in lines.iter().enumerate() {
            let Some(caps) = self.timestamp_pattern.captures(line) else {
                continue;
            };
            let Some(timestamp) = self.parse_timestamp(&caps) else {
                debug!(line = line_idx, "skipping timestamp with invalid calendar components");
                continue;
            };

            let marker_end = (line_idx + self.config.marker_window_lines).min(lines.len());
            let Some(marker_idx) = (line_idx..marker_end)
                .find(|&i| lines[i].to_ascii_uppercase().contains(marker_upper.as_str()))
            else {
                debug!(line = line_idx, "no marker token near timestamp, dropping");
                continue;
            };

            let value_end = (marker_idx + self.config.value_window_lines).min(lines.len());
            let Some(power_mw) = (marker_idx..value_end).find_map(|i| {
                self.value_pattern
                    .captures(lines[i])
                    .map(|vc| parse_power(vc.get(1).map_or("", |m| m.as_str())))
            }) else {
                debug!(line = line_idx, "no power value near marker token, dropping");
                continue;
            };

            events.push(CandidateEvent {
                timestamp,
                power_mw,
                sequence_index: events.len(),
            });
        }

        events
    }

    /// Builds a NaiveDateTime from the timestamp capture groups, or None if
    /// the month abbreviation is unknown or the calendar components do not
    /// form a real date (e.g. 31-Feb).
    fn parse_timestamp(&self, caps: &regex::Captures<'_>) -> Option<NaiveDateTime> {
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let day: u32 = group(1).parse().ok()?;
        let month = self.config.month_number(group(2))?;
        let year: i32 = group(3).parse().ok()?;
        let hour: u32 = group(4).parse().ok()?;
        let minute: u32 = group(5).parse().ok()?;
        let second: u32 = group(6).parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
    }
}

/// Converts a matched value token to a power reading in megawatts.
///
/// A literal "NaN" token, or a token that fails numeric conversion, becomes
/// the `f64::NAN` sentinel rather than an error; undefined readings are a
/// normal chart condition and are classified (not dropped) downstream.
fn parse_power(token: &str) -> f64 {
    if token.eq_ignore_ascii_case("nan") {
        return f64::NAN;
    }
    let normalized = if token.starts_with('.') {
        format!("0{token}")
    } else {
        token.to_string()
    };
    normalized.parse::<f64>().unwrap_or(f64::NAN)
}
