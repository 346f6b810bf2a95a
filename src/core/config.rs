//! Configuration structures for the extraction engine.
//!
//! The source charts encode several conventions that would otherwise live as
//! ambient globals: the month-abbreviation table used in timestamps, the
//! line-window sizes for associating a power value with its timestamp, and
//! the RGB ranges of the two marker colors. Each of them is held in an
//! explicit immutable configuration structure owned by the component that
//! needs it, so tests can substitute fixed fixtures deterministically.

use crate::core::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Configuration for the timestamp/value extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Three-letter month abbreviations, January first. Matched
    /// case-insensitively against the month component of timestamps.
    pub months: Vec<String>,
    /// Maximum number of lines (including the timestamp line) scanned
    /// forward for the marker token (default: 6).
    pub marker_window_lines: usize,
    /// Maximum number of lines (including the marker line) scanned forward
    /// for the power value (default: 3).
    pub value_window_lines: usize,
    /// Literal token that introduces the power value (default: "VRP").
    pub marker_token: String,
    /// Unit token that must immediately follow the numeric value
    /// (default: "MW").
    pub unit_token: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            months: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                "Dec",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
            marker_window_lines: 6,
            value_window_lines: 3,
            marker_token: "VRP".to_string(),
            unit_token: "MW".to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Validates that the configuration is internally consistent.
    pub fn validate(&self) -> EngineResult<()> {
        if self.months.len() != 12 {
            return Err(EngineError::config_error(format!(
                "month table must have 12 entries, got {}",
                self.months.len()
            )));
        }
        if self.marker_window_lines == 0 || self.value_window_lines == 0 {
            return Err(EngineError::config_error(
                "search windows must be at least one line",
            ));
        }
        if self.marker_token.is_empty() || self.unit_token.is_empty() {
            return Err(EngineError::config_error(
                "marker and unit tokens must be non-empty",
            ));
        }
        Ok(())
    }

    /// Returns the 1-based month number for a three-letter abbreviation,
    /// case-insensitively, or None if the abbreviation is not in the table.
    pub fn month_number(&self, abbrev: &str) -> Option<u32> {
        self.months
            .iter()
            .position(|m| m.eq_ignore_ascii_case(abbrev))
            .map(|idx| idx as u32 + 1)
    }
}

/// An inclusive RGB range selecting one marker color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColorRange {
    /// Inclusive (min, max) bounds for the red channel.
    pub r: (u8, u8),
    /// Inclusive (min, max) bounds for the green channel.
    pub g: (u8, u8),
    /// Inclusive (min, max) bounds for the blue channel.
    pub b: (u8, u8),
}

impl ColorRange {
    /// Returns true if the pixel falls within all three channel ranges.
    pub fn contains(&self, pixel: image::Rgb<u8>) -> bool {
        let image::Rgb([r, g, b]) = pixel;
        (self.r.0..=self.r.1).contains(&r)
            && (self.g.0..=self.g.1).contains(&g)
            && (self.b.0..=self.b.1).contains(&b)
    }
}

/// Configuration for the marker point detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// RGB range of the alert marker color (red-dominant).
    pub alert_range: ColorRange,
    /// RGB range of the background/negative marker color (near-black).
    pub background_range: ColorRange,
    /// Regions with pixel area less than or equal to this threshold are
    /// discarded as noise (default: 5).
    pub min_region_area: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            alert_range: ColorRange {
                r: (200, 255),
                g: (0, 50),
                b: (0, 50),
            },
            background_range: ColorRange {
                r: (0, 50),
                g: (0, 50),
                b: (0, 50),
            },
            min_region_area: 5,
        }
    }
}

/// Top-level configuration combining all component configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Configuration for the timestamp/value extractor.
    #[serde(default)]
    pub extractor: ExtractorConfig,
    /// Configuration for the marker point detector.
    #[serde(default)]
    pub detector: DetectorConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_number_case_insensitive() {
        let config = ExtractorConfig::default();
        assert_eq!(config.month_number("Mar"), Some(3));
        assert_eq!(config.month_number("MAR"), Some(3));
        assert_eq!(config.month_number("dec"), Some(12));
        assert_eq!(config.month_number("Foo"), None);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_short_month_table_rejected() {
        let config = ExtractorConfig {
            months: vec!["Jan".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_color_range_contains() {
        let range = ColorRange {
            r: (200, 255),
            g: (0, 50),
            b: (0, 50),
        };
        assert!(range.contains(image::Rgb([255, 0, 0])));
        assert!(range.contains(image::Rgb([200, 50, 50])));
        assert!(!range.contains(image::Rgb([199, 0, 0])));
        assert!(!range.contains(image::Rgb([255, 51, 0])));
    }

    #[test]
    fn test_pipeline_config_round_trips_through_json() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.extractor.marker_window_lines, 6);
        assert_eq!(parsed.detector.min_region_area, 5);
    }
}
