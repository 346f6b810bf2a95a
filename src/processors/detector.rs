//! Marker point detection in distance/trend chart images.
//!
//! Marker dots are rendered in one of two colors: an alert red for readings
//! inside the alert range and a near-black for readings outside it. For
//! each color class the detector builds a binary mask over the pixel grid,
//! labels maximal 8-connected regions, drops regions at or below the
//! minimum-area threshold (single-pixel noise and antialiasing specks), and
//! reduces each surviving region to its area-weighted centroid.

use crate::core::config::{ColorRange, DetectorConfig};
use crate::domain::{ColorClass, MarkerPoint};
use image::{GrayImage, Luma, RgbImage};
use imageproc::region_labelling::{connected_components, Connectivity};
use std::collections::BTreeMap;
use tracing::debug;

/// Detects colored marker points in a chart image.
#[derive(Debug, Clone)]
pub struct MarkerPointDetector {
    config: DetectorConfig,
}

impl MarkerPointDetector {
    /// Creates a new detector from the given configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Returns every marker point found in the chart.
    ///
    /// The two color ranges are disjoint, so no pixel contributes to both
    /// classes and no cross-class deduplication is needed. Point count is
    /// unbounded.
    pub fn detect(&self, chart: &RgbImage) -> Vec<MarkerPoint> {
        let mut points = Vec::new();
        for (color_class, range) in [
            (ColorClass::Alert, self.config.alert_range),
            (ColorClass::Background, self.config.background_range),
        ] {
            let mask = self.build_mask(chart, range);
            let found = self.centroids(&mask, color_class);
            debug!(?color_class, count = found.len(), "marker regions detected");
            points.extend(found);
        }
        points
    }

    /// Builds a binary mask selecting pixels within the given color range.
    fn build_mask(&self, chart: &RgbImage, range: ColorRange) -> GrayImage {
        let mut mask = GrayImage::new(chart.width(), chart.height());
        for (x, y, pixel) in chart.enumerate_pixels() {
            if range.contains(*pixel) {
                mask.put_pixel(x, y, Luma([255u8]));
            }
        }
        mask
    }

    /// Labels 8-connected foreground regions in the mask and returns one
    /// marker point per region whose area exceeds the minimum threshold.
    fn centroids(&self, mask: &GrayImage, color_class: ColorClass) -> Vec<MarkerPoint> {
        if mask.width() == 0 || mask.height() == 0 {
            return Vec::new();
        }
        let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));

        // label -> (area, sum_x, sum_y); BTreeMap keeps emission order
        // deterministic by label.
        let mut regions: BTreeMap<u32, (u64, u64, u64)> = BTreeMap::new();
        for (x, y, label) in labels.enumerate_pixels() {
            let Luma([label]) = *label;
            if label == 0 {
                continue;
            }
            let entry = regions.entry(label).or_insert((0, 0, 0));
            entry.0 += 1;
            entry.1 += u64::from(x);
            entry.2 += u64::from(y);
        }

        regions
            .into_values()
            .filter(|&(area, _, _)| area > u64::from(self.config.min_region_area))
            .map(|(area, sum_x, sum_y)| MarkerPoint {
                x: ((sum_x as f64 / area as f64).round()) as i32,
                y: ((sum_y as f64 / area as f64).round()) as i32,
                color_class,
            })
            .collect()
    }
}
