use serde::Serialize;

use crate::classify::ColorBucket;

/// One legend swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub bucket: ColorBucket,
    pub color: &'static str,
    pub label: &'static str,
}

/// The fixed four-entry legend: up, down, unchanged, not detected.
pub fn legend() -> [LegendEntry; 4] {
    ColorBucket::ALL.map(|bucket| LegendEntry {
        bucket,
        color: bucket.color_name(),
        label: bucket.label(),
    })
}
