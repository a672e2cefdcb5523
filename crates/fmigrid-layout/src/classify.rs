use fmigrid_common::Log2Fc;
use serde::{Deserialize, Serialize};

/// |log2fc| above this is a more than 2-fold change.
pub const FOLD_CHANGE_THRESHOLD: f64 = 1.0;

/// Expression class of a gene, one per legend entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBucket {
    OverExpressed,
    UnderExpressed,
    Unchanged,
    NotDetected,
}

impl ColorBucket {
    /// Legend order.
    pub const ALL: [ColorBucket; 4] = [
        ColorBucket::OverExpressed,
        ColorBucket::UnderExpressed,
        ColorBucket::Unchanged,
        ColorBucket::NotDetected,
    ];

    pub fn color_name(&self) -> &'static str {
        match self {
            ColorBucket::OverExpressed => "orange",
            ColorBucket::UnderExpressed => "aqua",
            ColorBucket::Unchanged => "white",
            ColorBucket::NotDetected => "grey",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ColorBucket::OverExpressed => (255, 165, 0),
            ColorBucket::UnderExpressed => (0, 255, 255),
            ColorBucket::Unchanged => (255, 255, 255),
            ColorBucket::NotDetected => (128, 128, 128),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorBucket::OverExpressed => "More than 2-fold up-regulated in sample",
            ColorBucket::UnderExpressed => "More than 2-fold down-regulated in sample",
            ColorBucket::Unchanged => "Less than 2-fold change",
            ColorBucket::NotDetected => "Not detected",
        }
    }
}

/// Bucket for a fold change. Exactly ±1 counts as unchanged.
pub fn classify(value: Log2Fc) -> ColorBucket {
    match value {
        Log2Fc::Present(v) if v < -FOLD_CHANGE_THRESHOLD => ColorBucket::UnderExpressed,
        Log2Fc::Present(v) if v > FOLD_CHANGE_THRESHOLD => ColorBucket::OverExpressed,
        Log2Fc::Present(v) if (-FOLD_CHANGE_THRESHOLD..=FOLD_CHANGE_THRESHOLD).contains(&v) => {
            ColorBucket::Unchanged
        }
        // NaN fails every comparison above
        _ => ColorBucket::NotDetected,
    }
}
