//! Core entities shared by the extraction and layout stages.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cell values treated as "not available" when reading a table.
/// Mirrors the default NA vocabulary of common dataframe readers, so tables
/// written by upstream tooling round-trip without surprises.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

/// A log2 fold-change value, or the marker for a gene with no measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Log2Fc {
    Present(f64),
    Missing,
}

impl Log2Fc {
    pub fn is_missing(&self) -> bool {
        matches!(self, Log2Fc::Missing)
    }

    pub fn value(&self) -> Option<f64> {
        match *self {
            Log2Fc::Present(v) => Some(v),
            Log2Fc::Missing => None,
        }
    }
}

impl From<Option<f64>> for Log2Fc {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if !v.is_nan() => Log2Fc::Present(v),
            _ => Log2Fc::Missing,
        }
    }
}

impl From<Log2Fc> for Option<f64> {
    fn from(value: Log2Fc) -> Self {
        value.value()
    }
}

impl FromStr for Log2Fc {
    type Err = ParseFloatError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if NA_TOKENS.contains(&raw) {
            return Ok(Log2Fc::Missing);
        }
        raw.parse::<f64>().map(|v| Log2Fc::from(Some(v)))
    }
}

/// Missing values print as an empty cell; whole numbers keep one decimal.
impl fmt::Display for Log2Fc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Log2Fc::Missing => Ok(()),
            Log2Fc::Present(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Log2Fc::Present(v) => write!(f, "{v}"),
        }
    }
}

/// One row of a gene-expression table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneRecord {
    /// Gene identifier, e.g. "TP53"
    pub gene: String,
    pub log2fc: Log2Fc,
}

impl GeneRecord {
    pub fn new(gene: impl Into<String>, log2fc: Log2Fc) -> Self {
        Self { gene: gene.into(), log2fc }
    }

    /// Placeholder row for a gene with no measurement.
    pub fn missing(gene: impl Into<String>) -> Self {
        Self::new(gene, Log2Fc::Missing)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
