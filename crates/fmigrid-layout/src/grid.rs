//! Row-major placement of a table into a fixed-width grid.

use fmigrid_common::{FmigridError, GeneRecord, Result};
use serde::Serialize;
use tracing::debug;

use crate::classify::{classify, ColorBucket};

/// One grid position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub text: String,
    pub color: ColorBucket,
}

impl GridCell {
    /// Filler for positions past the end of the table.
    pub fn empty() -> Self {
        Self { text: String::new(), color: ColorBucket::Unchanged }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// `row_count` rows of exactly `col_count` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutGrid {
    col_count: usize,
    rows: Vec<Vec<GridCell>>,
}

impl LayoutGrid {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn rows(&self) -> &[Vec<GridCell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Non-empty cell texts, row-major.
    pub fn filled_texts(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.text.as_str())
            .collect()
    }
}

/// Validate a user-supplied column count.
pub fn column_count(raw: i64) -> Result<usize> {
    usize::try_from(raw)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| {
            FmigridError::InvalidParameter(format!("column count must be positive, got {raw}"))
        })
}

/// Lay `table` out row-major over `col_count` columns, padding the last row.
pub fn layout(table: &[GeneRecord], col_count: usize) -> Result<LayoutGrid> {
    if col_count == 0 {
        return Err(FmigridError::InvalidParameter(
            "column count must be positive, got 0".to_string(),
        ));
    }

    let row_count = table.len().div_ceil(col_count);
    let rows = (0..row_count)
        .map(|r| {
            (0..col_count)
                .map(|c| match table.get(r * col_count + c) {
                    Some(record) => GridCell {
                        text: record.gene.clone(),
                        color: classify(record.log2fc),
                    },
                    None => GridCell::empty(),
                })
                .collect()
        })
        .collect();

    debug!(records = table.len(), row_count, col_count, "Laid out grid");
    Ok(LayoutGrid { col_count, rows })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
