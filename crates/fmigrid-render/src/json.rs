//! JSON handoff of a laid-out grid for renderers other than the built-in one.

use std::path::Path;

use fmigrid_common::fs::write_bytes_atomically;
use fmigrid_common::Result;
use fmigrid_layout::{LayoutGrid, LegendEntry};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct GridDocument<'a> {
    grid: &'a LayoutGrid,
    legend: &'a [LegendEntry],
}

/// Write `grid` and `legend` as pretty-printed JSON.
pub fn dump_grid_json(grid: &LayoutGrid, legend: &[LegendEntry], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&GridDocument { grid, legend })?;
    write_bytes_atomically(path, json.as_bytes())?;
    info!(path = %path.display(), "Wrote grid JSON");
    Ok(())
}
