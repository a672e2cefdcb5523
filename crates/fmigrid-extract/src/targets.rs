//! Target panel loading.

use std::collections::BTreeSet;
use std::path::Path;

use fmigrid_common::{FmigridError, Result};
use tracing::{debug, info};

/// Distinct target gene identifiers.
pub type TargetSet = BTreeSet<String>;

/// Load the target panel from a file with one gene per line.
pub fn load_targets(path: &Path) -> Result<TargetSet> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| FmigridError::file_read(path, e))?;
    let targets = parse_targets(&content);
    info!(path = %path.display(), targets = targets.len(), "Loaded target panel");
    Ok(targets)
}

/// Parse a target panel body. Surrounding whitespace is stripped, blank lines
/// are skipped and repeated genes collapse.
pub fn parse_targets(content: &str) -> TargetSet {
    let mut lines = 0usize;
    let targets: TargetSet = content
        .lines()
        .map(str::trim)
        .filter(|gene| !gene.is_empty())
        .inspect(|_| lines += 1)
        .map(str::to_string)
        .collect();

    if lines > targets.len() {
        debug!(lines, distinct = targets.len(), "Collapsed repeated target genes");
    }
    targets
}
