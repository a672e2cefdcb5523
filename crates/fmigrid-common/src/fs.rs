//! All-or-nothing output files.
//!
//! Writers produce a sibling temp file in the destination directory and
//! rename it over the destination once complete, so a failed run never
//! leaves a truncated table or image behind.

use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{FmigridError, Result};

/// Run `write` against a temp path in `dest`'s directory, then move it into place.
///
/// The temp path keeps `dest`'s extension, for writers that pick a format from it.
pub fn persist_atomically<F>(dest: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let suffix = dest
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let tmp = tempfile::Builder::new()
        .prefix(".fmigrid-")
        .suffix(&suffix)
        .tempfile_in(dir)?;

    write(tmp.path())?;
    persist(tmp, dest)
}

/// Write `bytes` to `dest` atomically.
pub fn write_bytes_atomically(dest: &Path, bytes: &[u8]) -> Result<()> {
    persist_atomically(dest, |tmp| {
        std::fs::write(tmp, bytes)?;
        Ok(())
    })
}

fn persist(tmp: NamedTempFile, dest: &Path) -> Result<()> {
    debug!(dest = %dest.display(), "Persisting output");
    tmp.persist(dest).map_err(|e| FmigridError::Io(e.error))?;
    Ok(())
}
