//! Naming of the extractor's output file.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

fn tsv_stem() -> &'static Regex {
    static TSV_STEM: OnceLock<Regex> = OnceLock::new();
    TSV_STEM.get_or_init(|| Regex::new(r"^(.*)\.tsv").expect("static regex"))
}

/// Output path for an input table: `sample.tsv` → `sample<suffix>.tsv`.
///
/// Everything before the last `.tsv` in the path is kept, so
/// `run.tsv.gz` → `run<suffix>.tsv`. Paths without `.tsv` get
/// `<suffix>.tsv` appended.
pub fn derive_output_path(infile: &Path, suffix: &str) -> PathBuf {
    let raw = infile.to_string_lossy();
    let prefix = tsv_stem()
        .captures(&raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(&raw);
    PathBuf::from(format!("{prefix}{suffix}.tsv"))
}
