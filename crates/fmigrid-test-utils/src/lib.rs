//! Fixtures shared by fmigrid tests: small target lists, results tables, and
//! a temp directory that writes them to disk.

use std::path::PathBuf;

use fmigrid_common::{GeneRecord, Log2Fc};
use tempfile::TempDir;

pub use pretty_assertions;

/// The three-gene panel used across scenario tests.
pub const SAMPLE_TARGETS: &[&str] = &["TP53", "BRCA1", "EGFR"];

/// A target list file body, one gene per line.
pub fn target_list(genes: &[&str]) -> String {
    let mut out = genes.join("\n");
    out.push('\n');
    out
}

/// A results table with an extra `pvalue` column in front, the way upstream
/// differential-expression output looks.
pub fn results_table(rows: &[(&str, &str)]) -> String {
    let mut out = String::from("pvalue\tGene\tlog2fc\n");
    for (gene, log2fc) in rows {
        out.push_str(&format!("0.01\t{gene}\t{log2fc}\n"));
    }
    out
}

/// The results table for the TP53/BRCA1/EGFR scenario.
pub fn sample_results_table() -> String {
    results_table(&[("TP53|v2", "2.5"), ("EGFR", "-1.5"), ("MYC", "0.3")])
}

/// The extraction expected from [`sample_results_table`] against [`SAMPLE_TARGETS`].
pub fn expected_sample_extraction() -> Vec<GeneRecord> {
    vec![
        GeneRecord::missing("BRCA1"),
        GeneRecord::new("EGFR", Log2Fc::Present(-1.5)),
        GeneRecord::new("TP53", Log2Fc::Present(2.5)),
    ]
}

/// `n` records named `G000`, `G001`, ... with alternating values.
pub fn numbered_records(n: usize) -> Vec<GeneRecord> {
    (0..n)
        .map(|i| {
            let log2fc = match i % 4 {
                0 => Log2Fc::Present(2.0),
                1 => Log2Fc::Present(-2.0),
                2 => Log2Fc::Present(0.0),
                _ => Log2Fc::Missing,
            };
            GeneRecord::new(format!("G{i:03}"), log2fc)
        })
        .collect()
}

/// A temp directory that writes fixture files.
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("create temp dir") }
    }

    /// Path of `name` inside the directory, whether or not it exists.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` to `name` and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }
}

impl Default for FixtureDir {
    fn default() -> Self { Self::new() }
}
