//! Filtering a results table down to the target panel.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use fmigrid_common::{GeneRecord, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::targets::{load_targets, TargetSet};

/// Primary alias of a compound gene identifier: `"TP53|p53"` → `"TP53"`.
pub fn normalize_gene_id(raw: &str) -> &str {
    raw.split('|').next().unwrap_or(raw)
}

/// Counts describing one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionSummary {
    /// Rows in the input table
    pub input_rows: usize,
    /// Input rows whose gene is a target
    pub matched: usize,
    /// Placeholder rows for targets absent from the input
    pub synthesized: usize,
    /// Targets matched by more than one input row
    pub duplicates: Vec<String>,
}

/// Normalised table plus the counts that produced it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<GeneRecord>,
    pub summary: ExtractionSummary,
}

/// Extracts a fixed target panel from results tables.
#[derive(Debug, Clone)]
pub struct TargetExtractor {
    targets: TargetSet,
}

impl TargetExtractor {
    pub fn new(targets: TargetSet) -> Self {
        Self { targets }
    }

    /// Build from a target list file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(load_targets(path)?))
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// Reduce `input` to one row per target, sorted by gene.
    ///
    /// Input rows that normalise to the same target are all kept; they are
    /// listed in `summary.duplicates` rather than merged.
    pub fn extract(&self, input: &[GeneRecord]) -> Extraction {
        let mut records: Vec<GeneRecord> = input
            .iter()
            .filter_map(|row| {
                let gene = normalize_gene_id(&row.gene);
                self.targets
                    .contains(gene)
                    .then(|| GeneRecord::new(gene, row.log2fc))
            })
            .collect();
        let matched = records.len();

        let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &records {
            *occurrences.entry(record.gene.as_str()).or_default() += 1;
        }
        let duplicates: Vec<String> = occurrences
            .iter()
            .filter(|(_, n)| **n > 1)
            .map(|(gene, _)| gene.to_string())
            .collect();

        let seen: BTreeSet<&str> = occurrences.keys().copied().collect();
        let synthesized: Vec<GeneRecord> = self
            .targets
            .iter()
            .filter(|gene| !seen.contains(gene.as_str()))
            .map(|gene| GeneRecord::missing(gene.clone()))
            .collect();

        let summary = ExtractionSummary {
            input_rows: input.len(),
            matched,
            synthesized: synthesized.len(),
            duplicates,
        };

        records.extend(synthesized);
        records.sort_by(|a, b| a.gene.cmp(&b.gene));

        if !summary.duplicates.is_empty() {
            warn!(
                genes = ?summary.duplicates,
                "Target genes matched more than one input row; all rows kept"
            );
        }
        info!(
            input_rows = summary.input_rows,
            matched = summary.matched,
            synthesized = summary.synthesized,
            "Extracted target panel"
        );

        Extraction { records, summary }
    }
}

/// Reduce `input` to the genes in `targets`; see [`TargetExtractor::extract`].
pub fn extract_targets(input: &[GeneRecord], targets: &TargetSet) -> Vec<GeneRecord> {
    TargetExtractor::new(targets.clone()).extract(input).records
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::parse_targets;
    use fmigrid_common::Log2Fc;
    use fmigrid_test_utils::{expected_sample_extraction, target_list, SAMPLE_TARGETS};
    use pretty_assertions::assert_eq;

    fn sample_targets() -> TargetSet {
        parse_targets(&target_list(SAMPLE_TARGETS))
    }

    #[test]
    fn test_normalize_gene_id() {
        assert_eq!(normalize_gene_id("TP53|v2"), "TP53");
        assert_eq!(normalize_gene_id("TP53|v2|v3"), "TP53");
        assert_eq!(normalize_gene_id("EGFR"), "EGFR");
        assert_eq!(normalize_gene_id("|EGFR"), "");
        assert_eq!(normalize_gene_id(""), "");
    }

    #[test]
    fn test_scenario_tp53_brca1_egfr() {
        let input = vec![
            GeneRecord::new("TP53|v2", Log2Fc::Present(2.5)),
            GeneRecord::new("EGFR", Log2Fc::Present(-1.5)),
        ];
        let records = extract_targets(&input, &sample_targets());
        assert_eq!(records, expected_sample_extraction());
    }

    #[test]
    fn test_non_targets_dropped() {
        let input = vec![
            GeneRecord::new("MYC", Log2Fc::Present(4.0)),
            GeneRecord::new("EGFR", Log2Fc::Present(0.2)),
        ];
        let extraction = TargetExtractor::new(sample_targets()).extract(&input);
        assert!(extraction.records.iter().all(|r| r.gene != "MYC"));
        assert_eq!(extraction.summary.matched, 1);
        assert_eq!(extraction.summary.synthesized, 2);
        assert_eq!(extraction.summary.input_rows, 2);
    }

    #[test]
    fn test_every_target_once_sorted() {
        let targets = parse_targets("ZNF1\nALK\nMET\nBRAF\n");
        let input = vec![
            GeneRecord::new("MET|c-Met", Log2Fc::Present(1.2)),
            GeneRecord::new("KRAS", Log2Fc::Present(0.0)),
        ];
        let records = extract_targets(&input, &targets);
        let genes: Vec<&str> = records.iter().map(|r| r.gene.as_str()).collect();
        assert_eq!(genes, vec!["ALK", "BRAF", "MET", "ZNF1"]);
        assert_eq!(records.len(), targets.len());
    }

    #[test]
    fn test_empty_targets_give_empty_table() {
        let input = vec![GeneRecord::new("TP53", Log2Fc::Present(2.0))];
        assert!(extract_targets(&input, &TargetSet::new()).is_empty());
    }

    #[test]
    fn test_no_input_rows_all_missing() {
        let records = extract_targets(&[], &sample_targets());
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.log2fc.is_missing()));
    }

    #[test]
    fn test_duplicates_are_kept_and_reported() {
        let input = vec![
            GeneRecord::new("TP53|a", Log2Fc::Present(2.5)),
            GeneRecord::new("TP53|b", Log2Fc::Present(-0.5)),
        ];
        let extraction = TargetExtractor::new(sample_targets()).extract(&input);
        assert_eq!(extraction.records.len(), 4);
        assert_eq!(extraction.summary.duplicates, vec!["TP53".to_string()]);

        // Stable sort keeps input order among equal genes
        let tp53: Vec<Log2Fc> = extraction
            .records
            .iter()
            .filter(|r| r.gene == "TP53")
            .map(|r| r.log2fc)
            .collect();
        assert_eq!(tp53, vec![Log2Fc::Present(2.5), Log2Fc::Present(-0.5)]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let input = vec![GeneRecord::new("tp53", Log2Fc::Present(3.0))];
        let records = extract_targets(&input, &sample_targets());
        let tp53 = records.iter().find(|r| r.gene == "TP53").unwrap();
        assert!(tp53.log2fc.is_missing());
    }
}
