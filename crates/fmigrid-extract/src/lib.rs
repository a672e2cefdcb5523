//! Target gene extraction.
//!
//! Reduces a differential-expression results table to the genes of a fixed
//! target panel:
//!
//! 1. gene identifiers are normalised to their primary alias (`TP53|v2` → `TP53`),
//! 2. rows whose gene is not a target are dropped,
//! 3. every target without a row gets a placeholder with a missing `log2fc`,
//! 4. the result is sorted by gene.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use fmigrid_extract::{read_gene_table, write_gene_table, TargetExtractor};
//!
//! fn main() -> fmigrid_common::Result<()> {
//!     let extractor = TargetExtractor::from_path(Path::new("fmi_gene_list.txt"))?;
//!     let input = read_gene_table(Path::new("sample.tsv"))?;
//!     let extraction = extractor.extract(&input);
//!     write_gene_table(Path::new("sample_fmi.tsv"), &extraction.records)?;
//!     Ok(())
//! }
//! ```

pub mod extractor;
pub mod output;
pub mod table;
pub mod targets;

pub use extractor::{extract_targets, normalize_gene_id, Extraction, ExtractionSummary, TargetExtractor};
pub use output::derive_output_path;
pub use table::{parse_gene_table, read_gene_table, write_gene_table, write_gene_table_to, GENE_COLUMN, LOG2FC_COLUMN};
pub use targets::{load_targets, parse_targets, TargetSet};
