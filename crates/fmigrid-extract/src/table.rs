//! Tab-separated gene tables.
//!
//! Input tables need a header with at least `Gene` and `log2fc`; other
//! columns are ignored. Output tables carry exactly those two columns.

use std::io::{Read, Write};
use std::path::Path;

use csv::StringRecord;
use fmigrid_common::fs::persist_atomically;
use fmigrid_common::{FmigridError, GeneRecord, Log2Fc, Result};
use tracing::{debug, info};

pub const GENE_COLUMN: &str = "Gene";
pub const LOG2FC_COLUMN: &str = "log2fc";

/// Read a gene table from disk.
pub fn read_gene_table(path: &Path) -> Result<Vec<GeneRecord>> {
    let file = std::fs::File::open(path).map_err(|e| FmigridError::file_read(path, e))?;
    let records = parse_gene_table(file)?;
    info!(path = %path.display(), rows = records.len(), "Loaded gene table");
    Ok(records)
}

/// Parse a gene table from any reader.
pub fn parse_gene_table<R: Read>(reader: R) -> Result<Vec<GeneRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let (gene_idx, log2fc_idx) = locate_columns(&headers)?;
    debug!(gene_idx, log2fc_idx, "Located required columns");

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let field = |idx: usize, name: &str| {
            record.get(idx).ok_or_else(|| {
                FmigridError::Schema(format!("line {line}: row has no {name} field"))
            })
        };
        let gene = field(gene_idx, GENE_COLUMN)?;
        let raw = field(log2fc_idx, LOG2FC_COLUMN)?;

        let log2fc = raw.parse::<Log2Fc>().map_err(|_| {
            FmigridError::Schema(format!("line {line}: {LOG2FC_COLUMN} value {raw:?} is not a number"))
        })?;

        records.push(GeneRecord::new(gene, log2fc));
    }

    Ok(records)
}

fn locate_columns(headers: &StringRecord) -> Result<(usize, usize)> {
    let find = |name: &str| headers.iter().position(|h| h == name);

    match (find(GENE_COLUMN), find(LOG2FC_COLUMN)) {
        (Some(gene), Some(log2fc)) => Ok((gene, log2fc)),
        (gene, log2fc) => {
            let missing: Vec<&str> = [(gene, GENE_COLUMN), (log2fc, LOG2FC_COLUMN)]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, name)| name)
                .collect();
            Err(FmigridError::Schema(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )))
        }
    }
}

/// Write a normalised two-column table to `path`. Either the whole table is
/// written or the destination is left untouched.
pub fn write_gene_table(path: &Path, records: &[GeneRecord]) -> Result<()> {
    persist_atomically(path, |tmp| {
        let file = std::fs::File::create(tmp)?;
        write_gene_table_to(file, records)
    })?;
    info!(path = %path.display(), rows = records.len(), "Wrote gene table");
    Ok(())
}

/// Write a normalised two-column table to any writer.
pub fn write_gene_table_to<W: Write>(writer: W, records: &[GeneRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    writer.write_record([GENE_COLUMN, LOG2FC_COLUMN])?;
    for record in records {
        let log2fc = record.log2fc.to_string();
        writer.write_record([record.gene.as_str(), log2fc.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
