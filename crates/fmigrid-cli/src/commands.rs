//! Subcommand execution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fmigrid_common::GeneRecord;
use fmigrid_config::Config;
use fmigrid_extract::{derive_output_path, read_gene_table, write_gene_table, TargetExtractor};
use fmigrid_layout::{column_count, layout, legend};
use fmigrid_render::{dump_grid_json, render_table, OutputFormat, RenderOptions};
use thiserror::Error;
use tracing::info;

use crate::cli::{Command, ExtractArgs, FigureArgs, PlotArgs, ReportArgs};

/// An input file that is not there; reported without a backtrace.
#[derive(Debug, Error)]
#[error("ERROR: Cannot read {what} file")]
pub struct MissingInput {
    pub what: &'static str,
    pub path: PathBuf,
}

fn require_file(path: &Path, what: &'static str) -> Result<(), MissingInput> {
    if path.is_file() {
        Ok(())
    } else {
        Err(MissingInput { what, path: path.to_path_buf() })
    }
}

pub fn run(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::Extract(args) => run_extract(args, config).map(|_| ()),
        Command::Plot(args) => run_plot(args, config),
        Command::Report(args) => run_report(args, config),
    }
}

/// Validated plot settings, resolved against the config.
struct Figure {
    outfile: PathBuf,
    col_count: usize,
    grid_json: Option<PathBuf>,
    options: RenderOptions,
}

impl Figure {
    /// Checks everything that can fail before any output is written.
    fn resolve(args: &FigureArgs, config: &Config) -> Result<Self> {
        let outfile = args.outfile.clone().unwrap_or_else(|| config.plot.outfile.clone());
        OutputFormat::from_path(&outfile)?;
        let col_count = column_count(args.colnum.unwrap_or(config.plot.columns))?;

        Ok(Self {
            outfile,
            col_count,
            grid_json: args.grid_json.clone(),
            options: RenderOptions {
                cell_width: config.plot.cell_width,
                cell_height: config.plot.cell_height,
                font_size: config.plot.font_size,
                margin: config.plot.margin,
            },
        })
    }

    fn draw(&self, records: &[GeneRecord]) -> Result<()> {
        let grid = layout(records, self.col_count)?;
        let legend = legend();

        render_table(&grid, &legend, &self.outfile, &self.options)
            .with_context(|| format!("rendering {}", self.outfile.display()))?;
        if let Some(ref json_path) = self.grid_json {
            dump_grid_json(&grid, &legend, json_path)
                .with_context(|| format!("writing grid JSON {}", json_path.display()))?;
        }
        Ok(())
    }
}

fn extract_records(infile: &Path, fmifile: Option<&Path>, config: &Config) -> Result<Vec<GeneRecord>> {
    require_file(infile, "input")?;
    let fmifile = fmifile.unwrap_or(config.targets.gene_list.as_path());
    require_file(fmifile, "FMI targets")?;

    let extractor = TargetExtractor::from_path(fmifile)
        .with_context(|| format!("loading targets from {}", fmifile.display()))?;
    let input = read_gene_table(infile)
        .with_context(|| format!("reading {}", infile.display()))?;
    Ok(extractor.extract(&input).records)
}

fn write_table(infile: &Path, outfile: Option<&Path>, records: &[GeneRecord], config: &Config) -> Result<PathBuf> {
    let outfile = outfile
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derive_output_path(infile, &config.extract.output_suffix));
    write_gene_table(&outfile, records)
        .with_context(|| format!("writing {}", outfile.display()))?;
    Ok(outfile)
}

pub fn run_extract(args: &ExtractArgs, config: &Config) -> Result<PathBuf> {
    let records = extract_records(&args.infile, args.fmifile.as_deref(), config)?;
    let outfile = write_table(&args.infile, args.outfile.as_deref(), &records, config)?;
    info!(out = %outfile.display(), genes = records.len(), "Extraction finished");
    Ok(outfile)
}

pub fn run_plot(args: &PlotArgs, config: &Config) -> Result<()> {
    require_file(&args.infile, "input")?;
    let figure = Figure::resolve(&args.figure, config)?;

    let records = read_gene_table(&args.infile)
        .with_context(|| format!("reading {}", args.infile.display()))?;
    figure.draw(&records)?;

    info!(out = %figure.outfile.display(), genes = records.len(), "Plot finished");
    Ok(())
}

pub fn run_report(args: &ReportArgs, config: &Config) -> Result<()> {
    let figure = Figure::resolve(&args.figure, config)?;
    let records = extract_records(&args.infile, args.fmifile.as_deref(), config)?;
    // The table goes last, so a failed drawing leaves no table behind.
    figure.draw(&records)?;
    let table = write_table(&args.infile, args.table.as_deref(), &records, config)?;

    info!(
        table = %table.display(),
        image = %figure.outfile.display(),
        genes = records.len(),
        "Report finished"
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
