//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "fmigrid",
    version,
    about = "Extracts FMI target genes from expression tables and plots them as a colored grid"
)]
pub struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extracts FMI targets from a results table
    Extract(ExtractArgs),
    /// Generates a table image with expression colors for the FMI targets
    Plot(PlotArgs),
    /// Extracts FMI targets and plots them in one go
    Report(ReportArgs),
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// The input table. This table must have a Gene and a log2fc column.
    #[arg(short, long, value_name = "FILE")]
    pub infile: PathBuf,

    /// A file listing FMI target genes one per line [default: targets.gene_list from fmigrid.toml]
    #[arg(short, long, value_name = "FILE")]
    pub fmifile: Option<PathBuf>,

    /// Output table [default: the input name with `_fmi` before `.tsv`]
    #[arg(short, long, value_name = "FILE")]
    pub outfile: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PlotArgs {
    /// The input table. This table must have a Gene and a log2fc column.
    #[arg(short, long, value_name = "FILE")]
    pub infile: PathBuf,

    #[command(flatten)]
    pub figure: FigureArgs,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// The input table. This table must have a Gene and a log2fc column.
    #[arg(short, long, value_name = "FILE")]
    pub infile: PathBuf,

    /// A file listing FMI target genes one per line [default: targets.gene_list from fmigrid.toml]
    #[arg(short, long, value_name = "FILE")]
    pub fmifile: Option<PathBuf>,

    /// Extracted table [default: the input name with `_fmi` before `.tsv`]
    #[arg(short, long, value_name = "FILE")]
    pub table: Option<PathBuf>,

    #[command(flatten)]
    pub figure: FigureArgs,
}

/// Options shared by every command that draws the grid.
#[derive(Debug, Args)]
pub struct FigureArgs {
    /// The figure to generate. The extension selects the format (png, jpg, bmp, svg)
    /// [default: plot.outfile from fmigrid.toml, else fmi_table.png]
    #[arg(short, long, value_name = "FILE")]
    pub outfile: Option<PathBuf>,

    /// The number of columns in the resulting table [default: plot.columns, else 10]
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub colnum: Option<i64>,

    /// Also write the laid-out grid and legend as JSON
    #[arg(long, value_name = "FILE")]
    pub grid_json: Option<PathBuf>,
}
