//! Drawing a laid-out target panel.
//!
//! The image is the grid of gene cells followed by the color legend. The
//! output format follows the file extension (`png`, `jpg`/`jpeg`, `bmp`,
//! `svg`). A JSON dump of the same grid is available for other surfaces.

pub mod json;
pub mod table;

pub use json::dump_grid_json;
pub use table::{render_svg_string, render_table, OutputFormat, RenderOptions};
