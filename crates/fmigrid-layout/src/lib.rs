//! Grid layout and color classification for target panels.
//!
//! A normalised table is laid out row-major into a fixed number of columns;
//! each cell is colored by the fold change of its gene.
//!
//! # Color buckets
//!
//! | log2fc | bucket | color |
//! |--------|--------|-------|
//! | > 1 | over-expressed | orange |
//! | < -1 | under-expressed | aqua |
//! | -1 ..= 1 | unchanged | white |
//! | missing | not detected | grey |

pub mod classify;
pub mod grid;
pub mod legend;

pub use classify::{classify, ColorBucket, FOLD_CHANGE_THRESHOLD};
pub use grid::{column_count, layout, GridCell, LayoutGrid};
pub use legend::{legend, LegendEntry};
