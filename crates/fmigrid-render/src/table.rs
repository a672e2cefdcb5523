use std::path::Path;

use fmigrid_common::fs::{persist_atomically, write_bytes_atomically};
use fmigrid_common::{FmigridError, Result};
use fmigrid_layout::{ColorBucket, LayoutGrid, LegendEntry};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info};

/// Output image format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(OutputFormat::Jpeg),
            Some("bmp") => Ok(OutputFormat::Bmp),
            Some("svg") => Ok(OutputFormat::Svg),
            _ => Err(FmigridError::InvalidParameter(format!(
                "unsupported image format for {:?}; use .png, .jpg, .bmp or .svg",
                path
            ))),
        }
    }
}

/// Pixel geometry of the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub cell_width: u32,
    pub cell_height: u32,
    pub font_size: u32,
    pub margin: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { cell_width: 120, cell_height: 32, font_size: 14, margin: 20 }
    }
}

/// Largest width or height of a rendered image, in pixels.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

fn too_large() -> FmigridError {
    FmigridError::InvalidParameter(format!(
        "table image would exceed {MAX_CANVAS_SIDE} pixels per side; \
         use fewer columns or smaller cells"
    ))
}

/// Pixel value as a drawing coordinate.
fn px<T: TryInto<i32>>(value: T) -> Result<i32> {
    value.try_into().map_err(|_| too_large())
}

impl RenderOptions {
    fn legend_line_height(&self) -> u32 {
        self.font_size * 8 / 5
    }

    fn legend_gap(&self) -> u32 {
        self.cell_height / 2
    }

    /// Rough label width; the image is only sized from it.
    fn text_width(&self, text: &str) -> Option<u32> {
        u32::try_from(text.chars().count())
            .ok()?
            .checked_mul(self.font_size)
            .map(|w| w / 5 * 3)
    }

    /// Image size for `grid` plus `legend`, rejecting zero-sized cells and
    /// anything over [`MAX_CANVAS_SIDE`].
    fn canvas_size(&self, grid: &LayoutGrid, legend: &[LegendEntry]) -> Result<(u32, u32)> {
        if self.cell_width == 0 || self.cell_height == 0 || self.font_size == 0 {
            return Err(FmigridError::InvalidParameter(
                "cell_width, cell_height and font_size must be positive".to_string(),
            ));
        }
        // Keeps every derived quantity below u32 overflow.
        if self.font_size > MAX_CANVAS_SIDE || self.margin > MAX_CANVAS_SIDE {
            return Err(too_large());
        }

        let cols = u32::try_from(grid.col_count()).map_err(|_| too_large())?;
        let rows = u32::try_from(grid.row_count()).map_err(|_| too_large())?;
        let entries = u32::try_from(legend.len()).map_err(|_| too_large())?;

        let grid_width = cols.checked_mul(self.cell_width).ok_or_else(too_large)?;
        let grid_height = rows.checked_mul(self.cell_height).ok_or_else(too_large)?;
        let legend_height = entries
            .checked_mul(self.legend_line_height())
            .ok_or_else(too_large)?;
        let mut legend_width = 0u32;
        for entry in legend {
            let w = self
                .text_width(entry.label)
                .and_then(|w| w.checked_add(self.font_size + 8))
                .ok_or_else(too_large)?;
            legend_width = legend_width.max(w);
        }

        let width = grid_width
            .max(legend_width)
            .checked_add(2 * self.margin)
            .ok_or_else(too_large)?;
        let height = grid_height
            .checked_add(self.legend_gap())
            .and_then(|h| h.checked_add(legend_height))
            .and_then(|h| h.checked_add(2 * self.margin))
            .ok_or_else(too_large)?;

        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(too_large());
        }
        Ok((width, height))
    }
}

/// Render `grid` and `legend` to `path`, picking the format from its extension.
/// Nothing is written if rendering fails.
pub fn render_table(
    grid: &LayoutGrid,
    legend: &[LegendEntry],
    path: &Path,
    options: &RenderOptions,
) -> Result<()> {
    let format = OutputFormat::from_path(path)?;
    let size = options.canvas_size(grid, legend)?;
    debug!(?format, width = size.0, height = size.1, "Rendering table");

    match format {
        OutputFormat::Svg => {
            let svg = render_svg_string(grid, legend, options)?;
            write_bytes_atomically(path, svg.as_bytes())?;
        }
        OutputFormat::Png | OutputFormat::Jpeg | OutputFormat::Bmp => {
            persist_atomically(path, |tmp| {
                let root = BitMapBackend::new(tmp, size).into_drawing_area();
                draw_table(&root, grid, legend, options)
            })?;
        }
    }

    info!(
        path = %path.display(),
        rows = grid.row_count(),
        cols = grid.col_count(),
        "Wrote table image"
    );
    Ok(())
}

/// Render to an SVG document in memory.
pub fn render_svg_string(
    grid: &LayoutGrid,
    legend: &[LegendEntry],
    options: &RenderOptions,
) -> Result<String> {
    let size = options.canvas_size(grid, legend)?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_table(&root, grid, legend, options)?;
    }
    Ok(svg)
}

fn render_err<E: std::fmt::Display>(e: E) -> FmigridError {
    FmigridError::Render(e.to_string())
}

fn bucket_color(bucket: ColorBucket) -> RGBColor {
    let (r, g, b) = bucket.rgb();
    RGBColor(r, g, b)
}

fn draw_table<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &LayoutGrid,
    legend: &[LegendEntry],
    options: &RenderOptions,
) -> Result<()> {
    // Every coordinate below is bounded by the validated canvas size.
    options.canvas_size(grid, legend)?;
    root.fill(&WHITE).map_err(render_err)?;

    let margin = px(options.margin)?;
    let cell_w = px(options.cell_width)?;
    let cell_h = px(options.cell_height)?;
    let font_size = f64::from(options.font_size);

    // --- Cells ---
    let cell_font = ("sans-serif", font_size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (r, row) in grid.rows().iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let x0 = margin + px(c)? * cell_w;
            let y0 = margin + px(r)? * cell_h;
            let (x1, y1) = (x0 + cell_w, y0 + cell_h);

            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], bucket_color(cell.color).filled()))
                .map_err(render_err)?;
            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], BLACK.stroke_width(1)))
                .map_err(render_err)?;

            if !cell.is_empty() {
                root.draw(&Text::new(
                    cell.text.clone(),
                    ((x0 + x1) / 2, (y0 + y1) / 2),
                    cell_font.clone(),
                ))
                .map_err(render_err)?;
            }
        }
    }

    // --- Legend ---
    let label_font = ("sans-serif", font_size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let swatch = px(options.font_size)?;
    let line_h = px(options.legend_line_height())?;
    let legend_top = margin + px(grid.row_count())? * cell_h + px(options.legend_gap())?;

    for (i, entry) in legend.iter().enumerate() {
        let y0 = legend_top + px(i)? * line_h;
        let corners = [(margin, y0), (margin + swatch, y0 + swatch)];

        root.draw(&Rectangle::new(corners, bucket_color(entry.bucket).filled()))
            .map_err(render_err)?;
        root.draw(&Rectangle::new(corners, RED.stroke_width(1)))
            .map_err(render_err)?;
        root.draw(&Text::new(
            entry.label.to_string(),
            (margin + swatch + 8, y0 + swatch / 2),
            label_font.clone(),
        ))
        .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use fmigrid_layout::{layout, legend};
    use fmigrid_test_utils::{expected_sample_extraction, numbered_records, FixtureDir};

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("fmi_table.png")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("t.JPEG")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("t.jpg")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("t.bmp")).unwrap(), OutputFormat::Bmp);
        assert_eq!(OutputFormat::from_path(Path::new("out/t.svg")).unwrap(), OutputFormat::Svg);
    }

    #[test]
    fn test_unknown_format_rejected() {
        for name in ["table.pdf", "table"] {
            let err = OutputFormat::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, FmigridError::InvalidParameter(_)), "{name}: {err:?}");
        }
    }

    #[test]
    fn test_canvas_grows_with_grid() {
        let options = RenderOptions::default();
        let small = layout(&numbered_records(10), 10).unwrap();
        let tall = layout(&numbered_records(40), 10).unwrap();
        let (w_small, h_small) = options.canvas_size(&small, &legend()).unwrap();
        let (w_tall, h_tall) = options.canvas_size(&tall, &legend()).unwrap();
        assert_eq!(w_small, w_tall);
        assert_eq!(h_tall - h_small, 3 * options.cell_height);
        assert!(w_small >= 10 * options.cell_width);
    }

    #[test]
    fn test_svg_contains_cells_and_legend() {
        let grid = layout(&expected_sample_extraction(), 2).unwrap();
        let svg = render_svg_string(&grid, &legend(), &RenderOptions::default()).unwrap();

        for gene in ["BRCA1", "EGFR", "TP53"] {
            assert!(svg.contains(gene), "missing {gene}");
        }
        for entry in legend() {
            assert!(svg.contains(entry.label), "missing {}", entry.label);
        }
        let lower = svg.to_ascii_lowercase();
        assert!(lower.contains("#ffa500"), "orange cell missing");
        assert!(lower.contains("#00ffff"), "aqua cell missing");
        assert!(lower.contains("#808080"), "grey cell missing");
    }

    #[test]
    fn test_render_svg_file() {
        let dir = FixtureDir::new();
        let path = dir.join("fmi_table.svg");
        let grid = layout(&numbered_records(7), 3).unwrap();
        render_table(&grid, &legend(), &path, &RenderOptions::default()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("G006"));
    }

    #[test]
    fn test_unsupported_extension_writes_nothing() {
        let dir = FixtureDir::new();
        let path = dir.join("fmi_table.pdf");
        let grid = layout(&numbered_records(3), 3).unwrap();
        let err = render_table(&grid, &legend(), &path, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, FmigridError::InvalidParameter(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_oversized_cells_rejected() {
        let dir = FixtureDir::new();
        let path = dir.join("fmi_table.png");
        let grid = layout(&numbered_records(3), 3).unwrap();
        let options = RenderOptions { cell_width: 2_000_000_000, ..Default::default() };

        let err = render_svg_string(&grid, &legend(), &options).unwrap_err();
        assert!(matches!(err, FmigridError::InvalidParameter(_)), "{err:?}");
        let err = render_table(&grid, &legend(), &path, &options).unwrap_err();
        assert!(matches!(err, FmigridError::InvalidParameter(_)), "{err:?}");
        assert!(!path.exists());
    }

    #[test]
    fn test_canvas_size_limits() {
        let options = RenderOptions::default();
        let wide = layout(&numbered_records(200), 200).unwrap();
        let err = options.canvas_size(&wide, &legend()).unwrap_err();
        assert!(matches!(err, FmigridError::InvalidParameter(_)));

        let zero = RenderOptions { cell_height: 0, ..Default::default() };
        let grid = layout(&numbered_records(3), 3).unwrap();
        assert!(zero.canvas_size(&grid, &legend()).is_err());

        let huge_margin = RenderOptions { margin: u32::MAX, ..Default::default() };
        assert!(huge_margin.canvas_size(&grid, &legend()).is_err());
    }

    #[test]
    fn test_render_bitmap_files() {
        let dir = FixtureDir::new();
        let grid = layout(&expected_sample_extraction(), 2).unwrap();
        let cases: [(&str, &[u8]); 3] = [
            ("fmi_table.png", b"\x89PNG\r\n\x1a\n"),
            ("fmi_table.jpg", &[0xFF, 0xD8, 0xFF]),
            ("fmi_table.bmp", b"BM"),
        ];

        for (name, magic) in cases {
            let path = dir.join(name);
            render_table(&grid, &legend(), &path, &RenderOptions::default()).unwrap();
            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.starts_with(magic), "{name} has wrong header");
        }
        let entries = std::fs::read_dir(dir.join("")).unwrap().count();
        assert_eq!(entries, cases.len(), "temp files left behind");
    }
}
