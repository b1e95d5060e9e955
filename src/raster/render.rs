//! Single-band figure rendering
//!
//! The band is linearly stretched between its valid extremes, mapped through
//! viridis, and drawn with equal aspect into the axes rectangle of a white canvas.
//! Nearest-neighbour sampling keeps individual pixels visible when upscaling.

use crate::io::configuration::{AXES_RECT, FIGURE_HEIGHT_PX, FIGURE_WIDTH_PX};
use crate::io::error::VisualizationError;
use crate::math::stretch::{Stretch, is_valid};
use crate::raster::colormap::viridis;
use crate::raster::dataset::Band;
use image::{Rgba, RgbaImage};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FRAME: Rgba<u8> = Rgba([0, 0, 0, 255]);
const NO_DATA: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Canvas size and axes placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureLayout {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Axes rectangle as fractions of the canvas: left, bottom, width, height
    pub axes: [f64; 4],
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self {
            width: FIGURE_WIDTH_PX,
            height: FIGURE_HEIGHT_PX,
            axes: AXES_RECT,
        }
    }
}

/// Pixel rectangle the band occupies on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Drawn width
    pub width: u32,
    /// Drawn height
    pub height: u32,
}

/// A finished figure ready for export
#[derive(Debug, Clone)]
pub struct RenderedFigure {
    /// Canvas pixels
    pub image: RgbaImage,
    /// Descriptive title of the figure
    pub title: String,
    /// Value range mapped onto the colormap
    pub stretch: Stretch,
    /// Where the band was drawn
    pub placement: Placement,
}

impl FigureLayout {
    /// Fit a `cols × rows` band inside the axes rectangle, preserving aspect ratio
    pub fn place(&self, cols: usize, rows: usize) -> Option<Placement> {
        if cols == 0 || rows == 0 {
            return None;
        }
        let [left, bottom, axes_w, axes_h] = self.axes;
        let canvas_w = f64::from(self.width);
        let canvas_h = f64::from(self.height);
        let avail_w = axes_w * canvas_w;
        let avail_h = axes_h * canvas_h;

        let scale = (avail_w / cols as f64).min(avail_h / rows as f64);
        let drawn_w = (cols as f64 * scale).floor().max(1.0);
        let drawn_h = (rows as f64 * scale).floor().max(1.0);

        // Axes origin is bottom-left; the canvas origin is top-left
        let axes_x = left * canvas_w;
        let axes_top = canvas_h - (bottom + axes_h) * canvas_h;
        let x = axes_x + (avail_w - drawn_w) / 2.0;
        let y = axes_top + (avail_h - drawn_h) / 2.0;

        (x >= 0.0 && y >= 0.0 && x + drawn_w <= canvas_w && y + drawn_h <= canvas_h).then(|| {
            Placement {
                x: x.round() as u32,
                y: y.round() as u32,
                width: drawn_w as u32,
                height: drawn_h as u32,
            }
        })
    }
}

/// Render `band` into a titled figure
///
/// # Errors
///
/// Returns an error if:
/// - The band is empty
/// - The band has no valid (finite, non-nodata) samples
/// - The layout leaves no room for the band
pub fn render_band(
    band: &Band,
    nodata: Option<f64>,
    title: &str,
    layout: &FigureLayout,
) -> Result<RenderedFigure, VisualizationError> {
    let (rows, cols) = band.data.dim();
    if rows == 0 || cols == 0 {
        return Err(VisualizationError::Render {
            reason: format!("band {} is empty", band.index),
        });
    }

    let stretch =
        Stretch::from_samples(band.data.iter(), nodata).ok_or_else(|| VisualizationError::Render {
            reason: format!("band {} has no valid samples", band.index),
        })?;

    let placement = layout
        .place(cols, rows)
        .ok_or_else(|| VisualizationError::Render {
            reason: format!(
                "{}x{} canvas has no room for the axes",
                layout.width, layout.height
            ),
        })?;

    let mut image = RgbaImage::from_pixel(layout.width, layout.height, BACKGROUND);

    for dy in 0..placement.height {
        let row = ((u64::from(dy) * rows as u64) / u64::from(placement.height)) as usize;
        for dx in 0..placement.width {
            let col = ((u64::from(dx) * cols as u64) / u64::from(placement.width)) as usize;
            let value = band.data.get((row, col)).copied().unwrap_or(f64::NAN);
            let color = if is_valid(value, nodata) {
                Rgba(viridis(stretch.normalize(value)))
            } else {
                NO_DATA
            };
            image.put_pixel(placement.x + dx, placement.y + dy, color);
        }
    }

    draw_frame(&mut image, &placement);

    Ok(RenderedFigure {
        image,
        title: title.to_string(),
        stretch,
        placement,
    })
}

// One-pixel border just outside the drawn band, clipped to the canvas
fn draw_frame(image: &mut RgbaImage, placement: &Placement) {
    let left = i64::from(placement.x) - 1;
    let top = i64::from(placement.y) - 1;
    let right = i64::from(placement.x) + i64::from(placement.width);
    let bottom = i64::from(placement.y) + i64::from(placement.height);

    let mut plot = |x: i64, y: i64| {
        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
            if x < image.width() && y < image.height() {
                image.put_pixel(x, y, FRAME);
            }
        }
    };

    for x in left..=right {
        plot(x, top);
        plot(x, bottom);
    }
    for y in top..=bottom {
        plot(left, y);
        plot(right, y);
    }
}
