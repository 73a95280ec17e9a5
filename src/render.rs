//! Pattern rasterization to image buffers

use crate::color::Rgb;
use crate::models::DEFAULT_CELL_SIZE;
use crate::pattern::PatternStore;
use crate::threading::visible_color;
use image::RgbaImage;
use thiserror::Error;

/// Grid line color used when none is configured.
pub const DEFAULT_GRID_COLOR: Rgb = Rgb::new(200, 200, 200);

/// Largest accepted cell edge in pixels.
pub const MAX_CELL_SIZE: u32 = 200;

/// Largest accepted border width in pixels.
pub const MAX_BORDER: u32 = 1000;

/// Error type for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("cell size {0} is out of range (1-{max})", max = MAX_CELL_SIZE)]
    CellSize(u32),
    #[error("border {0} is out of range (0-{max})", max = MAX_BORDER)]
    Border(u32),
    #[error("image size overflows for a {width}x{height} pattern")]
    TooLarge { width: usize, height: usize },
}

/// How to draw a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Edge length of one cell in pixels.
    pub cell_size: u32,
    /// Color of the one-pixel lines between cells, or `None` for no grid.
    pub grid: Option<Rgb>,
    /// Width of the warp-colored frame around the pattern.
    pub border: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { cell_size: DEFAULT_CELL_SIZE, grid: Some(DEFAULT_GRID_COLOR), border: 0 }
    }
}

/// Render the visible face of the weave.
///
/// Each cell shows the weft selected by the threading rule. The image is
/// filled with `warp` first, so the border shows the warp color. Grid lines
/// are drawn on every cell edge, adding one pixel to each dimension.
///
/// # Examples
///
/// ```
/// use krokbragd::color::DEFAULT_WARP;
/// use krokbragd::pattern::PatternStore;
/// use krokbragd::render::{render_pattern, RenderOptions};
///
/// let store = PatternStore::new(4, 2);
/// let options = RenderOptions { cell_size: 10, grid: None, border: 0 };
/// let image = render_pattern(&store, DEFAULT_WARP, &options).unwrap();
/// assert_eq!(image.dimensions(), (40, 20));
/// ```
///
/// # Errors
///
/// Fails when the cell size or border is out of range, or the image
/// dimensions do not fit in a `u32`.
pub fn render_pattern(store: &PatternStore, warp: Rgb, options: &RenderOptions) -> Result<RgbaImage, RenderError> {
    let cell = options.cell_size;
    if !(1..=MAX_CELL_SIZE).contains(&cell) {
        return Err(RenderError::CellSize(cell));
    }
    if options.border > MAX_BORDER {
        return Err(RenderError::Border(options.border));
    }
    let too_large = || RenderError::TooLarge { width: store.width(), height: store.height() };
    let width = u32::try_from(store.width()).map_err(|_| too_large())?;
    let height = u32::try_from(store.height()).map_err(|_| too_large())?;
    let line = u32::from(options.grid.is_some());
    let frame = options.border.checked_mul(2).and_then(|b| b.checked_add(line)).ok_or_else(too_large)?;
    let image_width = width.checked_mul(cell).and_then(|w| w.checked_add(frame)).ok_or_else(too_large)?;
    let image_height = height.checked_mul(cell).and_then(|h| h.checked_add(frame)).ok_or_else(too_large)?;

    let mut image = RgbaImage::from_pixel(image_width, image_height, warp.to_rgba());
    let origin = options.border;

    for row in 0..store.height() {
        for col in 0..store.width() {
            let pixel = visible_color(store, row, col).to_rgba();
            let x0 = origin + col as u32 * cell;
            let y0 = origin + row as u32 * cell;
            for y in y0..y0 + cell {
                for x in x0..x0 + cell {
                    image.put_pixel(x, y, pixel);
                }
            }
        }
    }

    if let Some(grid) = options.grid {
        let pixel = grid.to_rgba();
        let right = origin + width * cell;
        let bottom = origin + height * cell;
        for col in 0..=width {
            let x = origin + col * cell;
            for y in origin..=bottom {
                image.put_pixel(x, y, pixel);
            }
        }
        for row in 0..=height {
            let y = origin + row * cell;
            for x in origin..=right {
                image.put_pixel(x, y, pixel);
            }
        }
    }

    tracing::debug!(width = image_width, height = image_height, "rendered pattern");
    Ok(image)
}
