use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::errors::InvalidArgument;

/// Linear mapping between a `width x height` pixel grid and a viewport.
///
/// Column 0 maps to `real_min`, column `width - 1` to `real_max`. Rows run
/// downward while the imaginary axis runs upward, so row 0 maps to `imag_max`
/// and row `height - 1` to `imag_min`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelMapping {
    viewport: Viewport,
    pixel_rect: PixelRect,
}

impl PixelMapping {
    pub fn new(viewport: Viewport, width: u32, height: u32) -> Result<Self, InvalidArgument> {
        Ok(Self {
            viewport,
            pixel_rect: PixelRect::from_size(width, height)?,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_rect.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_rect.height()
    }

    pub fn pixel_to_complex(&self, pixel: Point) -> Result<Complex, InvalidArgument> {
        if !self.pixel_rect.contains_point(pixel) {
            return Err(InvalidArgument::PixelOutsideGrid {
                point: pixel,
                width: self.width(),
                height: self.height(),
            });
        }

        Ok(self.subpixel_to_complex(f64::from(pixel.x), f64::from(pixel.y)))
    }

    /// Same mapping for fractional pixel coordinates. No bounds check.
    #[must_use]
    pub fn subpixel_to_complex(&self, x: f64, y: f64) -> Complex {
        let last_col = f64::from(self.width() - 1);
        let last_row = f64::from(self.height() - 1);

        Complex {
            real: self.viewport.real_min() + (x / last_col) * self.viewport.width(),
            imag: self.viewport.imag_max() - (y / last_row) * self.viewport.height(),
        }
    }

    /// Exact inverse of [`subpixel_to_complex`](Self::subpixel_to_complex).
    #[must_use]
    pub fn complex_to_pixel(&self, point: Complex) -> (f64, f64) {
        let last_col = f64::from(self.width() - 1);
        let last_row = f64::from(self.height() - 1);

        (
            (point.real - self.viewport.real_min()) / self.viewport.width() * last_col,
            (self.viewport.imag_max() - point.imag) / self.viewport.height() * last_row,
        )
    }

    /// The grid pixel closest to `point`, or `None` when it falls off the grid.
    #[must_use]
    pub fn complex_to_nearest_pixel(&self, point: Complex) -> Option<Point> {
        let (x, y) = self.complex_to_pixel(point);

        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let x = x.round();
        let y = y.round();

        if x < 0.0 || y < 0.0 || x > f64::from(self.width() - 1) || y > f64::from(self.height() - 1)
        {
            return None;
        }

        Some(Point {
            x: x as i32,
            y: y as i32,
        })
    }
}

/// One-shot form of [`PixelMapping::pixel_to_complex`].
pub fn pixel_to_complex(
    viewport: Viewport,
    width: u32,
    height: u32,
    col: i32,
    row: i32,
) -> Result<Complex, InvalidArgument> {
    PixelMapping::new(viewport, width, height)?.pixel_to_complex(Point { x: col, y: row })
}

/// One-shot form of [`PixelMapping::complex_to_pixel`].
pub fn complex_to_pixel(
    viewport: Viewport,
    width: u32,
    height: u32,
    point: Complex,
) -> Result<(f64, f64), InvalidArgument> {
    Ok(PixelMapping::new(viewport, width, height)?.complex_to_pixel(point))
}
