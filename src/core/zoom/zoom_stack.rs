use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::errors::InvalidArgument;
use crate::core::util::pixel_mapping::PixelMapping;
use tracing::trace;

/// Navigation history of viewports. Never empty: the bottom entry is the
/// initial full view and cannot be popped.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomStack {
    initial: Viewport,
    zooms: Vec<Viewport>,
}

impl ZoomStack {
    #[must_use]
    pub fn new(initial: Viewport) -> Self {
        Self {
            initial,
            zooms: Vec::new(),
        }
    }

    #[must_use]
    pub fn current(&self) -> Viewport {
        self.zooms.last().copied().unwrap_or(self.initial)
    }

    #[must_use]
    pub fn initial(&self) -> Viewport {
        self.initial
    }

    /// Number of zooms above the initial view.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.zooms.len()
    }

    /// Zooms to the rectangle spanned by two pixel corners of the current
    /// view rendered at `pixel_width x pixel_height`. The rectangle is used
    /// exactly as selected, without aspect-ratio correction.
    pub fn push_zoom(
        &mut self,
        corner_a: Point,
        corner_b: Point,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Viewport, InvalidArgument> {
        if corner_a.x == corner_b.x || corner_a.y == corner_b.y {
            return Err(InvalidArgument::DegenerateZoom { corner_a, corner_b });
        }

        let mapping = PixelMapping::new(self.current(), pixel_width, pixel_height)?;
        let a = mapping.pixel_to_complex(corner_a)?;
        let b = mapping.pixel_to_complex(corner_b)?;

        Ok(self.push(Viewport::from_corners(a, b)?))
    }

    /// Zooms using only the horizontal extent of the selection. The vertical
    /// extent keeps pixels square and runs from `anchor` toward `other`: up
    /// when `other` is above the anchor row, down otherwise.
    pub fn push_zoom_keep_ratio(
        &mut self,
        anchor: Point,
        other: Point,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Viewport, InvalidArgument> {
        if anchor.x == other.x {
            return Err(InvalidArgument::DegenerateZoom {
                corner_a: anchor,
                corner_b: other,
            });
        }

        let mapping = PixelMapping::new(self.current(), pixel_width, pixel_height)?;
        let a = mapping.pixel_to_complex(anchor)?;
        let b = mapping.pixel_to_complex(other)?;

        let real_extent = (b.real - a.real).abs();
        let imag_extent = real_extent * f64::from(pixel_height - 1) / f64::from(pixel_width - 1);
        let imag_end = if other.y < anchor.y {
            a.imag + imag_extent
        } else {
            a.imag - imag_extent
        };

        Ok(self.push(Viewport::from_corners(
            a,
            Complex::new(b.real, imag_end),
        )?))
    }

    /// Returns to the previous view. Popping the initial view is a no-op.
    pub fn pop_zoom(&mut self) -> Viewport {
        if self.zooms.pop().is_some() {
            trace!(depth = self.depth(), "zoom popped");
        }

        self.current()
    }

    /// Drops every zoom, back to the initial full view.
    pub fn reset(&mut self) -> Viewport {
        self.zooms.clear();
        trace!("zoom reset");

        self.initial
    }

    fn push(&mut self, viewport: Viewport) -> Viewport {
        self.zooms.push(viewport);
        trace!(
            depth = self.depth(),
            real_min = viewport.real_min(),
            real_max = viewport.real_max(),
            imag_min = viewport.imag_min(),
            imag_max = viewport.imag_max(),
            "zoom pushed"
        );

        viewport
    }
}
