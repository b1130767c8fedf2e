use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

pub const BYTES_PER_PIXEL: usize = 3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PixelBufferError {
    #[error(
        "pixel (x: {}, y: {}) is outside the buffer's {}x{} rect",
        pixel.x, pixel.y, pixel_rect.width(), pixel_rect.height()
    )]
    PixelOutsideBounds { pixel: Point, pixel_rect: PixelRect },

    #[error("pixel buffer expects {expected} bytes but received {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type PixelBufferData = Vec<u8>;

/// Packed RGB bytes, row-major, handed to the drawing collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixel_rect: PixelRect,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    /// Byte length of an RGB buffer covering `pixel_rect`.
    #[must_use]
    pub fn byte_len(pixel_rect: PixelRect) -> usize {
        pixel_rect.size() as usize * BYTES_PER_PIXEL
    }

    /// All-black buffer.
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        Self {
            pixel_rect,
            buffer: vec![0; Self::byte_len(pixel_rect)],
        }
    }

    pub fn from_data(
        pixel_rect: PixelRect,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let expected = Self::byte_len(pixel_rect);

        if buffer.len() != expected {
            return Err(PixelBufferError::SizeMismatch {
                expected,
                actual: buffer.len(),
            });
        }

        Ok(Self { pixel_rect, buffer })
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

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn into_data(self) -> PixelBufferData {
        self.buffer
    }

    /// Colours in row-major order.
    pub fn colours(&self) -> impl Iterator<Item = Colour> + '_ {
        self.buffer
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|rgb| Colour::rgb(rgb[0], rgb[1], rgb[2]))
    }

    pub fn pixel(&self, pixel: Point) -> Result<Colour, PixelBufferError> {
        let start = self.offset_of(pixel)?;
        let rgb = &self.buffer[start..start + BYTES_PER_PIXEL];

        Ok(Colour::rgb(rgb[0], rgb[1], rgb[2]))
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let start = self.offset_of(pixel)?;

        self.buffer[start..start + BYTES_PER_PIXEL].copy_from_slice(&[colour.r, colour.g, colour.b]);

        Ok(())
    }

    fn offset_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if !self.pixel_rect.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            });
        }

        let origin = self.pixel_rect.top_left();
        let col = (pixel.x - origin.x) as usize;
        let row = (pixel.y - origin.y) as usize;

        Ok((row * self.width() as usize + col) * BYTES_PER_PIXEL)
    }
}
