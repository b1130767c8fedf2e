use crate::core::actions::cancellation::{
    CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled, NeverCancel,
};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::colour::policy::ColourPolicy;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::result_grid::ResultGrid;
use crate::core::errors::InvalidArgument;
use crate::core::fractals::render_mode::RenderMode;

#[derive(Debug, thiserror::Error)]
pub enum GeneratePixelBufferError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error("grid cannot be drawn: {0}")]
    InvalidGrid(#[from] InvalidArgument),

    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

impl GeneratePixelBufferError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Colours every cell of `grid` for `mode`.
///
/// For cancel-aware generation, use [`generate_pixel_buffer_cancelable`].
pub fn generate_pixel_buffer(
    grid: &ResultGrid,
    policy: &ColourPolicy,
    mode: RenderMode,
) -> Result<PixelBuffer, GeneratePixelBufferError> {
    generate_pixel_buffer_cancelable(grid, policy, mode, &NeverCancel)
}

/// Like [`generate_pixel_buffer`], but polls `cancel` every
/// [`CANCEL_CHECK_INTERVAL_PIXELS`] cells.
pub fn generate_pixel_buffer_cancelable<C: CancelToken>(
    grid: &ResultGrid,
    policy: &ColourPolicy,
    mode: RenderMode,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError> {
    let pixel_rect = PixelRect::from_size(grid.width(), grid.height())?;

    map_to_pixel_buffer(grid.cells(), &policy.for_mode(mode), pixel_rect, cancel)
}

/// Streams RGB bytes for each input value into a buffer preallocated to
/// `pixel_rect.size() * 3` bytes.
pub fn map_to_pixel_buffer<I, CMap, C>(
    input: I,
    mapper: &CMap,
    pixel_rect: PixelRect,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError>
where
    I: IntoIterator,
    CMap: ColourMap<I::Item>,
    C: CancelToken,
{
    let mut buffer: PixelBufferData = Vec::with_capacity(PixelBuffer::byte_len(pixel_rect));

    for (i, value) in input.into_iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
            return Err(GeneratePixelBufferError::Cancelled(Cancelled));
        }

        let Colour { r, g, b } = mapper.map(value);
        buffer.extend_from_slice(&[r, g, b]);
    }

    Ok(PixelBuffer::from_data(pixel_rect, buffer)?)
}
