use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::result_grid::ResultGrid;
use std::time::Duration;

/// A completed render: the classified grid and its coloured pixels.
#[derive(Debug)]
pub struct FrameData {
    pub generation: u64,
    pub grid: ResultGrid,
    pub pixel_buffer: PixelBuffer,
    pub render_duration: Duration,
}
