pub mod colour;
pub mod complex;
pub mod iteration_result;
pub mod period_result;
pub mod pixel_buffer;
pub mod pixel_rect;
pub mod point;
pub mod result_grid;
pub mod viewport;
