use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::colour::kinds::GradientKind;
use std::fmt::Debug;

/// Escape-time gradient over iteration counts `1..=max_iterations`.
pub trait EscapeGradient: ColourMap<u32> + Debug + Send + Sync {
    fn kind(&self) -> GradientKind;
}
