use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::colour::gradient::EscapeGradient;
use crate::core::colour::kinds::GradientKind;
use crate::core::data::colour::Colour;

/// Black through red, orange and yellow to white as the escape count grows.
#[derive(Debug)]
pub struct FireGradient {
    max_iterations: u32,
}

impl ColourMap<u32> for FireGradient {
    fn map(&self, iterations: u32) -> Colour {
        let t = f64::from(iterations.min(self.max_iterations)) / f64::from(self.max_iterations);

        let (r, g, b) = if t < 0.25 {
            let local_t = t / 0.25;
            (((local_t * 255.0) as u8).max(1), 0, 0)
        } else if t < 0.5 {
            let local_t = (t - 0.25) / 0.25;
            (255, (local_t * 165.0) as u8, 0)
        } else if t < 0.75 {
            let local_t = (t - 0.5) / 0.25;
            (255, (165.0 + local_t * 90.0) as u8, 0)
        } else {
            let local_t = (t - 0.75) / 0.25;
            (255, 255, (local_t * 255.0) as u8)
        };

        Colour { r, g, b }
    }

    fn display_name(&self) -> &str {
        self.kind().display_name()
    }
}

impl EscapeGradient for FireGradient {
    fn kind(&self) -> GradientKind {
        GradientKind::Fire
    }
}

impl FireGradient {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations: max_iterations.max(1),
        }
    }
}
