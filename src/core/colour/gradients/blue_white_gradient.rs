use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::colour::gradient::EscapeGradient;
use crate::core::colour::kinds::GradientKind;
use crate::core::data::colour::Colour;

#[derive(Debug)]
pub struct BlueWhiteGradient {
    max_iterations: u32,
}

impl ColourMap<u32> for BlueWhiteGradient {
    fn map(&self, iterations: u32) -> Colour {
        // t stays below 1 so an escape at the last step is not black
        let t = f64::from(iterations.min(self.max_iterations))
            / (f64::from(self.max_iterations) + 1.0);

        let r = (9.0 * (1.0 - t) * t * t * t * 255.0) as u8;
        let g = (15.0 * (1.0 - t) * (1.0 - t) * t * t * 255.0) as u8;
        let b = ((8.5 * (1.0 - t) * (1.0 - t) * (1.0 - t) * t * 255.0) as u8).max(1);

        Colour { r, g, b }
    }

    fn display_name(&self) -> &str {
        self.kind().display_name()
    }
}

impl EscapeGradient for BlueWhiteGradient {
    fn kind(&self) -> GradientKind {
        GradientKind::BlueWhite
    }
}

impl BlueWhiteGradient {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}
