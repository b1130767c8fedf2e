use crate::core::colour::gradient::EscapeGradient;
use crate::core::colour::gradients::blue_white_gradient::BlueWhiteGradient;
use crate::core::colour::gradients::fire_gradient::FireGradient;
use crate::core::colour::kinds::GradientKind;

#[must_use]
pub fn gradient_factory(kind: GradientKind, max_iterations: u32) -> Box<dyn EscapeGradient> {
    match kind {
        GradientKind::Fire => Box::new(FireGradient::new(max_iterations)),
        GradientKind::BlueWhite => Box::new(BlueWhiteGradient::new(max_iterations)),
    }
}
