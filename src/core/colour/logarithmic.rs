use crate::core::data::colour::Colour;

/// Blend between two colours by `ln(1 + v) / ln(1 + ceiling)`, clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    low: Colour,
    high: Colour,
    ceiling: f64,
}

impl LogScale {
    #[must_use]
    pub fn new(low: Colour, high: Colour, ceiling: f64) -> Self {
        Self {
            low,
            high,
            ceiling: ceiling.max(1.0),
        }
    }

    #[must_use]
    pub fn fraction(&self, value: f64) -> f64 {
        let value = value.max(0.0);

        ((1.0 + value).ln() / (1.0 + self.ceiling).ln()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn colour(&self, value: f64) -> Colour {
        self.low.lerp(self.high, self.fraction(value))
    }
}
