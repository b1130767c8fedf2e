use crate::core::data::complex::Complex;
use crate::core::errors::InvalidArgument;
use serde::{Deserialize, Serialize};

/// Raw viewport bounds as they appear in config files.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub real_min: f64,
    pub real_max: f64,
    pub imag_min: f64,
    pub imag_max: f64,
}

/// The rectangle of the complex plane mapped onto the pixel grid.
///
/// Always finite with `real_min < real_max` and `imag_min < imag_max`, and
/// with finite width and height.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewportBounds", into = "ViewportBounds")]
pub struct Viewport {
    real_min: f64,
    real_max: f64,
    imag_min: f64,
    imag_max: f64,
}

impl Viewport {
    /// The initial full view, `[-3, 3]` on both axes.
    pub const DEFAULT: Self = Self {
        real_min: -3.0,
        real_max: 3.0,
        imag_min: -3.0,
        imag_max: 3.0,
    };

    pub fn new(
        real_min: f64,
        real_max: f64,
        imag_min: f64,
        imag_max: f64,
    ) -> Result<Self, InvalidArgument> {
        let finite = [real_min, real_max, imag_min, imag_max]
            .iter()
            .all(|v| v.is_finite());
        let extents_finite =
            (real_max - real_min).is_finite() && (imag_max - imag_min).is_finite();

        if !finite || !extents_finite || real_min >= real_max || imag_min >= imag_max {
            return Err(InvalidArgument::InvalidViewport {
                real_min,
                real_max,
                imag_min,
                imag_max,
            });
        }

        Ok(Self {
            real_min,
            real_max,
            imag_min,
            imag_max,
        })
    }

    /// Builds the viewport spanned by two arbitrary corners, normalizing each axis.
    pub fn from_corners(a: Complex, b: Complex) -> Result<Self, InvalidArgument> {
        Self::new(
            a.real.min(b.real),
            a.real.max(b.real),
            a.imag.min(b.imag),
            a.imag.max(b.imag),
        )
    }

    #[must_use]
    pub fn real_min(&self) -> f64 {
        self.real_min
    }

    #[must_use]
    pub fn real_max(&self) -> f64 {
        self.real_max
    }

    #[must_use]
    pub fn imag_min(&self) -> f64 {
        self.imag_min
    }

    #[must_use]
    pub fn imag_max(&self) -> f64 {
        self.imag_max
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.real_max - self.real_min
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.imag_max - self.imag_min
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        Complex {
            real: (self.real_min + self.real_max) / 2.0,
            imag: (self.imag_min + self.imag_max) / 2.0,
        }
    }

    #[must_use]
    pub fn contains_point(&self, point: Complex) -> bool {
        self.real_min <= point.real
            && point.real <= self.real_max
            && self.imag_min <= point.imag
            && point.imag <= self.imag_max
    }

    #[must_use]
    pub fn contains_viewport(&self, other: &Viewport) -> bool {
        self.real_min <= other.real_min
            && other.real_max <= self.real_max
            && self.imag_min <= other.imag_min
            && other.imag_max <= self.imag_max
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<ViewportBounds> for Viewport {
    type Error = InvalidArgument;

    fn try_from(bounds: ViewportBounds) -> Result<Self, Self::Error> {
        Self::new(
            bounds.real_min,
            bounds.real_max,
            bounds.imag_min,
            bounds.imag_max,
        )
    }
}

impl From<Viewport> for ViewportBounds {
    fn from(viewport: Viewport) -> Self {
        Self {
            real_min: viewport.real_min,
            real_max: viewport.real_max,
            imag_min: viewport.imag_min,
            imag_max: viewport.imag_max,
        }
    }
}
