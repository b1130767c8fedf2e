use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::result_grid::PixelClassification;
use crate::core::errors::InvalidArgument;
use crate::core::fractals::iteration::{IterationParams, iterate};
use crate::core::fractals::period::PeriodDetector;
use crate::core::util::pixel_mapping::PixelMapping;

/// Mandelbrot-family pixel evaluation: z₀ = 0, c = the pixel's point.
///
/// With a period detector attached, bounded orbits are recorded and their
/// period is attached to the cell. The orbit itself is only kept when the
/// iteration params ask for it.
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotAlgorithm {
    mapping: PixelMapping,
    params: IterationParams,
    period_detector: Option<PeriodDetector>,
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(mapping: PixelMapping, params: IterationParams) -> Self {
        Self {
            mapping,
            params,
            period_detector: None,
        }
    }

    #[must_use]
    pub fn with_period_detection(self, detector: PeriodDetector) -> Self {
        Self {
            period_detector: Some(detector),
            ..self
        }
    }

    #[must_use]
    pub fn mapping(&self) -> &PixelMapping {
        &self.mapping
    }

    /// Classifies the parameter `c`, absorbing precondition failures into an
    /// [`PixelClassification::Invalid`] cell.
    #[must_use]
    pub fn classify(&self, c: Complex) -> PixelClassification {
        self.evaluate(c).unwrap_or_else(PixelClassification::Invalid)
    }

    fn evaluate(&self, c: Complex) -> Result<PixelClassification, InvalidArgument> {
        let Some(detector) = self.period_detector.as_ref() else {
            return Ok(PixelClassification::Evaluated {
                result: iterate(Complex::ZERO, c, &self.params)?,
                period: None,
            });
        };

        let result = iterate(Complex::ZERO, c, &self.params.with_orbit_recording())?;
        let period = if result.escaped {
            None
        } else {
            Some(detector.detect(&result)?)
        };

        let result = if self.params.records_orbit() {
            result
        } else {
            result.without_orbit()
        };

        Ok(PixelClassification::Evaluated { result, period })
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = PixelClassification;
    type Failure = InvalidArgument;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let c = self.mapping.pixel_to_complex(pixel)?;

        Ok(self.classify(c))
    }

    fn pixel_rect(&self) -> PixelRect {
        self.mapping.pixel_rect()
    }
}
