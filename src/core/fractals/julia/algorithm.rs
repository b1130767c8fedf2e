use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::result_grid::PixelClassification;
use crate::core::errors::InvalidArgument;
use crate::core::fractals::iteration::{IterationParams, iterate};
use crate::core::util::pixel_mapping::PixelMapping;

/// Julia-family pixel evaluation: z₀ = the pixel's point, c fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct JuliaAlgorithm {
    mapping: PixelMapping,
    c: Complex,
    params: IterationParams,
}

impl JuliaAlgorithm {
    pub fn new(
        mapping: PixelMapping,
        c: Complex,
        params: IterationParams,
    ) -> Result<Self, InvalidArgument> {
        if !c.is_finite() {
            return Err(InvalidArgument::NonFiniteInput {
                name: "c",
                real: c.real,
                imag: c.imag,
            });
        }

        Ok(Self { mapping, c, params })
    }

    #[must_use]
    pub fn c(&self) -> Complex {
        self.c
    }

    #[must_use]
    pub fn mapping(&self) -> &PixelMapping {
        &self.mapping
    }

    #[must_use]
    pub fn classify(&self, z0: Complex) -> PixelClassification {
        match iterate(z0, self.c, &self.params) {
            Ok(result) => PixelClassification::Evaluated {
                result,
                period: None,
            },
            Err(err) => PixelClassification::Invalid(err),
        }
    }
}

impl FractalAlgorithm for JuliaAlgorithm {
    type Success = PixelClassification;
    type Failure = InvalidArgument;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let z0 = self.mapping.pixel_to_complex(pixel)?;

        Ok(self.classify(z0))
    }

    fn pixel_rect(&self) -> PixelRect {
        self.mapping.pixel_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::viewport::Viewport;

    fn algorithm(c: Complex) -> JuliaAlgorithm {
        let mapping =
            PixelMapping::new(Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap(), 41, 41).unwrap();

        JuliaAlgorithm::new(mapping, c, IterationParams::new(100, 2.0).unwrap()).unwrap()
    }

    #[test]
    fn test_rejects_non_finite_parameter() {
        let mapping =
            PixelMapping::new(Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap(), 4, 4).unwrap();

        let result = JuliaAlgorithm::new(
            mapping,
            Complex::new(f64::INFINITY, 0.0),
            IterationParams::new(10, 2.0).unwrap(),
        );

        assert!(matches!(
            result,
            Err(InvalidArgument::NonFiniteInput { name: "c", .. })
        ));
    }

    #[test]
    fn test_centre_pixel_is_bounded_for_zero_parameter() {
        let cell = algorithm(Complex::ZERO)
            .compute(Point { x: 20, y: 20 })
            .unwrap();

        assert!(cell.is_bounded());
    }

    #[test]
    fn test_corner_pixel_escapes_for_zero_parameter() {
        // (-2, 2) has |z|² = 8, so z₁ = z₀² is already far outside
        let cell = algorithm(Complex::ZERO)
            .compute(Point { x: 0, y: 0 })
            .unwrap();

        assert!(cell.is_escaped());
        assert_eq!(cell.iteration_result().map(|r| r.iteration_count), Some(1));
    }

    #[test]
    fn test_classify_uses_point_as_starting_value() {
        let algorithm = algorithm(Complex::new(-1.0, 0.0));

        // 0 -> -1 -> 0 -> ... is the superattracting 2-cycle
        assert!(algorithm.classify(Complex::ZERO).is_bounded());
        assert!(algorithm.classify(Complex::new(3.0, 0.0)).is_escaped());
    }

    #[test]
    fn test_compute_returns_error_for_pixel_outside_grid() {
        let point = Point { x: 0, y: -1 };

        assert_eq!(
            algorithm(Complex::ZERO).compute(point),
            Err(InvalidArgument::PixelOutsideGrid {
                point,
                width: 41,
                height: 41
            })
        );
    }
}
