use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::Point;

/// Single-threaded sweep over the algorithm's pixel rect, row-major.
pub fn generate_fractal_serial<Alg: FractalAlgorithm>(
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure> {
    let pixel_rect = algorithm.pixel_rect();

    (pixel_rect.top_left().y..=pixel_rect.bottom_right().y)
        .flat_map(|y| {
            (pixel_rect.top_left().x..=pixel_rect.bottom_right().x).map(move |x| Point { x, y })
        })
        .map(|pixel| algorithm.compute(pixel))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::pixel_rect::PixelRect;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("StubError")]
    struct StubError;

    struct StubAlgorithm {
        pixel_rect: PixelRect,
    }

    impl FractalAlgorithm for StubAlgorithm {
        type Success = (i32, i32);
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            if pixel.x < 0 {
                return Err(StubError);
            }

            Ok((pixel.x, pixel.y))
        }

        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }
    }

    #[test]
    fn test_visits_every_pixel_inclusive_in_row_major_order() {
        let algorithm = StubAlgorithm {
            pixel_rect: PixelRect::new(Point { x: 0, y: 0 }, Point { x: 2, y: 1 }).unwrap(),
        };

        let results = generate_fractal_serial(&algorithm).unwrap();

        assert_eq!(
            results,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn test_propagates_algorithm_failure() {
        let algorithm = StubAlgorithm {
            pixel_rect: PixelRect::new(Point { x: -1, y: 0 }, Point { x: 2, y: 1 }).unwrap(),
        };

        assert_eq!(generate_fractal_serial(&algorithm), Err(StubError));
    }
}
