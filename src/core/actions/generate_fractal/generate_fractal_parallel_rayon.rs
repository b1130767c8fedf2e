use rayon::prelude::*;

use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::Point;

/// Error type for cancelable grid generation.
///
/// Cancellation is expected control flow and is kept apart from algorithm
/// failures so callers can ignore it.
#[derive(Debug, thiserror::Error)]
pub enum GenerateFractalError<E> {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error("algorithm error: {0}")]
    Algorithm(E),
}

/// Generates per-pixel results in parallel on the current rayon pool.
///
/// Rows are independent work items. Cancellation is polled at the start of
/// each row and every [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels within a row.
/// `on_row` is called with the row offset (0-based from the top of the pixel
/// rect) as each row completes; rows complete in no particular order.
///
/// Returns row-major ordered results.
pub fn generate_fractal_parallel_rayon_cancelable<Alg, C, F>(
    algorithm: &Alg,
    cancel: &C,
    on_row: F,
) -> Result<Vec<Alg::Success>, GenerateFractalError<Alg::Failure>>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Send,
    Alg::Failure: Send,
    C: CancelToken,
    F: Fn(u32, &[Alg::Success]) + Sync,
{
    let pixel_rect = algorithm.pixel_rect();
    let y_start = pixel_rect.top_left().y;
    let y_end = pixel_rect.bottom_right().y;
    let x_start = pixel_rect.top_left().x;
    let x_end = pixel_rect.bottom_right().x;
    let row_width = pixel_rect.width() as usize;

    let rows: Result<Vec<Vec<Alg::Success>>, GenerateFractalError<Alg::Failure>> = (y_start
        ..=y_end)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(row_width);

            for (i, x) in (x_start..=x_end).enumerate() {
                if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                    return Err(GenerateFractalError::Cancelled(Cancelled));
                }

                let result = algorithm
                    .compute(Point { x, y })
                    .map_err(GenerateFractalError::Algorithm)?;
                row.push(result);
            }

            on_row((y - y_start) as u32, &row);

            Ok(row)
        })
        .collect();

    rows.map(|r| r.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
    use crate::core::data::pixel_rect::PixelRect;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("StubError")]
    struct StubError;

    #[derive(Debug)]
    struct StubSuccessAlgorithm {
        pixel_rect: PixelRect,
    }

    impl FractalAlgorithm for StubSuccessAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            Ok((pixel.x + pixel.y) as u64)
        }

        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }
    }

    #[derive(Debug)]
    struct StubFailureAlgorithm {
        pixel_rect: PixelRect,
    }

    impl FractalAlgorithm for StubFailureAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, _: Point) -> Result<Self::Success, Self::Failure> {
            Err(StubError)
        }

        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }
    }

    fn rect(right: i32, bottom: i32) -> PixelRect {
        PixelRect::new(Point { x: 0, y: 0 }, Point { x: right, y: bottom }).unwrap()
    }

    fn generate<Alg>(algorithm: &Alg) -> Result<Vec<u64>, GenerateFractalError<StubError>>
    where
        Alg: FractalAlgorithm<Success = u64, Failure = StubError> + Sync,
    {
        generate_fractal_parallel_rayon_cancelable(algorithm, &NeverCancel, |_, _| {})
    }

    #[test]
    fn test_rayon_generates_same_results_as_serial() {
        for pixel_rect in [rect(10, 8), rect(1, 1), rect(100, 100)] {
            let algorithm = StubSuccessAlgorithm { pixel_rect };

            let serial = generate_fractal_serial(&algorithm).unwrap();
            let parallel = generate(&algorithm).unwrap();

            assert_eq!(parallel, serial);
        }
    }

    #[test]
    fn test_offset_rect_is_row_major() {
        let algorithm = StubSuccessAlgorithm {
            pixel_rect: PixelRect::new(Point { x: 5, y: 5 }, Point { x: 6, y: 6 }).unwrap(),
        };

        assert_eq!(generate(&algorithm).unwrap(), vec![10, 11, 11, 12]);
    }

    #[test]
    fn test_propagates_algorithm_failure() {
        let algorithm = StubFailureAlgorithm {
            pixel_rect: rect(3, 4),
        };

        assert!(matches!(
            generate(&algorithm),
            Err(GenerateFractalError::Algorithm(StubError))
        ));
    }

    #[test]
    fn test_returns_cancelled_when_token_is_cancelled() {
        let algorithm = StubSuccessAlgorithm {
            pixel_rect: rect(10, 8),
        };
        let cancelled = AtomicBool::new(true);
        let cancel_token = || cancelled.load(Ordering::Relaxed);

        let result = generate_fractal_parallel_rayon_cancelable(&algorithm, &cancel_token, |_, _| {});

        assert!(matches!(result, Err(GenerateFractalError::Cancelled(_))));
    }

    #[test]
    fn test_cancels_after_k_polls() {
        let algorithm = StubSuccessAlgorithm {
            pixel_rect: rect(5, 5),
        };
        let poll_count = AtomicUsize::new(0);
        let cancel_after = 3;
        let cancel_token = || poll_count.fetch_add(1, Ordering::Relaxed) >= cancel_after;

        let result = generate_fractal_parallel_rayon_cancelable(&algorithm, &cancel_token, |_, _| {});

        assert!(matches!(result, Err(GenerateFractalError::Cancelled(_))));
        assert!(poll_count.load(Ordering::Relaxed) >= cancel_after);
    }

    #[test]
    fn test_cancellation_polled_at_row_start() {
        let algorithm = StubSuccessAlgorithm {
            pixel_rect: rect(1, 4),
        };
        let poll_count = AtomicUsize::new(0);
        let cancel_token = || {
            poll_count.fetch_add(1, Ordering::Relaxed);
            false
        };

        let result = generate_fractal_parallel_rayon_cancelable(&algorithm, &cancel_token, |_, _| {});

        assert!(result.is_ok());
        let polls = poll_count.load(Ordering::Relaxed);
        assert!(polls >= 5, "expected at least 5 polls for 5 rows, got {}", polls);
    }

    #[test]
    fn test_cancellation_polled_multiple_times_on_wide_rows() {
        // 3000 wide: polls at 0, 1024 and 2048 in each of the 2 rows
        let algorithm = StubSuccessAlgorithm {
            pixel_rect: rect(2999, 1),
        };
        let poll_count = AtomicUsize::new(0);
        let cancel_token = || {
            poll_count.fetch_add(1, Ordering::Relaxed);
            false
        };

        let result = generate_fractal_parallel_rayon_cancelable(&algorithm, &cancel_token, |_, _| {});

        assert!(result.is_ok());
        let polls = poll_count.load(Ordering::Relaxed);
        assert!(polls >= 6, "expected at least 6 polls for 2 wide rows, got {}", polls);
    }

    #[test]
    fn test_on_row_sees_every_row_once() {
        let algorithm = StubSuccessAlgorithm {
            pixel_rect: PixelRect::new(Point { x: 0, y: 3 }, Point { x: 4, y: 9 }).unwrap(),
        };
        let seen = Mutex::new(Vec::new());

        let results = generate_fractal_parallel_rayon_cancelable(&algorithm, &NeverCancel, |row, values| {
            seen.lock().unwrap().push((row, values.to_vec()));
        })
        .unwrap();

        let mut seen = seen.into_inner().unwrap();
        seen.sort_by_key(|(row, _)| *row);

        assert_eq!(seen.len(), 7);
        for (row, values) in &seen {
            let start = *row as usize * 5;
            assert_eq!(values.as_slice(), &results[start..start + 5]);
        }
    }

    #[test]
    fn test_error_displays() {
        let cancelled: GenerateFractalError<StubError> = GenerateFractalError::Cancelled(Cancelled);
        let algorithm: GenerateFractalError<StubError> = GenerateFractalError::Algorithm(StubError);

        assert_eq!(format!("{}", cancelled), "operation cancelled");
        assert_eq!(format!("{}", algorithm), "algorithm error: StubError");
    }
}
