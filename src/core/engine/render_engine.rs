use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::{
    GenerateFractalError, generate_fractal_parallel_rayon_cancelable,
};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::result_grid::{PixelClassification, ResultGrid};
use crate::core::engine::config::EngineConfig;
use crate::core::engine::request::{PreparedRender, RenderRequest};
use crate::core::errors::{EngineError, InvalidArgument, RenderError};
use crate::core::fractals::period::PeriodDetector;
use std::time::Instant;
use tracing::{debug, warn};

/// Runs full-grid sweeps on a dedicated rayon pool.
///
/// Every pixel is evaluated independently; rows are the unit of parallel
/// work and are reassembled in row-major order. Per-pixel precondition
/// failures become [`PixelClassification::Invalid`] cells rather than
/// failing the render.
#[derive(Debug)]
pub struct RenderEngine {
    pool: rayon::ThreadPool,
    period_detector: PeriodDetector,
}

impl RenderEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let period_detector = PeriodDetector::new(config.period)?;

        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|index| format!("render-worker-{index}"));
        if let Some(threads) = config.worker_threads {
            builder = builder.num_threads(threads);
        }

        Ok(Self {
            pool: builder.build()?,
            period_detector,
        })
    }

    #[must_use]
    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    #[must_use]
    pub fn period_detector(&self) -> &PeriodDetector {
        &self.period_detector
    }

    pub fn render<C: CancelToken>(
        &self,
        request: &RenderRequest,
        cancel: &C,
    ) -> Result<ResultGrid, RenderError> {
        self.render_rows(request, cancel, |_, _| {})
    }

    /// Renders `request`, calling `on_row(row, cells)` from a worker thread as
    /// each row completes. Rows complete in no particular order.
    #[tracing::instrument(
        skip_all,
        fields(
            mode = %request.mode,
            width = request.pixel_width,
            height = request.pixel_height,
            max_iterations = request.max_iterations,
        )
    )]
    pub fn render_rows<C, F>(
        &self,
        request: &RenderRequest,
        cancel: &C,
        on_row: F,
    ) -> Result<ResultGrid, RenderError>
    where
        C: CancelToken,
        F: Fn(u32, &[PixelClassification]) + Sync,
    {
        let started = Instant::now();

        let cells = match PreparedRender::prepare(request, self.period_detector)? {
            PreparedRender::Mandelbrot(algorithm) => self.sweep(&algorithm, cancel, &on_row)?,
            PreparedRender::Julia(algorithm) => self.sweep(&algorithm, cancel, &on_row)?,
        };

        let grid = ResultGrid::from_cells(request.pixel_width, request.pixel_height, cells)?;
        let summary = grid.summary();

        if summary.invalid > 0 {
            warn!(invalid = summary.invalid, "render produced invalid cells");
        }

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            escaped = summary.escaped,
            bounded = summary.bounded,
            "render complete"
        );

        Ok(grid)
    }

    /// Classifies a single point through the same per-mode path as a render.
    /// The point need not lie inside the request's viewport.
    pub fn classify_point(
        &self,
        request: &RenderRequest,
        point: Complex,
    ) -> Result<PixelClassification, InvalidArgument> {
        Ok(match PreparedRender::prepare(request, self.period_detector)? {
            PreparedRender::Mandelbrot(algorithm) => algorithm.classify(point),
            PreparedRender::Julia(algorithm) => algorithm.classify(point),
        })
    }

    fn sweep<Alg, C, F>(
        &self,
        algorithm: &Alg,
        cancel: &C,
        on_row: &F,
    ) -> Result<Vec<PixelClassification>, RenderError>
    where
        Alg: FractalAlgorithm<Success = PixelClassification, Failure = InvalidArgument> + Sync,
        C: CancelToken,
        F: Fn(u32, &[PixelClassification]) + Sync,
    {
        self.pool
            .install(|| generate_fractal_parallel_rayon_cancelable(algorithm, cancel, on_row))
            .map_err(|err| match err {
                GenerateFractalError::Cancelled(cancelled) => RenderError::Cancelled(cancelled),
                GenerateFractalError::Algorithm(err) => RenderError::InvalidArgument(err),
            })
    }
}
