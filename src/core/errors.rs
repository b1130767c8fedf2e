use crate::core::data::point::Point;
use crate::core::data::result_grid::ResultGridError;
use crate::core::fractals::render_mode::RenderMode;

/// Every precondition violation the engine can report.
///
/// These are signalled to the caller; the only place one is absorbed is the
/// per-pixel boundary of a grid sweep, where the cell becomes
/// [`PixelClassification::Invalid`](crate::core::data::result_grid::PixelClassification::Invalid).
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,

    #[error("escape radius must be positive and finite: {radius}")]
    InvalidEscapeRadius { radius: f64 },

    #[error("{name} must be finite: ({real}, {imag})")]
    NonFiniteInput {
        name: &'static str,
        real: f64,
        imag: f64,
    },

    #[error(
        "viewport bounds must be finite with min < max: real [{real_min}, {real_max}], imag [{imag_min}, {imag_max}]"
    )]
    InvalidViewport {
        real_min: f64,
        real_max: f64,
        imag_min: f64,
        imag_max: f64,
    },

    #[error("pixel grid must be at least 2x2: {width}x{height}")]
    InvalidPixelGrid { width: u32, height: u32 },

    #[error("pixel rect size must be at least 2x2: {width}x{height}")]
    InvalidPixelRect { width: i64, height: i64 },

    #[error("pixel (x: {}, y: {}) is outside the {width}x{height} grid", point.x, point.y)]
    PixelOutsideGrid { point: Point, width: u32, height: u32 },

    #[error(
        "zoom selection is degenerate: (x: {}, y: {}) to (x: {}, y: {})",
        corner_a.x, corner_a.y, corner_b.x, corner_b.y
    )]
    DegenerateZoom { corner_a: Point, corner_b: Point },

    #[error("period requested for an escaped orbit")]
    EscapedOrbit,

    #[error(
        "period tolerance must be positive and finite and repetitions non-zero: tolerance {tolerance}, repetitions {exact_repetitions}"
    )]
    InvalidPeriodConfig {
        tolerance: f64,
        exact_repetitions: u32,
    },

    #[error("{mode} rendering requires a julia parameter")]
    MissingJuliaParameter { mode: RenderMode },
}

/// Returned when a cancel token fires before an operation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Failure of a full-grid render.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid render request: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error("render produced a malformed grid: {0}")]
    Grid(#[from] ResultGridError),
}

impl RenderError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Failure to construct a [`RenderEngine`](crate::core::engine::RenderEngine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid engine configuration: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
