use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;
use crate::core::errors::InvalidArgument;
use crate::core::fractals::iteration::{DEFAULT_ESCAPE_RADIUS, IterationParams};
use crate::core::fractals::julia::algorithm::JuliaAlgorithm;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::period::PeriodDetector;
use crate::core::fractals::render_mode::RenderMode;
use crate::core::util::pixel_mapping::PixelMapping;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

fn default_escape_radius() -> f64 {
    DEFAULT_ESCAPE_RADIUS
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

/// Everything needed to render one grid. Holds a copy of the viewport, so
/// later zooms never affect a request already handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub mode: RenderMode,
    /// Required for the Julia-family modes, ignored otherwise.
    #[serde(default)]
    pub julia_c: Option<Complex>,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_escape_radius")]
    pub escape_radius: f64,
    pub viewport: Viewport,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Keep every cell's orbit in the result grid.
    #[serde(default)]
    pub record_orbits: bool,
}

impl RenderRequest {
    #[must_use]
    pub fn new(mode: RenderMode, viewport: Viewport, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            mode,
            julia_c: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            viewport,
            pixel_width,
            pixel_height,
            record_orbits: false,
        }
    }

    #[must_use]
    pub fn with_julia_parameter(self, c: Complex) -> Self {
        Self {
            julia_c: Some(c),
            ..self
        }
    }

    #[must_use]
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    #[must_use]
    pub fn with_escape_radius(self, escape_radius: f64) -> Self {
        Self {
            escape_radius,
            ..self
        }
    }

    #[must_use]
    pub fn with_orbit_recording(self) -> Self {
        Self {
            record_orbits: true,
            ..self
        }
    }

    /// Checks every precondition that would otherwise fail on each pixel.
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        self.iteration_params()?;
        self.pixel_mapping()?;
        self.julia_parameter()?;

        Ok(())
    }

    pub fn iteration_params(&self) -> Result<IterationParams, InvalidArgument> {
        let params = IterationParams::new(self.max_iterations, self.escape_radius)?;

        Ok(if self.record_orbits {
            params.with_orbit_recording()
        } else {
            params
        })
    }

    pub fn pixel_mapping(&self) -> Result<PixelMapping, InvalidArgument> {
        PixelMapping::new(self.viewport, self.pixel_width, self.pixel_height)
    }

    /// The fixed c of a Julia-family request; `None` for the Mandelbrot family.
    pub fn julia_parameter(&self) -> Result<Option<Complex>, InvalidArgument> {
        if !self.mode.requires_julia_parameter() {
            return Ok(None);
        }

        let c = self
            .julia_c
            .ok_or(InvalidArgument::MissingJuliaParameter { mode: self.mode })?;

        if !c.is_finite() {
            return Err(InvalidArgument::NonFiniteInput {
                name: "julia_c",
                real: c.real,
                imag: c.imag,
            });
        }

        Ok(Some(c))
    }
}

/// A validated request, dispatched once to its concrete per-pixel algorithm.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PreparedRender {
    Mandelbrot(MandelbrotAlgorithm),
    Julia(JuliaAlgorithm),
}

impl PreparedRender {
    pub(crate) fn prepare(
        request: &RenderRequest,
        period_detector: PeriodDetector,
    ) -> Result<Self, InvalidArgument> {
        let params = request.iteration_params()?;
        let mapping = request.pixel_mapping()?;

        Ok(match request.julia_parameter()? {
            Some(c) => Self::Julia(JuliaAlgorithm::new(mapping, c, params)?),
            None => {
                let algorithm = MandelbrotAlgorithm::new(mapping, params);

                Self::Mandelbrot(if request.mode.detects_periods() {
                    algorithm.with_period_detection(period_detector)
                } else {
                    algorithm
                })
            }
        })
    }
}
