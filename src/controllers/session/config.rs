use crate::core::colour::kinds::GradientKind;
use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;
use crate::core::engine::{DEFAULT_MAX_ITERATIONS, EngineConfig};
use crate::core::errors::InvalidArgument;
use crate::core::fractals::iteration::{DEFAULT_ESCAPE_RADIUS, IterationParams};
use crate::core::fractals::period::{PeriodDetector, PeriodDetectorConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Orbit length used when estimating the period of the selected parameter.
pub const DEFAULT_PERIOD_ITERATES: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] InvalidArgument),
}

/// Settings an explorer session starts from. Every field is optional in
/// JSON; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub mandelbrot_view: Viewport,
    pub julia_view: Viewport,
    pub initial_julia_c: Complex,
    pub period_iterates: u32,
    pub gradient: GradientKind,
    pub worker_threads: Option<usize>,
    pub period: PeriodDetectorConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            mandelbrot_view: Viewport::DEFAULT,
            julia_view: Viewport::DEFAULT,
            initial_julia_c: Complex::ZERO,
            period_iterates: DEFAULT_PERIOD_ITERATES,
            gradient: GradientKind::default(),
            worker_threads: None,
            period: PeriodDetectorConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), InvalidArgument> {
        IterationParams::new(self.max_iterations, self.escape_radius)?;
        IterationParams::new(self.period_iterates, DEFAULT_ESCAPE_RADIUS)?;
        PeriodDetector::new(self.period)?;

        if !self.initial_julia_c.is_finite() {
            return Err(InvalidArgument::NonFiniteInput {
                name: "initial_julia_c",
                real: self.initial_julia_c.real,
                imag: self.initial_julia_c.imag,
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            worker_threads: self.worker_threads,
            period: self.period,
        }
    }
}
