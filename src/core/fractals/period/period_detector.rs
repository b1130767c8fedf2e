use crate::core::data::complex::Complex;
use crate::core::data::iteration_result::IterationResult;
use crate::core::data::period_result::{PeriodConfidence, PeriodResult};
use crate::core::errors::InvalidArgument;
use crate::core::fractals::iteration::{DEFAULT_ESCAPE_RADIUS, IterationParams, iterate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PERIOD_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_EXACT_REPETITIONS: u32 = 3;
/// A divisor `d` of a matched period `p` whose residual is within this factor
/// of the residual at `p` marks an orbit still converging onto a `d`-cycle.
pub const UNCONVERGED_RESIDUAL_RATIO: f64 = 100.0;

/// Tunable policy for period estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodDetectorConfig {
    /// Two orbit points closer than this are treated as the same point.
    pub tolerance: f64,
    /// Repetitions of the cycle needed to call the period exact.
    pub exact_repetitions: u32,
    /// Largest candidate period searched. Half the orbit length when unset.
    pub max_period: Option<u32>,
}

impl Default for PeriodDetectorConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_PERIOD_TOLERANCE,
            exact_repetitions: DEFAULT_EXACT_REPETITIONS,
            max_period: None,
        }
    }
}

/// Estimates the minimal period of a bounded orbit from its tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodDetector {
    config: PeriodDetectorConfig,
    tolerance_squared: f64,
}

impl Default for PeriodDetector {
    fn default() -> Self {
        Self {
            config: PeriodDetectorConfig::default(),
            tolerance_squared: DEFAULT_PERIOD_TOLERANCE * DEFAULT_PERIOD_TOLERANCE,
        }
    }
}

impl PeriodDetector {
    pub fn new(config: PeriodDetectorConfig) -> Result<Self, InvalidArgument> {
        if !config.tolerance.is_finite() || config.tolerance <= 0.0 || config.exact_repetitions == 0
        {
            return Err(InvalidArgument::InvalidPeriodConfig {
                tolerance: config.tolerance,
                exact_repetitions: config.exact_repetitions,
            });
        }

        Ok(Self {
            config,
            tolerance_squared: config.tolerance * config.tolerance,
        })
    }

    #[must_use]
    pub fn config(&self) -> PeriodDetectorConfig {
        self.config
    }

    /// Period of a bounded iteration result.
    ///
    /// Escaped results are rejected. A result without a recorded orbit is
    /// undetermined.
    pub fn detect(&self, result: &IterationResult) -> Result<PeriodResult, InvalidArgument> {
        if result.escaped {
            return Err(InvalidArgument::EscapedOrbit);
        }

        Ok(result
            .orbit
            .as_deref()
            .map_or(PeriodResult::UNDETERMINED, |orbit| self.detect_orbit(orbit)))
    }

    /// Smallest `p` for which the tail of `orbit` repeats with period `p`.
    #[must_use]
    pub fn detect_orbit(&self, orbit: &[Complex]) -> PeriodResult {
        if orbit.len() < 2 {
            return PeriodResult::UNDETERMINED;
        }

        let mut cap = orbit.len() / 2;
        if let Some(max_period) = self.config.max_period {
            cap = cap.min(max_period as usize);
        }

        for period in 1..=cap {
            let repetitions = self.matched_repetitions(orbit, period);

            if repetitions == 0 {
                continue;
            }

            if let Some(divisor) = self.unconverged_divisor(orbit, period) {
                return PeriodResult {
                    period: divisor as u32,
                    confidence: PeriodConfidence::Approximate,
                };
            }

            let confidence = if repetitions >= self.config.exact_repetitions as usize {
                PeriodConfidence::Exact
            } else {
                PeriodConfidence::Approximate
            };

            return PeriodResult {
                period: period as u32,
                confidence,
            };
        }

        PeriodResult::UNDETERMINED
    }

    /// Smallest proper divisor of `period` whose trailing residual is not
    /// clearly larger than the residual at `period` itself.
    fn unconverged_divisor(&self, orbit: &[Complex], period: usize) -> Option<usize> {
        let bound = trailing_residual_squared(orbit, period)
            * UNCONVERGED_RESIDUAL_RATIO
            * UNCONVERGED_RESIDUAL_RATIO;

        (1..period)
            .filter(|divisor| period % divisor == 0)
            .find(|&divisor| trailing_residual_squared(orbit, divisor) < bound)
    }

    /// Whole repetitions of `period` matched backwards from the last point,
    /// capped at the number needed for an exact result.
    fn matched_repetitions(&self, orbit: &[Complex], period: usize) -> usize {
        let last = orbit.len() - 1;
        let wanted = period * self.config.exact_repetitions as usize;
        let mut matched = 0;

        while matched < wanted && matched + period <= last {
            let current = orbit[last - matched];
            let earlier = orbit[last - matched - period];

            if (current - earlier).magnitude_squared() >= self.tolerance_squared {
                break;
            }

            matched += 1;
        }

        matched / period
    }
}

fn trailing_residual_squared(orbit: &[Complex], lag: usize) -> f64 {
    let last = orbit.len() - 1;

    (orbit[last] - orbit[last - lag]).magnitude_squared()
}

/// Period of the Mandelbrot parameter `c`: iterates z₀ = 0 for `iterates`
/// steps and inspects the orbit. Escaping parameters are undetermined.
pub fn period_of_parameter(
    c: Complex,
    iterates: u32,
    detector: &PeriodDetector,
) -> Result<PeriodResult, InvalidArgument> {
    let params = IterationParams::new(iterates, DEFAULT_ESCAPE_RADIUS)?.with_orbit_recording();
    let result = iterate(Complex::ZERO, c, &params)?;

    if result.escaped {
        return Ok(PeriodResult::UNDETERMINED);
    }

    detector.detect(&result)
}
