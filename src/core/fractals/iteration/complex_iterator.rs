use crate::core::data::complex::Complex;
use crate::core::data::iteration_result::IterationResult;
use crate::core::errors::InvalidArgument;

pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;

/// One step of the iterated map, `z -> f_c(z)`.
pub trait IterationMap {
    fn step(&self, z: Complex, c: Complex) -> Complex;
}

/// `f_c(z) = z² + c`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quadratic;

impl IterationMap for Quadratic {
    #[inline]
    fn step(&self, z: Complex, c: Complex) -> Complex {
        z * z + c
    }
}

/// Validated iteration budget and bailout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationParams {
    max_iterations: u32,
    escape_radius: f64,
    escape_radius_squared: f64,
    record_orbit: bool,
}

impl IterationParams {
    pub fn new(max_iterations: u32, escape_radius: f64) -> Result<Self, InvalidArgument> {
        if max_iterations == 0 {
            return Err(InvalidArgument::ZeroMaxIterations);
        }

        if !escape_radius.is_finite() || escape_radius <= 0.0 {
            return Err(InvalidArgument::InvalidEscapeRadius {
                radius: escape_radius,
            });
        }

        Ok(Self {
            max_iterations,
            escape_radius,
            escape_radius_squared: escape_radius * escape_radius,
            record_orbit: false,
        })
    }

    /// Records every visited z. Roughly doubles the memory cost per point.
    #[must_use]
    pub fn with_orbit_recording(self) -> Self {
        Self {
            record_orbit: true,
            ..self
        }
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn escape_radius(&self) -> f64 {
        self.escape_radius
    }

    #[must_use]
    pub fn records_orbit(&self) -> bool {
        self.record_orbit
    }
}

fn ensure_finite(name: &'static str, value: Complex) -> Result<(), InvalidArgument> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidArgument::NonFiniteInput {
            name,
            real: value.real,
            imag: value.imag,
        })
    }
}

/// Iterates `z <- z² + c` from `z0` until `|z| > R` or the budget runs out.
pub fn iterate(
    z0: Complex,
    c: Complex,
    params: &IterationParams,
) -> Result<IterationResult, InvalidArgument> {
    iterate_map(&Quadratic, z0, c, params)
}

/// Escape-time iteration of an arbitrary [`IterationMap`].
///
/// The magnitude test compares `|z|²` against `R²` after every step. The step
/// that first exceeds it is reported as `iteration_count`.
pub fn iterate_map<M: IterationMap>(
    map: &M,
    z0: Complex,
    c: Complex,
    params: &IterationParams,
) -> Result<IterationResult, InvalidArgument> {
    ensure_finite("z0", z0)?;
    ensure_finite("c", c)?;

    let mut orbit = params
        .record_orbit
        .then(|| Vec::with_capacity(params.max_iterations as usize));
    let mut z = z0;

    for step in 1..=params.max_iterations {
        z = map.step(z, c);

        if let Some(orbit) = orbit.as_mut() {
            orbit.push(z);
        }

        if z.magnitude_squared() > params.escape_radius_squared {
            return Ok(IterationResult {
                escaped: true,
                iteration_count: step,
                final_z: z,
                orbit,
            });
        }
    }

    Ok(IterationResult {
        escaped: false,
        iteration_count: params.max_iterations,
        final_z: z,
        orbit,
    })
}
