use crate::core::data::complex::Complex;
use crate::core::errors::InvalidArgument;
use crate::core::fractals::iteration::IterationParams;

pub const DEFAULT_STABILITY_EPSILON: f64 = 1e-5;

/// Where a starting point sits relative to the Julia set boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryClass {
    /// |z| exceeded the escape radius after this many steps.
    Escaped(u32),
    /// Successive iterates came within epsilon of each other after this many steps.
    Stable(u32),
    /// Neither escaped nor settled within the iteration budget.
    Boundary,
}

impl BoundaryClass {
    #[must_use]
    pub fn is_boundary(self) -> bool {
        self == Self::Boundary
    }
}

/// Tests whether `z0` lies on the boundary of the Julia set for `c`.
///
/// Points that escape, or whose orbit stops moving, are off the boundary.
/// Points that keep wandering for the whole budget are treated as on it.
pub fn classify_julia_boundary(
    z0: Complex,
    c: Complex,
    params: &IterationParams,
    epsilon: f64,
) -> Result<BoundaryClass, InvalidArgument> {
    for (name, value) in [("z0", z0), ("c", c)] {
        if !value.is_finite() {
            return Err(InvalidArgument::NonFiniteInput {
                name,
                real: value.real,
                imag: value.imag,
            });
        }
    }

    let radius_squared = params.escape_radius() * params.escape_radius();
    let epsilon_squared = epsilon * epsilon;
    let mut z = z0;

    for step in 0..params.max_iterations() {
        if z.magnitude_squared() > radius_squared {
            return Ok(BoundaryClass::Escaped(step));
        }

        let next = z * z + c;

        if (next - z).magnitude_squared() < epsilon_squared {
            return Ok(BoundaryClass::Stable(step));
        }

        z = next;
    }

    Ok(BoundaryClass::Boundary)
}
