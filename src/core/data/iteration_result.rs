use crate::core::data::complex::Complex;

/// Outcome of iterating a single point.
///
/// `escaped == false` means the orbit stayed within the escape radius for the
/// whole iteration budget, which is an approximation of set membership and not
/// a proof.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationResult {
    pub escaped: bool,
    /// Step at which the orbit escaped, or the iteration budget when bounded.
    pub iteration_count: u32,
    pub final_z: Complex,
    /// Every z visited after z₀, present only when recording was requested.
    pub orbit: Option<Vec<Complex>>,
}

impl IterationResult {
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        !self.escaped
    }

    /// Drops the recorded orbit, keeping the classification.
    #[must_use]
    pub fn without_orbit(self) -> Self {
        Self {
            orbit: None,
            ..self
        }
    }
}
