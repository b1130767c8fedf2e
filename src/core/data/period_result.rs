use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodConfidence {
    /// The cycle repeated at least the configured number of times.
    Exact,
    /// The cycle repeated at least once but fewer times than required for `Exact`.
    Approximate,
    /// No candidate period matched within the search cap.
    Undetermined,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResult {
    /// Minimal cycle length. Always at least 1; meaningless when undetermined.
    pub period: u32,
    pub confidence: PeriodConfidence,
}

impl PeriodResult {
    pub const UNDETERMINED: Self = Self {
        period: 1,
        confidence: PeriodConfidence::Undetermined,
    };

    #[must_use]
    pub fn is_determined(&self) -> bool {
        self.confidence != PeriodConfidence::Undetermined
    }

    /// The period when one was found.
    #[must_use]
    pub fn determined_period(&self) -> Option<u32> {
        self.is_determined().then_some(self.period)
    }
}
