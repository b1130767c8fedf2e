use crate::core::fractals::period::PeriodDetectorConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Size of the render pool. Rayon picks one per core when unset.
    pub worker_threads: Option<usize>,
    pub period: PeriodDetectorConfig,
}
