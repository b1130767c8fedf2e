mod period_detector;

pub use period_detector::{
    DEFAULT_EXACT_REPETITIONS, DEFAULT_PERIOD_TOLERANCE, PeriodDetector, PeriodDetectorConfig,
    period_of_parameter,
};
