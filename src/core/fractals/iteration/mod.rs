mod complex_iterator;

pub use complex_iterator::{
    DEFAULT_ESCAPE_RADIUS, IterationMap, IterationParams, Quadratic, iterate, iterate_map,
};
