pub mod config;
pub mod render_engine;
pub mod request;

pub use config::EngineConfig;
pub use render_engine::RenderEngine;
pub use request::{DEFAULT_MAX_ITERATIONS, RenderRequest};
