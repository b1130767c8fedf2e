//! Explorer state carried between renders.

pub mod config;
mod explorer_session;

pub use config::{ConfigError, DEFAULT_PERIOD_ITERATES, SessionConfig};
pub use explorer_session::{ExplorerSession, ExplorerView};
