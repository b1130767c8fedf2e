pub mod controllers;
pub mod core;
pub mod input;
pub mod presenters;

pub use crate::controllers::interactive::{InteractiveController, InteractiveControllerPresenterPort, RenderEvent};
pub use crate::controllers::session::{ExplorerSession, ExplorerView, SessionConfig};
pub use crate::core::colour::{ColourPolicy, GradientKind};
pub use crate::core::data::complex::Complex;
pub use crate::core::data::viewport::Viewport;
pub use crate::core::engine::{EngineConfig, RenderEngine, RenderRequest};
pub use crate::core::errors::{Cancelled, EngineError, InvalidArgument, RenderError};
pub use crate::core::fractals::render_mode::RenderMode;
pub use crate::core::zoom::ZoomStack;
pub use crate::input::cli::{CliArgs, RunCliCommand};
pub use crate::presenters::terminal::TerminalPresenter;
