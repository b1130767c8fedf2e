//! Background render loop for interactive exploration.
//!
//! The controller owns a worker thread that always renders the most recent
//! [`RenderRequest`](crate::core::engine::RenderRequest). Older requests are
//! cancelled mid-sweep and their results dropped; only the newest generation
//! reaches the presenter port.

mod controller;
pub mod data;
pub mod events;
pub mod ports;

pub use controller::InteractiveController;
pub use events::render::RenderEvent;
pub use ports::presenter::InteractiveControllerPresenterPort;
