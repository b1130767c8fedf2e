use crate::controllers::interactive::events::render::RenderEvent;

/// Receives finished renders. Called from the controller's worker thread.
pub trait InteractiveControllerPresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}
