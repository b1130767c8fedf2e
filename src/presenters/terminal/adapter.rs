use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Hands the newest render event from the controller's worker thread to the
/// terminal. Only the latest undelivered event is kept.
#[derive(Default)]
pub struct TerminalAdapter {
    render_event: Mutex<Option<RenderEvent>>,
    wake: Condvar,
}

impl InteractiveControllerPresenterPort for TerminalAdapter {
    fn present(&self, event: RenderEvent) {
        *self
            .render_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(event);
        self.wake.notify_all();
    }
}

impl TerminalAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_event(&self) -> Option<RenderEvent> {
        self.render_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Blocks until an event arrives or `timeout` elapses.
    pub fn wait_for_event(&self, timeout: Duration) -> Option<RenderEvent> {
        let deadline = Instant::now() + timeout;
        let mut guard = self
            .render_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        loop {
            if let Some(event) = guard.take() {
                return Some(event);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }

            guard = self
                .wake
                .wait_timeout(guard, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}
