use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::presenters::terminal::adapter::TerminalAdapter;
use crate::presenters::terminal::ascii::ascii_preview;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

/// Prints controller frames as ASCII art followed by a one-line summary.
pub struct TerminalPresenter {
    adapter: Arc<TerminalAdapter>,
    columns: u32,
    last_presented_generation: u64,
    last_error_message: Option<String>,
    last_render_duration: Option<Duration>,
}

impl TerminalPresenter {
    #[must_use]
    pub fn new(columns: u32) -> Self {
        Self {
            adapter: Arc::new(TerminalAdapter::new()),
            columns,
            last_presented_generation: 0,
            last_error_message: None,
            last_render_duration: None,
        }
    }

    #[must_use]
    pub fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort> {
        Arc::clone(&self.adapter) as Arc<dyn InteractiveControllerPresenterPort>
    }

    #[must_use]
    pub fn last_presented_generation(&self) -> u64 {
        self.last_presented_generation
    }

    #[must_use]
    pub fn last_error_message(&self) -> Option<&str> {
        self.last_error_message.as_deref()
    }

    #[must_use]
    pub fn last_render_duration(&self) -> Option<Duration> {
        self.last_render_duration
    }

    /// Waits up to `timeout` for the next event and draws it. Returns whether
    /// a frame was drawn.
    pub fn wait_and_draw<W: Write>(&mut self, out: &mut W, timeout: Duration) -> io::Result<bool> {
        match self.adapter.wait_for_event(timeout) {
            Some(event) => self.handle_event(out, event),
            None => Ok(false),
        }
    }

    fn handle_event<W: Write>(&mut self, out: &mut W, event: RenderEvent) -> io::Result<bool> {
        match event {
            RenderEvent::Frame(frame) => {
                if frame.generation <= self.last_presented_generation {
                    return Ok(false);
                }

                self.draw_frame(out, &frame)?;
                self.last_presented_generation = frame.generation;
                self.last_render_duration = Some(frame.render_duration);
                self.last_error_message = None;

                Ok(true)
            }
            RenderEvent::Error(error) => {
                if error.generation >= self.last_presented_generation {
                    writeln!(out, "render failed: {}", error.message)?;
                    self.last_error_message = Some(error.message);
                }

                Ok(false)
            }
        }
    }

    fn draw_frame<W: Write>(&self, out: &mut W, frame: &FrameData) -> io::Result<()> {
        let summary = frame.grid.summary();

        out.write_all(ascii_preview(&frame.pixel_buffer, self.columns).as_bytes())?;
        writeln!(
            out,
            "{}x{}  escaped {}  bounded {}  invalid {}  {:.1?}",
            frame.grid.width(),
            frame.grid.height(),
            summary.escaped,
            summary.bounded,
            summary.invalid,
            frame.render_duration,
        )
    }
}
