use crate::controllers::session::config::SessionConfig;
use crate::core::actions::cancellation::RenderGeneration;
use crate::core::data::complex::Complex;
use crate::core::data::period_result::PeriodResult;
use crate::core::data::point::Point;
use crate::core::data::result_grid::ResultGrid;
use crate::core::data::viewport::Viewport;
use crate::core::engine::{RenderEngine, RenderRequest};
use crate::core::errors::{InvalidArgument, RenderError};
use crate::core::fractals::period::{PeriodDetector, period_of_parameter};
use crate::core::fractals::render_mode::RenderMode;
use crate::core::util::pixel_mapping::PixelMapping;
use crate::core::zoom::ZoomStack;
use tracing::debug;

/// The two independently navigable views of the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExplorerView {
    Mandelbrot,
    Julia,
}

impl ExplorerView {
    /// The view a render of `mode` draws into.
    #[must_use]
    pub const fn for_mode(mode: RenderMode) -> Self {
        if mode.requires_julia_parameter() {
            Self::Julia
        } else {
            Self::Mandelbrot
        }
    }
}

/// Everything an interactive explorer carries between renders: one zoom
/// history per view, the selected Julia parameter and the render generation.
#[derive(Debug)]
pub struct ExplorerSession {
    config: SessionConfig,
    mandelbrot_zoom: ZoomStack,
    julia_zoom: ZoomStack,
    julia_c: Complex,
    period_detector: PeriodDetector,
    generation: RenderGeneration,
}

impl ExplorerSession {
    pub fn new(config: SessionConfig) -> Result<Self, InvalidArgument> {
        config.validate()?;

        Ok(Self {
            mandelbrot_zoom: ZoomStack::new(config.mandelbrot_view),
            julia_zoom: ZoomStack::new(config.julia_view),
            julia_c: config.initial_julia_c,
            period_detector: PeriodDetector::new(config.period)?,
            generation: RenderGeneration::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn julia_parameter(&self) -> Complex {
        self.julia_c
    }

    #[must_use]
    pub fn zoom_stack(&self, view: ExplorerView) -> &ZoomStack {
        match view {
            ExplorerView::Mandelbrot => &self.mandelbrot_zoom,
            ExplorerView::Julia => &self.julia_zoom,
        }
    }

    #[must_use]
    pub fn viewport(&self, view: ExplorerView) -> Viewport {
        self.zoom_stack(view).current()
    }

    /// Shared with whoever needs to cancel this session's renders.
    #[must_use]
    pub fn render_generation(&self) -> &RenderGeneration {
        &self.generation
    }

    /// Picks c from a click on the Mandelbrot view drawn at
    /// `pixel_width x pixel_height`.
    pub fn select_julia_parameter(
        &mut self,
        pixel: Point,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Complex, InvalidArgument> {
        let mapping = PixelMapping::new(self.mandelbrot_zoom.current(), pixel_width, pixel_height)?;
        let c = mapping.pixel_to_complex(pixel)?;

        self.set_julia_parameter(c)?;

        Ok(c)
    }

    pub fn set_julia_parameter(&mut self, c: Complex) -> Result<(), InvalidArgument> {
        if !c.is_finite() {
            return Err(InvalidArgument::NonFiniteInput {
                name: "julia_c",
                real: c.real,
                imag: c.imag,
            });
        }

        debug!(real = c.real, imag = c.imag, "julia parameter selected");
        self.julia_c = c;

        Ok(())
    }

    pub fn zoom_in(
        &mut self,
        view: ExplorerView,
        corner_a: Point,
        corner_b: Point,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Viewport, InvalidArgument> {
        self.zoom_stack_mut(view)
            .push_zoom(corner_a, corner_b, pixel_width, pixel_height)
    }

    pub fn zoom_in_keep_ratio(
        &mut self,
        view: ExplorerView,
        anchor: Point,
        other: Point,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Viewport, InvalidArgument> {
        self.zoom_stack_mut(view)
            .push_zoom_keep_ratio(anchor, other, pixel_width, pixel_height)
    }

    pub fn zoom_out(&mut self, view: ExplorerView) -> Viewport {
        self.zoom_stack_mut(view).pop_zoom()
    }

    pub fn reset_zoom(&mut self, view: ExplorerView) -> Viewport {
        self.zoom_stack_mut(view).reset()
    }

    /// Snapshot of the current settings for one render of `mode`.
    ///
    /// Period-coloured renders iterate for at least `period_iterates` steps,
    /// since the recorded orbit is what the period detector inspects.
    #[must_use]
    pub fn build_request(&self, mode: RenderMode, pixel_width: u32, pixel_height: u32) -> RenderRequest {
        let max_iterations = if mode.detects_periods() {
            self.config.max_iterations.max(self.config.period_iterates)
        } else {
            self.config.max_iterations
        };

        let request = RenderRequest::new(
            mode,
            self.viewport(ExplorerView::for_mode(mode)),
            pixel_width,
            pixel_height,
        )
        .with_max_iterations(max_iterations)
        .with_escape_radius(self.config.escape_radius);

        if mode.requires_julia_parameter() {
            request.with_julia_parameter(self.julia_c)
        } else {
            request
        }
    }

    /// Renders the current view for `mode`. Starting a render cancels any
    /// render this session started earlier that is still running.
    pub fn render(
        &self,
        engine: &RenderEngine,
        mode: RenderMode,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<ResultGrid, RenderError> {
        let request = self.build_request(mode, pixel_width, pixel_height);
        let token = self.generation.begin();

        debug!(generation = token.generation(), mode = %mode, "session render started");

        engine.render(&request, &token)
    }

    /// Period of the Mandelbrot orbit of the selected Julia parameter.
    pub fn period_of_selected_parameter(&self) -> Result<PeriodResult, InvalidArgument> {
        period_of_parameter(self.julia_c, self.config.period_iterates, &self.period_detector)
    }

    fn zoom_stack_mut(&mut self, view: ExplorerView) -> &mut ZoomStack {
        match view {
            ExplorerView::Mandelbrot => &mut self.mandelbrot_zoom,
            ExplorerView::Julia => &mut self.julia_zoom,
        }
    }
}
