use crate::controllers::interactive::InteractiveController;
use crate::controllers::session::{ConfigError, ExplorerSession, ExplorerView, SessionConfig};
use crate::core::data::period_result::PeriodConfidence;
use crate::core::data::point::Point;
use crate::core::engine::RenderEngine;
use crate::core::errors::{EngineError, InvalidArgument};
use crate::core::fractals::iteration::IterationParams;
use crate::core::fractals::julia::boundary::{DEFAULT_STABILITY_EPSILON, classify_julia_boundary};
use crate::core::fractals::julia::inverse_iteration::{InverseIteration, rasterize_points};
use crate::core::fractals::render_mode::RenderMode;
use crate::core::util::pixel_mapping::PixelMapping;
use crate::input::cli::args::CliArgs;
use crate::presenters::terminal::TerminalPresenter;
use crate::presenters::terminal::ascii::raster_preview;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const FRAME_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("render failed: {0}")]
    Render(String),

    #[error("render did not finish within {0:?}")]
    Timeout(Duration),
}

/// One-shot terminal render: builds a session from the config file and
/// flags, renders through the interactive controller and prints the frame.
pub struct RunCliCommand {
    args: CliArgs,
}

impl RunCliCommand {
    #[must_use]
    pub fn new(args: CliArgs) -> Self {
        Self { args }
    }

    /// Merges the config file (if any) with the command-line overrides.
    pub fn session_config(&self) -> Result<SessionConfig, CliError> {
        let args = &self.args;
        let mut config = match &args.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };

        if let Some(iterations) = args.iterations {
            config.max_iterations = iterations;
        }
        if let Some(radius) = args.escape_radius {
            config.escape_radius = radius;
        }
        if let Some(gradient) = args.gradient {
            config.gradient = gradient.into();
        }
        if let Some(threads) = args.threads {
            config.worker_threads = Some(threads);
        }
        if let Some(c) = args.julia_c {
            config.initial_julia_c = c;
        }
        if let Some(view) = args.view {
            match ExplorerView::for_mode(self.mode()) {
                ExplorerView::Mandelbrot => config.mandelbrot_view = view,
                ExplorerView::Julia => config.julia_view = view,
            }
        }

        config.validate()?;

        Ok(config)
    }

    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.args.mode.into()
    }

    pub fn execute<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let config = self.session_config()?;
        let session = ExplorerSession::new(config)?;
        let engine = Arc::new(RenderEngine::new(config.engine_config())?);
        let mode = self.mode();

        info!(
            mode = %mode,
            width = self.args.width,
            height = self.args.height,
            threads = engine.worker_threads(),
            "rendering"
        );

        let request = session.build_request(mode, self.args.width, self.args.height);
        request.validate()?;

        let mut presenter = TerminalPresenter::new(self.args.columns);
        let mut controller =
            InteractiveController::new(Arc::clone(&engine), config.gradient, presenter.share_adapter());

        controller.submit_request(request);
        let drawn = presenter.wait_and_draw(out, FRAME_TIMEOUT)?;
        controller.shutdown();

        if !drawn {
            return Err(match presenter.last_error_message() {
                Some(message) => CliError::Render(message.to_string()),
                None => CliError::Timeout(FRAME_TIMEOUT),
            });
        }

        if self.args.period {
            self.print_period(&session, out)?;
        }

        if self.args.trace {
            self.print_trace(&session, out)?;
        }

        if self.args.boundary {
            self.print_boundary(&session, out)?;
        }

        Ok(())
    }

    fn print_period<W: Write>(&self, session: &ExplorerSession, out: &mut W) -> Result<(), CliError> {
        let c = session.julia_parameter();
        let result = session.period_of_selected_parameter()?;

        match result.confidence {
            PeriodConfidence::Undetermined => writeln!(out, "period of {c}: undetermined")?,
            PeriodConfidence::Exact => writeln!(out, "period of {c}: {}", result.period)?,
            PeriodConfidence::Approximate => {
                writeln!(out, "period of {c}: {} (approximate)", result.period)?
            }
        }

        Ok(())
    }

    fn print_trace<W: Write>(&self, session: &ExplorerSession, out: &mut W) -> Result<(), CliError> {
        let c = session.julia_parameter();
        let points = InverseIteration::new(c)?
            .with_count(self.args.trace_points)
            .trace();

        let mapping = PixelMapping::new(
            session.viewport(ExplorerView::Julia),
            self.args.width,
            self.args.height,
        )?;
        let raster = rasterize_points(&points, &mapping);

        writeln!(out, "inverse iteration trace of J({c}):")?;
        out.write_all(raster_preview(&raster, self.args.columns).as_bytes())?;
        writeln!(out, "{} points, {} pixels lit", points.len(), raster.lit_pixels())?;

        Ok(())
    }

    fn print_boundary<W: Write>(
        &self,
        session: &ExplorerSession,
        out: &mut W,
    ) -> Result<(), CliError> {
        let c = session.julia_parameter();
        let config = session.config();
        let params = IterationParams::new(config.max_iterations, config.escape_radius)?;
        let mapping = PixelMapping::new(
            session.viewport(ExplorerView::Julia),
            self.args.width,
            self.args.height,
        )?;

        let mut on_boundary = Vec::new();
        for y in 0..self.args.height {
            for x in 0..self.args.width {
                let z0 = mapping.pixel_to_complex(Point {
                    x: x as i32,
                    y: y as i32,
                })?;

                let class = classify_julia_boundary(z0, c, &params, DEFAULT_STABILITY_EPSILON)?;
                if class.is_boundary() {
                    on_boundary.push(z0);
                }
            }
        }

        let raster = rasterize_points(&on_boundary, &mapping);

        writeln!(out, "boundary of J({c}):")?;
        out.write_all(raster_preview(&raster, self.args.columns).as_bytes())?;
        writeln!(
            out,
            "{} of {} pixels on the boundary",
            on_boundary.len(),
            u64::from(self.args.width) * u64::from(self.args.height)
        )?;

        Ok(())
    }
}
