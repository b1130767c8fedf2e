use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::colour::factory::gradient_factory;
use crate::core::colour::gradient::EscapeGradient;
use crate::core::colour::kinds::GradientKind;
use crate::core::colour::logarithmic::LogScale;
use crate::core::data::colour::Colour;
use crate::core::data::iteration_result::IterationResult;
use crate::core::data::period_result::PeriodResult;
use crate::core::data::result_grid::PixelClassification;
use crate::core::fractals::render_mode::RenderMode;

/// Reserved for points treated as inside the set, undetermined periods and
/// invalid cells.
pub const IN_SET_COLOUR: Colour = Colour::BLACK;
pub const BACKGROUND_COLOUR: Colour = Colour::rgb(255, 255, 255);
pub const FILLED_JULIA_COLOUR: Colour = Colour::rgb(255, 0, 255);

pub const PERIOD_LOW_COLOUR: Colour = Colour::rgb(255, 0, 0);
pub const PERIOD_HIGH_COLOUR: Colour = Colour::rgb(0, 0, 255);
/// Periods at or above this saturate the period scale.
pub const PERIOD_CEILING: f64 = 100.0;

pub const FAST_ESCAPE_COLOUR: Colour = Colour::rgb(243, 240, 220);
pub const SLOW_ESCAPE_COLOUR: Colour = Colour::rgb(39, 81, 128);
/// Escape counts at or above this saturate the escape-colour scale,
/// whatever the iteration budget.
pub const ESCAPE_CEILING: f64 = 100.0;

/// Pure mapping from classifications to display colours.
#[derive(Debug)]
pub struct ColourPolicy {
    gradient: Box<dyn EscapeGradient>,
    escape_scale: LogScale,
    period_scale: LogScale,
    background: Colour,
    filled: Colour,
}

impl ColourPolicy {
    #[must_use]
    pub fn new(gradient: GradientKind, max_iterations: u32) -> Self {
        Self {
            gradient: gradient_factory(gradient, max_iterations),
            escape_scale: LogScale::new(FAST_ESCAPE_COLOUR, SLOW_ESCAPE_COLOUR, ESCAPE_CEILING),
            period_scale: LogScale::new(PERIOD_LOW_COLOUR, PERIOD_HIGH_COLOUR, PERIOD_CEILING),
            background: BACKGROUND_COLOUR,
            filled: FILLED_JULIA_COLOUR,
        }
    }

    #[must_use]
    pub fn with_background(self, background: Colour) -> Self {
        Self { background, ..self }
    }

    #[must_use]
    pub fn with_fill(self, filled: Colour) -> Self {
        Self { filled, ..self }
    }

    #[must_use]
    pub fn gradient_kind(&self) -> GradientKind {
        self.gradient.kind()
    }

    #[must_use]
    pub fn colour_for(&self, cell: &PixelClassification, mode: RenderMode) -> Colour {
        match cell {
            PixelClassification::Invalid(_) => IN_SET_COLOUR,
            PixelClassification::Evaluated { result, period } => match (mode, period) {
                (RenderMode::PeriodColouredMandelbrot, Some(period)) if !result.escaped => {
                    self.colour_for_period(period)
                }
                _ => self.colour_for_iteration(result, mode),
            },
        }
    }

    #[must_use]
    pub fn colour_for_iteration(&self, result: &IterationResult, mode: RenderMode) -> Colour {
        match (mode, result.escaped) {
            (RenderMode::FilledJulia, false) => self.filled,
            (RenderMode::FilledJulia | RenderMode::PeriodColouredMandelbrot, true) => {
                self.background
            }
            (RenderMode::Mandelbrot | RenderMode::Julia, true) => {
                self.gradient.map(result.iteration_count)
            }
            (RenderMode::JuliaEscapeColour, true) => {
                self.escape_scale.colour(f64::from(result.iteration_count))
            }
            (_, false) => IN_SET_COLOUR,
        }
    }

    #[must_use]
    pub fn colour_for_period(&self, period: &PeriodResult) -> Colour {
        period
            .determined_period()
            .map_or(IN_SET_COLOUR, |p| self.period_scale.colour(f64::from(p)))
    }

    /// View of this policy for one render mode, usable wherever a
    /// [`ColourMap`] over cells is expected.
    #[must_use]
    pub fn for_mode(&self, mode: RenderMode) -> ModeColours<'_> {
        ModeColours { policy: self, mode }
    }
}

impl Default for ColourPolicy {
    fn default() -> Self {
        Self::new(GradientKind::default(), 100)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ModeColours<'a> {
    policy: &'a ColourPolicy,
    mode: RenderMode,
}

impl<'a> ColourMap<&'a PixelClassification> for ModeColours<'_> {
    fn map(&self, cell: &'a PixelClassification) -> Colour {
        self.policy.colour_for(cell, self.mode)
    }

    fn display_name(&self) -> &str {
        self.mode.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;
    use crate::core::data::period_result::PeriodConfidence;
    use crate::core::errors::InvalidArgument;

    fn result(escaped: bool, iteration_count: u32) -> IterationResult {
        IterationResult {
            escaped,
            iteration_count,
            final_z: Complex::ZERO,
            orbit: None,
        }
    }

    fn cell(escaped: bool, iteration_count: u32, period: Option<PeriodResult>) -> PixelClassification {
        PixelClassification::Evaluated {
            result: result(escaped, iteration_count),
            period,
        }
    }

    fn period(period: u32, confidence: PeriodConfidence) -> PeriodResult {
        PeriodResult { period, confidence }
    }

    #[test]
    fn bounded_points_are_black_in_escape_modes() {
        let policy = ColourPolicy::default();

        for mode in [
            RenderMode::Mandelbrot,
            RenderMode::Julia,
            RenderMode::JuliaEscapeColour,
        ] {
            assert_eq!(policy.colour_for(&cell(false, 100, None), mode), IN_SET_COLOUR);
        }
    }

    #[test]
    fn escaped_points_are_never_black_in_escape_modes() {
        for kind in GradientKind::ALL {
            let policy = ColourPolicy::new(*kind, 100);

            for count in [1, 2, 50, 99, 100] {
                for mode in [
                    RenderMode::Mandelbrot,
                    RenderMode::Julia,
                    RenderMode::JuliaEscapeColour,
                ] {
                    assert_ne!(
                        policy.colour_for(&cell(true, count, None), mode),
                        IN_SET_COLOUR,
                        "{} escaped at {} is black under {}",
                        mode,
                        count,
                        kind
                    );
                }
            }
        }
    }

    #[test]
    fn invalid_cells_are_black() {
        let policy = ColourPolicy::default();
        let invalid = PixelClassification::Invalid(InvalidArgument::ZeroMaxIterations);

        for &mode in RenderMode::ALL {
            assert_eq!(policy.colour_for(&invalid, mode), IN_SET_COLOUR);
        }
    }

    #[test]
    fn filled_julia_is_binary() {
        let policy = ColourPolicy::default();

        assert_eq!(
            policy.colour_for(&cell(false, 100, None), RenderMode::FilledJulia),
            FILLED_JULIA_COLOUR
        );
        assert_eq!(
            policy.colour_for(&cell(true, 3, None), RenderMode::FilledJulia),
            BACKGROUND_COLOUR
        );
        assert_eq!(
            policy.colour_for(&cell(true, 90, None), RenderMode::FilledJulia),
            BACKGROUND_COLOUR
        );
    }

    #[test]
    fn julia_escape_colour_runs_from_off_white_to_blue() {
        let policy = ColourPolicy::new(GradientKind::Fire, 100);

        let fast = policy.colour_for_iteration(&result(true, 1), RenderMode::JuliaEscapeColour);
        let slow = policy.colour_for_iteration(&result(true, 100), RenderMode::JuliaEscapeColour);

        assert!(fast.r > slow.r);
        assert!(fast.g > slow.g);
        assert!(fast.b > slow.b);
        assert!(slow.r <= SLOW_ESCAPE_COLOUR.r + 1);
    }

    #[test]
    fn julia_escape_colour_does_not_depend_on_budget() {
        let short = ColourPolicy::new(GradientKind::Fire, 100);
        let long = ColourPolicy::new(GradientKind::Fire, 1_000);
        let mode = RenderMode::JuliaEscapeColour;

        for count in [1, 7, 42, 100] {
            assert_eq!(
                short.colour_for_iteration(&result(true, count), mode),
                long.colour_for_iteration(&result(true, count), mode)
            );
        }

        assert_eq!(
            long.colour_for_iteration(&result(true, 500), mode),
            SLOW_ESCAPE_COLOUR
        );
    }

    #[test]
    fn mandelbrot_uses_selected_gradient() {
        let fire = ColourPolicy::new(GradientKind::Fire, 100);
        let blue = ColourPolicy::new(GradientKind::BlueWhite, 100);

        assert_eq!(fire.gradient_kind(), GradientKind::Fire);
        assert_eq!(
            fire.colour_for(&cell(true, 25, None), RenderMode::Mandelbrot),
            Colour::rgb(255, 0, 0)
        );
        assert_ne!(
            fire.colour_for(&cell(true, 25, None), RenderMode::Mandelbrot),
            blue.colour_for(&cell(true, 25, None), RenderMode::Mandelbrot)
        );
    }

    #[test]
    fn period_mode_colours_by_period() {
        let policy = ColourPolicy::default();
        let mode = RenderMode::PeriodColouredMandelbrot;

        let one = policy.colour_for(&cell(false, 100, Some(period(1, PeriodConfidence::Exact))), mode);
        let three = policy.colour_for(
            &cell(false, 100, Some(period(3, PeriodConfidence::Approximate))),
            mode,
        );

        assert_ne!(one, IN_SET_COLOUR);
        assert_ne!(one, three);
        assert!(one.r > three.r);
        assert!(one.b < three.b);
        assert_eq!(one.g, 0);
    }

    #[test]
    fn period_mode_undetermined_and_missing_are_black_escaped_is_background() {
        let policy = ColourPolicy::default();
        let mode = RenderMode::PeriodColouredMandelbrot;

        assert_eq!(
            policy.colour_for(&cell(false, 100, Some(PeriodResult::UNDETERMINED)), mode),
            IN_SET_COLOUR
        );
        assert_eq!(policy.colour_for(&cell(false, 100, None), mode), IN_SET_COLOUR);
        assert_eq!(
            policy.colour_for(&cell(true, 4, None), mode),
            BACKGROUND_COLOUR
        );
    }

    #[test]
    fn large_periods_saturate_to_blue() {
        let policy = ColourPolicy::default();

        assert_eq!(
            policy.colour_for_period(&period(500, PeriodConfidence::Exact)),
            PERIOD_HIGH_COLOUR
        );
    }

    #[test]
    fn overrides_apply() {
        let policy = ColourPolicy::default()
            .with_background(Colour::rgb(1, 2, 3))
            .with_fill(Colour::rgb(4, 5, 6));

        assert_eq!(
            policy.colour_for(&cell(true, 3, None), RenderMode::FilledJulia),
            Colour::rgb(1, 2, 3)
        );
        assert_eq!(
            policy.colour_for(&cell(false, 3, None), RenderMode::FilledJulia),
            Colour::rgb(4, 5, 6)
        );
    }

    #[test]
    fn mode_view_delegates_to_policy() {
        let policy = ColourPolicy::default();
        let view = policy.for_mode(RenderMode::FilledJulia);
        let bounded = cell(false, 100, None);

        assert_eq!(view.map(&bounded), FILLED_JULIA_COLOUR);
        assert_eq!(view.display_name(), "Filled Julia");
    }
}
