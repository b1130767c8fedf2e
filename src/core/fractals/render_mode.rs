use serde::{Deserialize, Serialize};
use std::fmt;

/// What a render computes and how its cells are coloured.
///
/// Decides which parameter is fixed (c for the Julia family, z₀ = 0 for the
/// Mandelbrot family) and which result fields the colour policy consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    Mandelbrot,
    Julia,
    FilledJulia,
    JuliaEscapeColour,
    PeriodColouredMandelbrot,
}

impl RenderMode {
    pub const ALL: &'static [Self] = &[
        Self::Mandelbrot,
        Self::Julia,
        Self::FilledJulia,
        Self::JuliaEscapeColour,
        Self::PeriodColouredMandelbrot,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
            Self::FilledJulia => "Filled Julia",
            Self::JuliaEscapeColour => "Julia escape colour",
            Self::PeriodColouredMandelbrot => "Period coloured Mandelbrot",
        }
    }

    /// Julia-family modes iterate z₀ = pixel with a caller-supplied c.
    #[must_use]
    pub const fn requires_julia_parameter(self) -> bool {
        matches!(
            self,
            Self::Julia | Self::FilledJulia | Self::JuliaEscapeColour
        )
    }

    #[must_use]
    pub const fn detects_periods(self) -> bool {
        matches!(self, Self::PeriodColouredMandelbrot)
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
