use crate::core::colour::kinds::GradientKind;
use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::render_mode::RenderMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Mandelbrot,
    Julia,
    FilledJulia,
    JuliaEscapeColour,
    Period,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Mandelbrot => Self::Mandelbrot,
            ModeArg::Julia => Self::Julia,
            ModeArg::FilledJulia => Self::FilledJulia,
            ModeArg::JuliaEscapeColour => Self::JuliaEscapeColour,
            ModeArg::Period => Self::PeriodColouredMandelbrot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GradientArg {
    Fire,
    BlueWhite,
}

impl From<GradientArg> for GradientKind {
    fn from(gradient: GradientArg) -> Self {
        match gradient {
            GradientArg::Fire => Self::Fire,
            GradientArg::BlueWhite => Self::BlueWhite,
        }
    }
}

/// Render a Mandelbrot or Julia view of z² + c to the terminal
#[derive(Parser, Debug)]
#[command(name = "quadratic-explorer")]
#[command(version)]
#[command(about = "Explore the dynamics of z² + c from the terminal", long_about = None)]
pub struct CliArgs {
    /// What to render
    #[arg(short, long, value_enum, default_value_t = ModeArg::Mandelbrot)]
    pub mode: ModeArg,

    /// Render width in pixels
    #[arg(long, default_value_t = 320)]
    pub width: u32,

    /// Render height in pixels
    #[arg(long, default_value_t = 240)]
    pub height: u32,

    /// Iteration budget (overrides the config file)
    #[arg(short = 'n', long)]
    pub iterations: Option<u32>,

    /// Escape radius (overrides the config file)
    #[arg(long)]
    pub escape_radius: Option<f64>,

    /// Viewport as REAL_MIN,REAL_MAX,IMAG_MIN,IMAG_MAX
    #[arg(long, value_name = "BOUNDS", value_parser = parse_viewport, allow_hyphen_values = true)]
    pub view: Option<Viewport>,

    /// Julia parameter as RE,IM
    #[arg(short = 'c', long, value_name = "RE,IM", value_parser = parse_complex, allow_hyphen_values = true)]
    pub julia_c: Option<Complex>,

    /// JSON session config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Escape-time gradient (overrides the config file)
    #[arg(long, value_enum)]
    pub gradient: Option<GradientArg>,

    /// Render worker threads; one per core when unset
    #[arg(long)]
    pub threads: Option<usize>,

    /// Width of the ASCII preview in characters
    #[arg(long, default_value_t = 80)]
    pub columns: u32,

    /// Also print the period of the Julia parameter's Mandelbrot orbit
    #[arg(long)]
    pub period: bool,

    /// Also trace the Julia set by inverse iteration
    #[arg(long)]
    pub trace: bool,

    /// Also mark the pixels of the Julia view that lie on the set's boundary
    #[arg(long)]
    pub boundary: bool,

    /// Points emitted by the inverse-iteration trace
    #[arg(long, default_value_t = crate::core::fractals::julia::inverse_iteration::DEFAULT_POINT_COUNT, requires = "trace")]
    pub trace_points: usize,
}

fn parse_floats<const N: usize>(value: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();

    if parts.len() != N {
        return Err(format!("expected {N} comma-separated numbers, got {}", parts.len()));
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|err| format!("'{part}' is not a number: {err}"))?;
    }

    Ok(out)
}

pub fn parse_complex(value: &str) -> Result<Complex, String> {
    let [real, imag] = parse_floats::<2>(value)?;

    Ok(Complex::new(real, imag))
}

pub fn parse_viewport(value: &str) -> Result<Viewport, String> {
    let [real_min, real_max, imag_min, imag_max] = parse_floats::<4>(value)?;

    Viewport::new(real_min, real_max, imag_min, imag_max).map_err(|err| err.to_string())
}
