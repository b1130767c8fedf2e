use crate::core::data::iteration_result::IterationResult;
use crate::core::data::period_result::PeriodResult;
use crate::core::data::point::Point;
use crate::core::errors::InvalidArgument;

/// Classification of one pixel of a render.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelClassification {
    Evaluated {
        result: IterationResult,
        /// Present only for period-coloured renders on bounded points.
        period: Option<PeriodResult>,
    },
    /// The pixel could not be evaluated; the rest of the grid is unaffected.
    Invalid(InvalidArgument),
}

impl PixelClassification {
    #[must_use]
    pub fn iteration_result(&self) -> Option<&IterationResult> {
        match self {
            Self::Evaluated { result, .. } => Some(result),
            Self::Invalid(_) => None,
        }
    }

    #[must_use]
    pub fn period(&self) -> Option<PeriodResult> {
        match self {
            Self::Evaluated { period, .. } => *period,
            Self::Invalid(_) => None,
        }
    }

    #[must_use]
    pub fn is_escaped(&self) -> bool {
        matches!(self, Self::Evaluated { result, .. } if result.escaped)
    }

    #[must_use]
    pub fn is_bounded(&self) -> bool {
        matches!(self, Self::Evaluated { result, .. } if !result.escaped)
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridSummary {
    pub escaped: usize,
    pub bounded: usize,
    pub invalid: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultGridError {
    #[error("result grid expects {expected} cells but received {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Row-major grid of pixel classifications, `width * height` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultGrid {
    width: u32,
    height: u32,
    cells: Vec<PixelClassification>,
}

impl ResultGrid {
    pub fn from_cells(
        width: u32,
        height: u32,
        cells: Vec<PixelClassification>,
    ) -> Result<Self, ResultGridError> {
        let expected = width as usize * height as usize;

        if cells.len() != expected {
            return Err(ResultGridError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn cells(&self) -> &[PixelClassification] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, col: u32, row: u32) -> Option<&PixelClassification> {
        if col >= self.width || row >= self.height {
            return None;
        }

        self.cells.get(row as usize * self.width as usize + col as usize)
    }

    #[must_use]
    pub fn get_point(&self, point: Point) -> Option<&PixelClassification> {
        if point.x < 0 || point.y < 0 {
            return None;
        }

        self.get(point.x as u32, point.y as u32)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[PixelClassification]> {
        self.cells.chunks(self.width as usize)
    }

    #[must_use]
    pub fn summary(&self) -> GridSummary {
        self.cells
            .iter()
            .fold(GridSummary::default(), |mut summary, cell| {
                match cell {
                    PixelClassification::Evaluated { result, .. } if result.escaped => {
                        summary.escaped += 1
                    }
                    PixelClassification::Evaluated { .. } => summary.bounded += 1,
                    PixelClassification::Invalid(_) => summary.invalid += 1,
                }
                summary
            })
    }
}
