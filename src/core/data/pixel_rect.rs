use crate::core::data::point::Point;
use crate::core::errors::InvalidArgument;

/// An inclusive rectangle of pixels, at least 2x2.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    top_left: Point,
    bottom_right: Point,
}

impl PixelRect {
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self, InvalidArgument> {
        let dx = i64::from(bottom_right.x) - i64::from(top_left.x);
        let dy = i64::from(bottom_right.y) - i64::from(top_left.y);

        let width = dx + if dx >= 0 { 1 } else { -1 };
        let height = dy + if dy >= 0 { 1 } else { -1 };

        if width < 2 || height < 2 {
            return Err(InvalidArgument::InvalidPixelRect { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// The full grid `(0, 0)..=(width - 1, height - 1)`.
    pub fn from_size(width: u32, height: u32) -> Result<Self, InvalidArgument> {
        if width < 2 || height < 2 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(InvalidArgument::InvalidPixelGrid { width, height });
        }

        Ok(Self {
            top_left: Point { x: 0, y: 0 },
            bottom_right: Point {
                x: width as i32 - 1,
                y: height as i32 - 1,
            },
        })
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        (self.bottom_right.x - self.top_left.x + 1) as u32
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        (self.bottom_right.y - self.top_left.y + 1) as u32
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.top_left.x <= point.x
            && self.top_left.y <= point.y
            && self.bottom_right.x >= point.x
            && self.bottom_right.y >= point.y
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}
