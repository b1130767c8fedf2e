/// An integer pixel position. Origin is the top-left corner, y grows downward.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}
