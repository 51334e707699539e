//! Rectangle arithmetic shared by the placement code.
//!
//! Everything is integer math: the host hands out pixel rectangles and the
//! placement formulas must land on exact coordinates, no rounding slack.

/// A rectangle in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// X at which a rect of `width` sits horizontally centered in `self`.
    pub fn center_x(&self, width: i32) -> i32 {
        self.x + (self.width - width) / 2
    }

    /// Y at which a rect of `height` sits vertically centered in `self`.
    pub fn center_y(&self, height: i32) -> i32 {
        self.y + (self.height - height) / 2
    }
}
