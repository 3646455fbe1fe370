//! Core geometry types for the layout engine
//!
//! All coordinates are integer pixels. Grid lines are computed with integer
//! division, so every value the engine produces is exact.

use serde::{Deserialize, Serialize};

/// A 2D point in the container's coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Create a zero-sized extent
    pub fn zero() -> Self {
        Self::new(0, 0)
    }
}

/// Axis-aligned rectangle: origin plus extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized rectangle at the origin
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Right edge x-coordinate, saturating at `i32::MAX`
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge y-coordinate, saturating at `i32::MAX`
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Shrink by the given margins, flooring the extent at zero
    pub fn inset(&self, insets: &Insets) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.horizontal()).max(0),
            (self.height - insets.vertical()).max(0),
        )
    }
}

/// Pixel margins around a cell or inside a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Insets {
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub bottom: i32,
    #[serde(default)]
    pub right: i32,
}

impl Insets {
    pub fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Same margin on all four sides
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// The parts of the container geometry the layout consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerGeometry {
    pub size: Size,
    #[serde(default)]
    pub insets: Insets,
}

impl ContainerGeometry {
    pub fn new(size: Size, insets: Insets) -> Self {
        Self { size, insets }
    }

    /// The client area left after removing the container insets
    pub fn view(&self) -> Rect {
        Rect::new(0, 0, self.size.width, self.size.height).inset(&self.insets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.size(), Size::new(100, 50));
    }

    #[test]
    fn test_rect_edges_saturate() {
        let r = Rect::new(i32::MAX - 10, i32::MAX - 1, 100, 10);
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(r.bottom(), i32::MAX);
        assert_eq!(Insets::new(0, i32::MAX, 0, 5).horizontal(), i32::MAX);
    }

    #[test]
    fn test_inset_floors_at_zero() {
        let r = Rect::new(0, 0, 10, 10).inset(&Insets::uniform(8));
        assert_eq!(r, Rect::new(8, 8, 0, 0));
    }

    #[test]
    fn test_container_view() {
        let container = ContainerGeometry::new(Size::new(200, 100), Insets::new(5, 10, 15, 20));
        assert_eq!(container.view(), Rect::new(10, 5, 170, 80));
    }
}
