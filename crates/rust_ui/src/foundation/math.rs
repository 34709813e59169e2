//! Math utilities and types
//!
//! Provides the integer screen-space geometry used by layout and hit-testing,
//! plus the float vectors used for interpolation.

use serde::{Deserialize, Serialize};

pub use nalgebra::Vector2;

/// 2D float vector type
pub type Vec2 = Vector2<f32>;

/// 2D integer point / offset in screen pixels
pub type Point = Vector2<i32>;

/// Axis-aligned integer rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Left edge
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Exclusive right edge
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size as a point
    #[must_use]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Returns a copy moved by the given offset
    #[must_use]
    pub fn translated(&self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Returns a copy grown by `amount` on every side
    #[must_use]
    pub const fn inflated(&self, amount: i32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2,
            self.height + amount * 2,
        )
    }

    /// Returns a copy grown outwards by the given sides
    #[must_use]
    pub const fn expanded(&self, sides: Sides) -> Self {
        Self::new(
            self.x - sides.left,
            self.y - sides.top,
            self.width + sides.left + sides.right,
            self.height + sides.top + sides.bottom,
        )
    }

    /// Returns a copy shrunk inwards by the given sides
    #[must_use]
    pub const fn shrunk(&self, sides: Sides) -> Self {
        Self::new(
            self.x + sides.left,
            self.y + sides.top,
            self.width - sides.left - sides.right,
            self.height - sides.top - sides.bottom,
        )
    }

    /// Intersection of two rectangles.
    ///
    /// Disjoint rectangles produce an empty rectangle positioned at the
    /// clamped overlap corner, never a negative size.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let x = self.left().max(other.left());
        let y = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self::new(x, y, (right - x).max(0), (bottom - y).max(0))
    }

    /// Inclusive point test against the rect expanded by `margin`
    #[must_use]
    pub fn contains_with_margin(&self, point: Point, margin: Sides) -> bool {
        point.x >= self.x - margin.left
            && point.x <= self.x + self.width + margin.right
            && point.y >= self.y - margin.top
            && point.y <= self.y + self.height + margin.bottom
    }

    /// True if `other` lies completely inside this rectangle
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Per-side integer amounts (padding, extra size, outlines, interaction margins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Sides {
    /// Left side
    pub left: i32,
    /// Right side
    pub right: i32,
    /// Top side
    pub top: i32,
    /// Bottom side
    pub bottom: i32,
}

impl Sides {
    /// All sides zero
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create sides from left, right, top, bottom
    #[must_use]
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Same amount on every side
    #[must_use]
    pub const fn uniform(amount: i32) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    /// True if any side is positive
    #[must_use]
    pub const fn any_positive(&self) -> bool {
        self.left > 0 || self.right > 0 || self.top > 0 || self.bottom > 0
    }
}

/// RGBA colour, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    #[serde(default = "opaque")]
    pub a: u8,
}

const fn opaque() -> u8 {
    255
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Fully transparent
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create a colour from all four channels
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Returns a copy with alpha multiplied by `factor` (clamped to 0..=1)
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn scale_alpha(self, factor: f32) -> Self {
        let factor = utils::clamp(factor, 0.0, 1.0);
        Self {
            a: (f32::from(self.a) * factor) as u8,
            ..self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Math utility functions
pub mod utils {
    /// Clamp a value between min and max
    pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Linear interpolation between two values
    #[must_use]
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.origin(), Point::new(10, 20));
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 60, 100, 100);
        assert_eq!(a.intersection(&b), Rect::new(50, 60, 50, 40));

        let far = Rect::new(500, 500, 10, 10);
        let empty = a.intersection(&far);
        assert_eq!(empty.width, 0);
        assert_eq!(empty.height, 0);
    }

    #[test]
    fn test_contains_with_margin_is_inclusive() {
        let rect = Rect::new(10, 10, 10, 10);
        assert!(rect.contains_with_margin(Point::new(20, 20), Sides::ZERO));
        assert!(!rect.contains_with_margin(Point::new(21, 20), Sides::ZERO));
        assert!(rect.contains_with_margin(Point::new(25, 20), Sides::new(0, 5, 0, 0)));
        assert!(rect.contains_with_margin(Point::new(7, 10), Sides::new(3, 0, 0, 0)));
    }

    #[test]
    fn test_shrunk_and_expanded() {
        let rect = Rect::new(10, 10, 100, 50);
        let sides = Sides::new(1, 2, 3, 4);
        assert_eq!(rect.shrunk(sides), Rect::new(11, 13, 97, 43));
        assert_eq!(rect.expanded(sides), Rect::new(9, 7, 103, 57));
        assert_eq!(rect.inflated(2), Rect::new(8, 8, 104, 54));
    }

    #[test]
    fn test_color_scale_alpha() {
        let color = Color::rgba(10, 20, 30, 200);
        assert_eq!(color.scale_alpha(0.5).a, 100);
        assert_eq!(color.scale_alpha(2.0).a, 200);
        assert_eq!(color.scale_alpha(0.5).r, 10);
    }

    #[test]
    fn test_utils() {
        assert_eq!(utils::clamp(5, 0, 3), 3);
        assert_eq!(utils::clamp(-1, 0, 3), 0);
        assert!((utils::lerp(0.0, 10.0, 0.25) - 2.5).abs() < f32::EPSILON);
    }
}
