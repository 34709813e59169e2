//! Pixel / percent-of-parent measurements

use serde::{Deserialize, Serialize};

use crate::foundation::math::Point;

/// Unit of a [`Measurement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum MeasureUnit {
    /// Absolute pixels
    #[default]
    Pixels,
    /// Percent of the parent extent (100 = full extent)
    PercentOfParent,
}

/// A scalar tagged with a unit, resolved lazily against a parent extent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement {
    /// Raw value, pixels or percents depending on `unit`
    pub value: f32,
    /// Unit of `value`
    #[serde(default)]
    pub unit: MeasureUnit,
}

impl Measurement {
    /// Pixel measurement
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pixels(value: i32) -> Self {
        Self {
            value: value as f32,
            unit: MeasureUnit::Pixels,
        }
    }

    /// Percent-of-parent measurement
    #[must_use]
    pub const fn percents(value: f32) -> Self {
        Self {
            value,
            unit: MeasureUnit::PercentOfParent,
        }
    }

    /// Set to pixels in place
    pub fn set_pixels(&mut self, value: i32) {
        *self = Self::pixels(value);
    }

    /// Set to percents in place
    pub fn set_percents(&mut self, value: f32) {
        *self = Self::percents(value);
    }

    /// True if this is a pixel measurement
    pub fn is_pixels(&self) -> bool {
        self.unit == MeasureUnit::Pixels
    }

    /// Resolve to pixels against the parent extent
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn value_in_pixels(&self, parent_extent: i32) -> i32 {
        match self.unit {
            MeasureUnit::Pixels => self.value as i32,
            MeasureUnit::PercentOfParent => (self.value / 100.0 * parent_extent as f32) as i32,
        }
    }
}

/// Width/height (or x/y offset) pair of measurements
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasureVector {
    /// Horizontal component
    pub x: Measurement,
    /// Vertical component
    pub y: Measurement,
}

impl MeasureVector {
    /// Both components in pixels
    #[must_use]
    pub fn pixels(x: i32, y: i32) -> Self {
        Self {
            x: Measurement::pixels(x),
            y: Measurement::pixels(y),
        }
    }

    /// Both components in percents
    #[must_use]
    pub const fn percents(x: f32, y: f32) -> Self {
        Self {
            x: Measurement::percents(x),
            y: Measurement::percents(y),
        }
    }

    /// Set both components to pixels
    pub fn set_pixels(&mut self, x: i32, y: i32) {
        *self = Self::pixels(x, y);
    }

    /// Set both components to percents
    pub fn set_percents(&mut self, x: f32, y: f32) {
        *self = Self::percents(x, y);
    }

    /// Resolve against a parent size
    pub fn to_pixels(&self, parent_size: Point) -> Point {
        Point::new(
            self.x.value_in_pixels(parent_size.x),
            self.y.value_in_pixels(parent_size.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_resolution() {
        let mut size = MeasureVector::default();
        size.set_percents(50.0, 50.0);
        assert_eq!(size.to_pixels(Point::new(200, 100)), Point::new(100, 50));
    }

    #[test]
    fn test_pixels_ignore_parent() {
        let mut size = MeasureVector::default();
        size.set_pixels(30, 40);
        assert_eq!(size.to_pixels(Point::new(200, 100)), Point::new(30, 40));
        assert_eq!(size.to_pixels(Point::new(1, 1)), Point::new(30, 40));
    }

    #[test]
    fn test_mixed_units() {
        let size = MeasureVector {
            x: Measurement::percents(25.0),
            y: Measurement::pixels(12),
        };
        assert_eq!(size.to_pixels(Point::new(400, 999)), Point::new(100, 12));
        assert!(!size.x.is_pixels());
        assert!(size.y.is_pixels());
    }
}
