//! Screen coordinates and relative motion.

use std::fmt;
use std::ops::Neg;

use serde::{Deserialize, Serialize};

/// An absolute cursor position in screen pixels.
///
/// Only backends with absolute readback can report one; callers receive
/// `Option<Position>` and must treat `None` as "not supported here".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Apply a relative displacement, saturating at the `i32` range.
    #[must_use]
    pub fn offset(self, delta: Displacement) -> Self {
        Self {
            x: self.x.saturating_add(delta.dx),
            y: self.y.saturating_add(delta.dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A relative motion delta in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: i32,
    pub dy: i32,
}

impl Displacement {
    #[must_use]
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Convert a fractional delta into whole pixels.
    ///
    /// Each axis is rounded half away from zero and saturates at the `i32`
    /// range; NaN becomes zero.
    #[must_use]
    pub fn rounded(dx: f64, dy: f64) -> Self {
        Self {
            dx: round_axis(dx),
            dy: round_axis(dy),
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl Neg for Displacement {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            dx: self.dx.saturating_neg(),
            dy: self.dy.saturating_neg(),
        }
    }
}

impl fmt::Display for Displacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.dx, self.dy)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_axis(value: f64) -> i32 {
    // `as` saturates for out-of-range floats and maps NaN to 0.
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(Displacement::rounded(0.5, -0.5), Displacement::new(1, -1));
        assert_eq!(Displacement::rounded(1.49, -1.49), Displacement::new(1, -1));
        assert_eq!(Displacement::rounded(2.5, -2.5), Displacement::new(3, -3));
    }

    #[test]
    fn rounding_saturates_and_drops_nan() {
        assert_eq!(
            Displacement::rounded(1e12, -1e12),
            Displacement::new(i32::MAX, i32::MIN)
        );
        assert_eq!(Displacement::rounded(f64::NAN, 0.0), Displacement::new(0, 0));
    }

    #[test]
    fn offset_and_negation_cancel() {
        let start = Position::new(640, 480);
        let delta = Displacement::new(-37, 12);
        assert_eq!(start.offset(delta).offset(-delta), start);
    }

    #[test]
    fn offset_saturates() {
        let edge = Position::new(i32::MAX - 1, i32::MIN + 1);
        assert_eq!(
            edge.offset(Displacement::new(10, -10)),
            Position::new(i32::MAX, i32::MIN)
        );
    }

    #[test]
    fn display_formats() {
        assert_eq!(Position::new(3, -4).to_string(), "(3, -4)");
        assert_eq!(Displacement::new(3, -4).to_string(), "(+3, -4)");
    }
}
