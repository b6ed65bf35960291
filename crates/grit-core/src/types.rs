//! Integer positions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A 2D integer vector, used for world pixels, screen pixels and tiles
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean length
    pub fn length_squared(&self) -> i64 {
        let x = self.x as i64;
        let y = self.y as i64;
        x * x + y * y
    }

    /// Component-wise absolute value
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Convert a world position into the tile containing it.
    ///
    /// Uses floored division so negative coordinates land in negative tiles.
    pub fn to_tile(&self, tile_size: Vec2i) -> Self {
        Self::new(
            self.x.div_euclid(tile_size.x.max(1)),
            self.y.div_euclid(tile_size.y.max(1)),
        )
    }
}

impl Add for Vec2i {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2i {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<i32> for Vec2i {
    type Output = Self;
    fn mul(self, scalar: i32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl From<(i32, i32)> for Vec2i {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vec2i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2i_operations() {
        let a = Vec2i::new(1, 2);
        let b = Vec2i::new(4, -6);

        assert_eq!(a + b, Vec2i::new(5, -4));
        assert_eq!(b - a, Vec2i::new(3, -8));
        assert_eq!(a * 3, Vec2i::new(3, 6));
        assert_eq!(b.abs(), Vec2i::new(4, 6));
        assert_eq!(b.length_squared(), 52);
    }

    #[test]
    fn test_to_tile() {
        let tile = Vec2i::new(16, 12);
        assert_eq!(Vec2i::new(0, 0).to_tile(tile), Vec2i::new(0, 0));
        assert_eq!(Vec2i::new(15, 11).to_tile(tile), Vec2i::new(0, 0));
        assert_eq!(Vec2i::new(16, 12).to_tile(tile), Vec2i::new(1, 1));
        assert_eq!(Vec2i::new(-1, -1).to_tile(tile), Vec2i::new(-1, -1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vec2i::new(3, -4).to_string(), "(3, -4)");
    }
}
