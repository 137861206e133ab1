//! Lattice coordinates on the host map.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::ABOVE_Z_OFFSET;

/// Integer tile coordinate in the world map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Z-level; larger values are higher.
    pub z: i32,
}

impl Coord {
    /// Creates a coordinate from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The tile objects fall onto this one from.
    ///
    /// # Examples
    ///
    /// ```
    /// use minecart_loading::Coord;
    /// assert_eq!(Coord::new(3, 4, 5).above(), Coord::new(3, 4, 6));
    /// ```
    #[must_use]
    pub const fn above(self) -> Self {
        Self {
            z: self.z.saturating_add(ABOVE_Z_OFFSET),
            ..self
        }
    }
}

impl Add for Coord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
            z: self.z.saturating_add(other.z),
        }
    }
}

impl From<(i32, i32, i32)> for Coord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
