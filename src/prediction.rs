//! One-tick lookahead for vehicle positions.
//!
//! The host moves a vehicle by adding its velocity to a fixed-point sub-tile
//! offset and snapping the result to the nearest tile. Repeating that rule
//! here tells the pipeline which tile a vehicle will occupy next tick.

use serde::{Deserialize, Serialize};

use crate::numeric::{floor_div, saturate_i32};
use crate::{Coord, FIXED_POINT_PER_TILE, HALF_TILE};

/// Fixed-point vector, [`FIXED_POINT_PER_TILE`] units per tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
    /// Z component.
    pub z: i32,
}

impl FixedVec {
    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Motion state of a vehicle as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Motion {
    /// Sub-tile offset from the centre of the current tile.
    pub offset: FixedVec,
    /// Displacement applied per tick.
    pub velocity: FixedVec,
}

impl Motion {
    /// A vehicle at rest in the centre of its tile.
    pub const STILL: Self = Self {
        offset: FixedVec::new(0, 0, 0),
        velocity: FixedVec::new(0, 0, 0),
    };

    /// Creates a motion state from an offset and a velocity.
    #[must_use]
    pub const fn new(offset: FixedVec, velocity: FixedVec) -> Self {
        Self { offset, velocity }
    }
}

/// Tile delta along one axis after a tick.
///
/// # Examples
///
/// ```
/// use minecart_loading::prediction::axis_delta;
/// assert_eq!(axis_delta(0, 49_999), 0);
/// assert_eq!(axis_delta(0, 50_000), 1);
/// assert_eq!(axis_delta(-60_000, 0), -1);
/// ```
#[must_use]
pub fn axis_delta(offset: i32, velocity: i32) -> i32 {
    let projected = i64::from(offset) + i64::from(velocity) + HALF_TILE;
    saturate_i32(floor_div(projected, FIXED_POINT_PER_TILE))
}

/// Predicts the tile a vehicle at `current` will occupy after one tick.
#[must_use]
pub fn predict_next_pos(current: Coord, motion: &Motion) -> Coord {
    let Motion { offset, velocity } = motion;
    current
        + Coord::new(
            axis_delta(offset.x, velocity.x),
            axis_delta(offset.y, velocity.y),
            axis_delta(offset.z, velocity.z),
        )
}
