//! Fixed values shared by the tracking pipeline.
//!
//! Vehicle motion is reported by the host in fixed-point units where one tile
//! spans [`FIXED_POINT_PER_TILE`] units along each axis.

/// Fixed-point units per tile for vehicle offsets and velocities.
pub const FIXED_POINT_PER_TILE: i64 = 100_000;
/// Bias added before flooring so a projected sub-tile position snaps to the
/// nearest tile, matching the host's own snapping rule for vehicles.
pub const HALF_TILE: i64 = FIXED_POINT_PER_TILE / 2;
/// Vertical distance from a vehicle's tile to the tile objects fall from.
pub const ABOVE_Z_OFFSET: i32 = 1;
/// Host updates between pipeline runs unless configured otherwise.
pub const DEFAULT_UPDATE_INTERVAL: u32 = 1;
