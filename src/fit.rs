//! Capacity and occupancy rules for loading a vehicle.

use crate::world::{ItemId, Vehicle, WorldAccess};

/// Volume the vehicle's cargo item can hold.
#[must_use]
pub fn cargo_capacity<W: WorldAccess + ?Sized>(world: &W, vehicle: &Vehicle) -> i64 {
    i64::from(world.container_capacity(vehicle.cargo_item)).max(0)
}

/// Total volume of everything already inside the vehicle's cargo item.
#[must_use]
pub fn loaded_volume<W: WorldAccess + ?Sized>(world: &W, vehicle: &Vehicle) -> i64 {
    world
        .contained_items(vehicle.cargo_item)
        .into_iter()
        .map(|item| i64::from(world.volume_of(item)))
        .sum()
}

/// Whether `item` fits next to the current load without exceeding capacity.
///
/// Only the candidate itself is considered; nothing is rearranged to make
/// room.
#[must_use]
pub fn item_fits<W: WorldAccess + ?Sized>(world: &W, vehicle: &Vehicle, item: ItemId) -> bool {
    let capacity = cargo_capacity(world, vehicle);
    let loaded = loaded_volume(world, vehicle);
    let candidate = i64::from(world.volume_of(item));
    log::trace!(
        "fit check for {item} in {}: capacity {capacity}, loaded {loaded}, candidate {candidate}",
        vehicle.id
    );
    loaded + candidate <= capacity
}

/// Whether the vehicle has room for a rider. A vehicle carries one at most.
#[must_use]
pub fn agent_fits<W: WorldAccess + ?Sized>(world: &W, vehicle: &Vehicle) -> bool {
    !world.has_rider(vehicle.cargo_item)
}
