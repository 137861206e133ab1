//! Utility helpers for tests.
pub mod fixtures;

use minecart_loading::{ItemId, Link, VehicleId, WorldAccess, WorldHandle};

/// Returns the cargo item of `vehicle`.
///
/// # Panics
/// Panics if the vehicle does not exist.
#[must_use]
pub fn cargo_of(world: &WorldHandle, vehicle: VehicleId) -> ItemId {
    world
        .resolve_vehicle(vehicle)
        .unwrap_or_else(|| panic!("{vehicle} not found in world"))
        .cargo_item
}

/// Whether `item` is directly inside the cargo of `vehicle`.
#[must_use]
pub fn is_loaded(world: &WorldHandle, vehicle: VehicleId, item: ItemId) -> bool {
    world
        .contained_items(cargo_of(world, vehicle))
        .contains(&item)
}

/// Number of times `link` appears on `item`.
#[must_use]
pub fn link_count(world: &WorldHandle, item: ItemId, link: Link) -> usize {
    world
        .links_of(item)
        .into_iter()
        .filter(|candidate| *candidate == link)
        .count()
}
