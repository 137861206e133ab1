//! The boundary between the loading pipeline and the host simulation.
//!
//! The pipeline never owns world objects. It sees them through
//! [`WorldAccess`], which a host implements over its own storage, and through
//! the small identifier and handle types defined here.

use std::collections::BTreeSet;

use crate::error::LoadingError;
use crate::link::Link;
use crate::prediction::Motion;
use crate::{world_id, Coord};

world_id! {
    /// Identifier of a rail vehicle.
    pub struct VehicleId;
}

world_id! {
    /// Identifier of an item, including a vehicle's cargo item.
    pub struct ItemId;
}

world_id! {
    /// Identifier of a creature.
    pub struct AgentId;
}

world_id! {
    /// Identifier of an in-flight record in the projectile registry.
    pub struct ProjectileId;
}

world_id! {
    /// Identifier of a building.
    pub struct BuildingId;
}

/// Snapshot of a vehicle as resolved from the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vehicle {
    /// The vehicle's identifier.
    pub id: VehicleId,
    /// The item that carries cargo and riders; its position is the
    /// vehicle's position.
    pub cargo_item: ItemId,
    /// Sub-tile offset and velocity.
    pub motion: Motion,
}

/// Flags applied to a creature when it starts riding a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RideFlags {
    /// Also raise the creature's exit-vehicle flag.
    pub exit_vehicle: bool,
}

/// Host operations the loading pipeline depends on.
///
/// Queries take `&self`; mutations take `&mut self`. The pipeline holds the
/// world exclusively for a whole tick, so implementations may assume nothing
/// else changes between calls.
pub trait WorldAccess {
    /// Every vehicle currently in the world.
    fn list_vehicles(&self) -> Vec<Vehicle>;

    /// Looks up a vehicle by identifier.
    fn resolve_vehicle(&self, id: VehicleId) -> Option<Vehicle>;

    /// Whether a vehicle with this identifier still exists.
    fn vehicle_exists(&self, id: VehicleId) -> bool {
        self.resolve_vehicle(id).is_some()
    }

    /// Tile an item occupies; items inside containers report the
    /// container's tile. `None` when the item no longer exists.
    fn item_position(&self, item: ItemId) -> Option<Coord>;

    /// Tile a creature occupies, or `None` when it no longer exists.
    fn agent_position(&self, agent: AgentId) -> Option<Coord>;

    /// Items located at `pos`.
    fn items_at(&self, pos: Coord) -> BTreeSet<ItemId>;

    /// Creatures located at `pos`.
    fn agents_at(&self, pos: Coord) -> BTreeSet<AgentId>;

    /// Container capacity declared by the item's type; 0 when the item
    /// cannot hold anything.
    fn container_capacity(&self, item: ItemId) -> i32;

    /// Items directly inside `item`.
    fn contained_items(&self, item: ItemId) -> Vec<ItemId>;

    /// Volume of a single item.
    fn volume_of(&self, item: ItemId) -> i32;

    /// Whether a creature rides `item`.
    fn has_rider(&self, item: ItemId) -> bool;

    /// The item's links in host order.
    fn links_of(&self, item: ItemId) -> Vec<Link>;

    /// Removes and returns the link at `index` without destroying it.
    fn remove_link(&mut self, item: ItemId, index: usize) -> Option<Link>;

    /// Appends a link to the item's list.
    fn append_link(&mut self, item: ItemId, link: Link);

    /// Ends the item's flight.
    ///
    /// Releases the projectile record, removes the item's in-flight link,
    /// marks the item as resting on the ground and registers it with the
    /// host's ground index.
    ///
    /// # Errors
    /// Returns [`LoadingError::MissingInFlightRecord`] when the registry has
    /// no record for `projectile`, and
    /// [`LoadingError::ForeignInFlightRecord`] when the record carries another
    /// item. Neither case changes the world.
    fn detach_from_flight(
        &mut self,
        item: ItemId,
        projectile: ProjectileId,
    ) -> Result<(), LoadingError>;

    /// Moves `item` into `container`. Returns `false` when the host refuses.
    fn move_into_container(&mut self, item: ItemId, container: ItemId) -> bool;

    /// Mounts a creature on a cargo item: clears its mount type, records
    /// `cargo_item` as what it rides and sets its rider flag.
    fn set_agent_riding(&mut self, agent: AgentId, cargo_item: ItemId, flags: RideFlags);

    /// Records `agent` as the rider of `cargo_item`.
    fn set_item_rider(&mut self, cargo_item: ItemId, agent: AgentId);
}
