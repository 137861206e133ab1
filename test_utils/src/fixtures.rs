//! Builders for worlds with carts and falling objects.

use minecart_loading::world_handle::ItemRecord;
use minecart_loading::{
    AgentId, Coord, FixedVec, ItemId, Motion, ProjectileId, VehicleId, WorldHandle,
};

/// Builder for [`WorldHandle`] instances used in loading scenarios.
#[derive(Debug, Default)]
pub struct CartWorldBuilder {
    world: WorldHandle,
}

impl CartWorldBuilder {
    /// Start from an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cart at rest.
    #[must_use]
    pub fn cart(self, pos: impl Into<Coord>, capacity: i32) -> (Self, VehicleId) {
        self.moving_cart(pos, capacity, Motion::STILL)
    }

    /// Add a cart with the given motion.
    #[must_use]
    pub fn moving_cart(
        mut self,
        pos: impl Into<Coord>,
        capacity: i32,
        motion: Motion,
    ) -> (Self, VehicleId) {
        let id = self.world.spawn_vehicle(pos.into(), capacity, motion);
        (self, id)
    }

    /// Add an item resting on the ground.
    #[must_use]
    pub fn item(mut self, pos: impl Into<Coord>, volume: i32) -> (Self, ItemId) {
        let id = self.world.spawn_item(ItemRecord::resting(pos.into(), volume));
        (self, id)
    }

    /// Add an airborne item.
    #[must_use]
    pub fn falling_item(
        mut self,
        pos: impl Into<Coord>,
        volume: i32,
    ) -> (Self, ItemId, ProjectileId) {
        let id = self.world.spawn_item(ItemRecord::resting(pos.into(), volume));
        let projectile = self.world.launch(id);
        (self, id, projectile)
    }

    /// Add a creature.
    #[must_use]
    pub fn agent(mut self, pos: impl Into<Coord>) -> (Self, AgentId) {
        let id = self.world.spawn_agent(pos.into());
        (self, id)
    }

    /// Return the configured world.
    #[must_use]
    pub fn build(self) -> WorldHandle {
        self.world
    }
}

/// Motion that carries a cart one z-level up per tick, as on an incline.
#[must_use]
pub const fn climbing() -> Motion {
    Motion::new(FixedVec::new(0, 0, 0), FixedVec::new(0, 0, 100_000))
}

/// Motion that carries a cart one tile along +x per tick.
#[must_use]
pub const fn rolling_east() -> Motion {
    Motion::new(FixedVec::new(0, 0, 0), FixedVec::new(100_000, 0, 0))
}
