//! Objects that can fall into a vehicle.
//!
//! A [`Loadable`] is a handle naming an item or a creature by identifier.
//! Handles compare by identity alone, so a handle taken a tick ago still
//! matches the live object even if everything else about it changed.

use std::collections::BTreeSet;

use crate::error::LoadingError;
use crate::fit::{agent_fits, item_fits};
use crate::transfer::{load_item, mount_agent, TransferOutcome};
use crate::world::{AgentId, ItemId, RideFlags, Vehicle, WorldAccess};
use crate::Coord;

/// Candidate for loading into a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Loadable {
    /// An item, loaded as cargo.
    Item(ItemId),
    /// A creature, mounted as the rider.
    Agent(AgentId),
}

impl Loadable {
    /// Live position of the wrapped object, or `None` if it no longer exists.
    #[must_use]
    pub fn position<W: WorldAccess + ?Sized>(&self, world: &W) -> Option<Coord> {
        match *self {
            Self::Item(item) => world.item_position(item),
            Self::Agent(agent) => world.agent_position(agent),
        }
    }

    /// Whether the object can go into `vehicle` right now.
    #[must_use]
    pub fn can_fit<W: WorldAccess + ?Sized>(&self, world: &W, vehicle: &Vehicle) -> bool {
        match *self {
            Self::Item(item) => item_fits(world, vehicle, item),
            Self::Agent(_) => agent_fits(world, vehicle),
        }
    }

    /// Transfers the object into `vehicle`.
    ///
    /// # Errors
    /// Propagates host inconsistencies from the item transfer.
    pub fn load<W: WorldAccess + ?Sized>(
        &self,
        world: &mut W,
        vehicle: &Vehicle,
        flags: RideFlags,
    ) -> Result<TransferOutcome, LoadingError> {
        match *self {
            Self::Item(item) => load_item(world, item, vehicle.cargo_item),
            Self::Agent(agent) => Ok(mount_agent(world, agent, vehicle.cargo_item, flags)),
        }
    }
}

impl From<ItemId> for Loadable {
    fn from(item: ItemId) -> Self {
        Self::Item(item)
    }
}

impl From<AgentId> for Loadable {
    fn from(agent: AgentId) -> Self {
        Self::Agent(agent)
    }
}

/// Every item and creature at `pos`, wrapped as fresh handles.
#[must_use]
pub fn loadables_at<W: WorldAccess + ?Sized>(world: &W, pos: Coord) -> BTreeSet<Loadable> {
    world
        .items_at(pos)
        .into_iter()
        .map(Loadable::Item)
        .chain(world.agents_at(pos).into_iter().map(Loadable::Agent))
        .collect()
}
