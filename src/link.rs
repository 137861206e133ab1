//! Structural links attached to items.
//!
//! The host keeps a list of typed references on every item: the projectile
//! carrying it, the building holding it, the container it sits in, and so on.
//! Only a few kinds matter to cargo loading.

use crate::world::{AgentId, BuildingId, ItemId, ProjectileId};

/// A structural reference from an item to another world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    /// The item is airborne and owned by this in-flight record.
    Projectile(ProjectileId),
    /// A building holds the item as a component or stored object.
    BuildingHolder(BuildingId),
    /// The item is locked inside a cage building.
    BuildingCaged(BuildingId),
    /// The item is linked as a trigger to a building.
    BuildingTrigger(BuildingId),
    /// The item is the target of a building trigger.
    BuildingTriggerTarget(BuildingId),
    /// The item is assigned to a civic zone.
    BuildingCivzoneAssigned(BuildingId),
    /// The item sits inside another item.
    ContainedInItem(ItemId),
    /// Another item sits inside this one.
    ContainsItem(ItemId),
    /// A creature rides this item.
    UnitRider(AgentId),
    /// A creature carries this item.
    UnitHolder(AgentId),
}

impl Link {
    /// Returns the in-flight record this link points at, if it is one.
    #[must_use]
    pub const fn in_flight(&self) -> Option<ProjectileId> {
        match self {
            Self::Projectile(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether container insertion refuses items carrying this link.
    ///
    /// These links are removed for the duration of the move and put back
    /// afterwards.
    #[must_use]
    pub const fn is_shelvable(&self) -> bool {
        matches!(
            self,
            Self::BuildingHolder(_)
                | Self::BuildingCaged(_)
                | Self::BuildingTrigger(_)
                | Self::BuildingTriggerTarget(_)
                | Self::BuildingCivzoneAssigned(_)
        )
    }
}
