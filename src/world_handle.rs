//! In-memory world implementing [`WorldAccess`].
//!
//! Hosts without their own object model, and the test suite, drive the
//! loading pipeline through this handle. It keeps items, creatures and
//! vehicles in hash maps, tracks airborne items in a [`ProjectileRegistry`]
//! and keeps a ground index of resting items per tile. It does no physics:
//! callers move things with the setter methods between ticks.

use std::collections::BTreeSet;

use hashbrown::HashMap;
use log::debug;

use crate::error::LoadingError;
use crate::link::Link;
use crate::prediction::Motion;
use crate::world::{
    AgentId, ItemId, ProjectileId, RideFlags, Vehicle, VehicleId, WorldAccess,
};
use crate::Coord;

/// Mount type of a creature that is not riding anything.
pub const NO_MOUNT: i16 = -1;

/// Stored state of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    /// Tile of the item itself. Contained items report their container's
    /// tile instead.
    pub pos: Coord,
    /// Volume the item occupies.
    pub volume: i32,
    /// Volume the item can hold; 0 for non-containers.
    pub capacity: i32,
    /// Structural links in insertion order.
    pub links: Vec<Link>,
    /// Whether the item rests on the ground.
    pub on_ground: bool,
    /// Whether a creature rides the item.
    pub has_rider: bool,
    /// The item this one sits inside.
    pub container: Option<ItemId>,
}

impl ItemRecord {
    /// A plain item lying on the ground.
    #[must_use]
    pub const fn resting(pos: Coord, volume: i32) -> Self {
        Self {
            pos,
            volume,
            capacity: 0,
            links: Vec::new(),
            on_ground: true,
            has_rider: false,
            container: None,
        }
    }

    /// An empty container lying on the ground.
    #[must_use]
    pub const fn container(pos: Coord, capacity: i32) -> Self {
        Self {
            pos,
            volume: 0,
            capacity,
            links: Vec::new(),
            on_ground: true,
            has_rider: false,
            container: None,
        }
    }
}

/// Stored state of one creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentRecord {
    /// Tile the creature stands on.
    pub pos: Coord,
    /// Riding position; [`NO_MOUNT`] when not riding.
    pub mount_type: i16,
    /// Item the creature rides.
    pub riding_item: Option<ItemId>,
    /// Whether the creature is riding.
    pub rider: bool,
    /// Whether the creature is flagged to leave its vehicle.
    pub exit_vehicle: bool,
}

impl AgentRecord {
    /// A creature on foot.
    #[must_use]
    pub const fn standing(pos: Coord) -> Self {
        Self {
            pos,
            mount_type: NO_MOUNT,
            riding_item: None,
            rider: false,
            exit_vehicle: false,
        }
    }
}

/// Registry entry for an airborne item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlightRecord {
    /// Identifier the item's in-flight link carries.
    pub id: ProjectileId,
    /// The airborne item.
    pub item: ItemId,
}

/// Airborne items indexed by projectile id.
#[derive(Debug, Clone, Default)]
pub struct ProjectileRegistry {
    records: HashMap<ProjectileId, InFlightRecord>,
    next_id: i32,
}

impl ProjectileRegistry {
    /// Registers `item` as airborne and returns its new projectile id.
    pub fn register(&mut self, item: ItemId) -> ProjectileId {
        self.next_id += 1;
        let id = ProjectileId(self.next_id);
        self.records.insert(id, InFlightRecord { id, item });
        id
    }

    /// The record for `id`, if registered.
    #[must_use]
    pub fn get(&self, id: ProjectileId) -> Option<&InFlightRecord> {
        self.records.get(&id)
    }

    /// Removes and returns the record for `id`.
    pub fn release(&mut self, id: ProjectileId) -> Option<InFlightRecord> {
        self.records.remove(&id)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: ProjectileId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of airborne items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing is airborne.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// In-memory snapshot of the world used by hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct WorldHandle {
    items: HashMap<ItemId, ItemRecord>,
    agents: HashMap<AgentId, AgentRecord>,
    vehicles: HashMap<VehicleId, Vehicle>,
    projectiles: ProjectileRegistry,
    ground: HashMap<Coord, BTreeSet<ItemId>>,
    next_id: i32,
}

impl WorldHandle {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn ground_insert(&mut self, pos: Coord, item: ItemId) {
        self.ground.entry(pos).or_default().insert(item);
    }

    fn ground_remove(&mut self, pos: Coord, item: ItemId) {
        if let Some(tile) = self.ground.get_mut(&pos) {
            tile.remove(&item);
            if tile.is_empty() {
                self.ground.remove(&pos);
            }
        }
    }

    /// Adds an item and returns its id.
    pub fn spawn_item(&mut self, record: ItemRecord) -> ItemId {
        let id = ItemId(self.allocate_id());
        if record.on_ground && record.container.is_none() {
            self.ground_insert(record.pos, id);
        }
        self.items.insert(id, record);
        id
    }

    /// Adds a creature on foot and returns its id.
    pub fn spawn_agent(&mut self, pos: Coord) -> AgentId {
        let id = AgentId(self.allocate_id());
        self.agents.insert(id, AgentRecord::standing(pos));
        id
    }

    /// Adds a vehicle whose cargo item holds `capacity` and returns its id.
    pub fn spawn_vehicle(&mut self, pos: Coord, capacity: i32, motion: Motion) -> VehicleId {
        let cargo_item = self.spawn_item(ItemRecord::container(pos, capacity));
        let id = VehicleId(self.allocate_id());
        self.vehicles.insert(
            id,
            Vehicle {
                id,
                cargo_item,
                motion,
            },
        );
        id
    }

    /// Puts `item` into flight and returns the projectile carrying it.
    pub fn launch(&mut self, item: ItemId) -> ProjectileId {
        let projectile = self.projectiles.register(item);
        let grounded = self.items.get_mut(&item).and_then(|record| {
            record.links.push(Link::Projectile(projectile));
            let was_grounded = record.on_ground;
            record.on_ground = false;
            was_grounded.then_some(record.pos)
        });
        if let Some(pos) = grounded {
            self.ground_remove(pos, item);
        }
        projectile
    }

    /// Moves an item to `pos`.
    pub fn set_item_position(&mut self, item: ItemId, pos: Coord) {
        let Some(record) = self.items.get_mut(&item) else {
            return;
        };
        let previous = record.pos;
        record.pos = pos;
        if record.on_ground {
            self.ground_remove(previous, item);
            self.ground_insert(pos, item);
        }
    }

    /// Changes an item's volume.
    pub fn set_item_volume(&mut self, item: ItemId, volume: i32) {
        if let Some(record) = self.items.get_mut(&item) {
            record.volume = volume;
        }
    }

    /// Moves a creature to `pos`.
    pub fn set_agent_position(&mut self, agent: AgentId, pos: Coord) {
        if let Some(record) = self.agents.get_mut(&agent) {
            record.pos = pos;
        }
    }

    /// Moves a vehicle, and with it its cargo item, to `pos`.
    pub fn move_vehicle(&mut self, id: VehicleId, pos: Coord) {
        if let Some(cargo) = self.vehicles.get(&id).map(|vehicle| vehicle.cargo_item) {
            self.set_item_position(cargo, pos);
        }
    }

    /// Replaces a vehicle's motion state.
    pub fn set_vehicle_motion(&mut self, id: VehicleId, motion: Motion) {
        if let Some(vehicle) = self.vehicles.get_mut(&id) {
            vehicle.motion = motion;
        }
    }

    /// Deletes an item.
    ///
    /// An airborne item's in-flight record is released and its container
    /// forgets it. Items inside it spill onto the ground at its tile.
    pub fn remove_item(&mut self, item: ItemId) {
        let resolved = self.item_position(item);
        let Some(record) = self.items.remove(&item) else {
            return;
        };
        self.ground_remove(record.pos, item);
        for projectile in record.links.iter().filter_map(Link::in_flight) {
            self.projectiles.release(projectile);
        }
        if let Some(outer) = record.container.and_then(|id| self.items.get_mut(&id)) {
            outer.links.retain(|link| *link != Link::ContainsItem(item));
        }

        let pos = resolved.unwrap_or(record.pos);
        let spilled: Vec<ItemId> = self
            .items
            .iter()
            .filter(|(_, child)| child.container == Some(item))
            .map(|(&id, _)| id)
            .collect();
        if !spilled.is_empty() {
            debug!("removing {item} spills {} item(s) at {pos}", spilled.len());
        }
        for child in spilled {
            if let Some(state) = self.items.get_mut(&child) {
                state.container = None;
                state.pos = pos;
                state.on_ground = true;
                state
                    .links
                    .retain(|link| *link != Link::ContainedInItem(item));
            }
            self.ground_insert(pos, child);
        }
    }

    /// Deletes a creature.
    pub fn remove_agent(&mut self, agent: AgentId) {
        self.agents.remove(&agent);
    }

    /// Deletes a vehicle. Its cargo item stays behind as a plain item.
    pub fn remove_vehicle(&mut self, id: VehicleId) {
        self.vehicles.remove(&id);
    }

    /// Stored state of an item.
    #[must_use]
    pub fn item(&self, item: ItemId) -> Option<&ItemRecord> {
        self.items.get(&item)
    }

    /// Stored state of a creature.
    #[must_use]
    pub fn agent(&self, agent: AgentId) -> Option<&AgentRecord> {
        self.agents.get(&agent)
    }

    /// The airborne-item registry.
    #[must_use]
    pub const fn projectiles(&self) -> &ProjectileRegistry {
        &self.projectiles
    }

    /// Items the ground index lists at `pos`.
    #[must_use]
    pub fn grounded_at(&self, pos: Coord) -> BTreeSet<ItemId> {
        self.ground.get(&pos).cloned().unwrap_or_default()
    }

    /// Whether `ancestor` encloses `item`, directly or through nesting.
    fn encloses(&self, ancestor: ItemId, item: ItemId) -> bool {
        let mut current = self.items.get(&item).and_then(|record| record.container);
        for _ in 0..self.items.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.items.get(&id).and_then(|record| record.container),
                None => return false,
            }
        }
        false
    }

    fn refuses_insertion(&self, item: ItemId, container: ItemId) -> bool {
        let (Some(record), true) = (self.items.get(&item), self.items.contains_key(&container))
        else {
            return true;
        };
        item == container
            || self.encloses(item, container)
            || record
                .links
                .iter()
                .any(|link| link.in_flight().is_some() || link.is_shelvable())
    }
}

impl WorldAccess for WorldHandle {
    fn list_vehicles(&self) -> Vec<Vehicle> {
        let mut vehicles: Vec<Vehicle> = self.vehicles.values().copied().collect();
        vehicles.sort_by_key(|vehicle| vehicle.id);
        vehicles
    }

    fn resolve_vehicle(&self, id: VehicleId) -> Option<Vehicle> {
        self.vehicles.get(&id).copied()
    }

    fn item_position(&self, item: ItemId) -> Option<Coord> {
        let mut record = self.items.get(&item)?;
        for _ in 0..self.items.len() {
            match record.container.and_then(|id| self.items.get(&id)) {
                Some(outer) => record = outer,
                None => break,
            }
        }
        Some(record.pos)
    }

    fn agent_position(&self, agent: AgentId) -> Option<Coord> {
        self.agents.get(&agent).map(|record| record.pos)
    }

    fn items_at(&self, pos: Coord) -> BTreeSet<ItemId> {
        self.items
            .keys()
            .copied()
            .filter(|&id| self.item_position(id) == Some(pos))
            .collect()
    }

    fn agents_at(&self, pos: Coord) -> BTreeSet<AgentId> {
        self.agents
            .iter()
            .filter(|(_, record)| record.pos == pos)
            .map(|(&id, _)| id)
            .collect()
    }

    fn container_capacity(&self, item: ItemId) -> i32 {
        self.items.get(&item).map_or(0, |record| record.capacity)
    }

    fn contained_items(&self, item: ItemId) -> Vec<ItemId> {
        let mut inside: Vec<ItemId> = self
            .items
            .iter()
            .filter(|(_, record)| record.container == Some(item))
            .map(|(&id, _)| id)
            .collect();
        inside.sort_unstable();
        inside
    }

    fn volume_of(&self, item: ItemId) -> i32 {
        self.items.get(&item).map_or(0, |record| record.volume)
    }

    fn has_rider(&self, item: ItemId) -> bool {
        self.items.get(&item).is_some_and(|record| record.has_rider)
    }

    fn links_of(&self, item: ItemId) -> Vec<Link> {
        self.items
            .get(&item)
            .map(|record| record.links.clone())
            .unwrap_or_default()
    }

    fn remove_link(&mut self, item: ItemId, index: usize) -> Option<Link> {
        let links = &mut self.items.get_mut(&item)?.links;
        (index < links.len()).then(|| links.remove(index))
    }

    fn append_link(&mut self, item: ItemId, link: Link) {
        if let Some(record) = self.items.get_mut(&item) {
            record.links.push(link);
        }
    }

    fn detach_from_flight(
        &mut self,
        item: ItemId,
        projectile: ProjectileId,
    ) -> Result<(), LoadingError> {
        let owner = self
            .projectiles
            .get(projectile)
            .map(|record| record.item)
            .ok_or(LoadingError::MissingInFlightRecord { item, projectile })?;
        if owner != item {
            return Err(LoadingError::ForeignInFlightRecord {
                item,
                projectile,
                owner,
            });
        }
        self.projectiles.release(projectile);
        let landed = self.items.get_mut(&item).map(|state| {
            state.links.retain(|link| *link != Link::Projectile(projectile));
            state.on_ground = true;
            state.pos
        });
        if let Some(pos) = landed {
            self.ground_insert(pos, item);
            debug!("{item} grounded at {pos}");
        }
        Ok(())
    }

    fn move_into_container(&mut self, item: ItemId, container: ItemId) -> bool {
        if self.refuses_insertion(item, container) {
            return false;
        }
        let Some(target_pos) = self.item_position(container) else {
            return false;
        };
        let Some(record) = self.items.get_mut(&item) else {
            return false;
        };
        let previous_pos = record.pos;
        let previous_container = record.container.replace(container);
        let was_grounded = record.on_ground;
        record.on_ground = false;
        record.pos = target_pos;
        record
            .links
            .retain(|link| !matches!(link, Link::ContainedInItem(_)));
        record.links.push(Link::ContainedInItem(container));

        if was_grounded {
            self.ground_remove(previous_pos, item);
        }
        if let Some(old) = previous_container.and_then(|id| self.items.get_mut(&id)) {
            old.links.retain(|link| *link != Link::ContainsItem(item));
        }
        if let Some(target) = self.items.get_mut(&container) {
            target.links.push(Link::ContainsItem(item));
        }
        true
    }

    fn set_agent_riding(&mut self, agent: AgentId, cargo_item: ItemId, flags: RideFlags) {
        if let Some(record) = self.agents.get_mut(&agent) {
            record.mount_type = 0;
            record.riding_item = Some(cargo_item);
            record.rider = true;
            if flags.exit_vehicle {
                record.exit_vehicle = true;
            }
        }
    }

    fn set_item_rider(&mut self, cargo_item: ItemId, agent: AgentId) {
        if let Some(record) = self.items.get_mut(&cargo_item) {
            record.has_rider = true;
            record.links.push(Link::UnitRider(agent));
        }
    }
}
