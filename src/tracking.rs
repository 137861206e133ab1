//! Per-vehicle records kept between ticks.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::loadable::Loadable;
use crate::world::{VehicleId, WorldAccess};
use crate::Coord;

/// What the pipeline remembers about one vehicle from the previous tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackedVehicle {
    /// The tracked vehicle.
    pub vehicle_id: VehicleId,
    /// Position at the last refresh.
    pub current_pos: Coord,
    /// Predicted position one tick after the last refresh.
    pub predicted_next_pos: Coord,
    /// Candidates that were above `current_pos` at the last refresh.
    pub candidates_at_current: BTreeSet<Loadable>,
    /// Candidates that were above `predicted_next_pos` at the last refresh.
    pub candidates_at_next: BTreeSet<Loadable>,
}

impl TrackedVehicle {
    /// A record with zeroed positions and no snapshot yet.
    #[must_use]
    pub fn new(vehicle_id: VehicleId) -> Self {
        Self {
            vehicle_id,
            ..Self::default()
        }
    }

    /// The snapshot that describes the tile above a vehicle now at `live`.
    ///
    /// A vehicle that has not moved since the last refresh uses the snapshot
    /// of its own tile; one that moved is assumed to have reached its
    /// predicted tile.
    #[must_use]
    pub fn snapshot_for(&self, live: Coord) -> &BTreeSet<Loadable> {
        if live == self.current_pos {
            &self.candidates_at_current
        } else {
            &self.candidates_at_next
        }
    }
}

/// Changes made by [`TrackingTable::reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileSummary {
    /// Entries dropped because their vehicle no longer exists.
    pub removed: usize,
    /// Entries created for newly seen vehicles.
    pub inserted: usize,
}

/// Records for every vehicle under tracking, keyed by vehicle id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackingTable {
    entries: BTreeMap<VehicleId, TrackedVehicle>,
}

impl TrackingTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Number of tracked vehicles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record for `id`, if tracked.
    #[must_use]
    pub fn get(&self, id: VehicleId) -> Option<&TrackedVehicle> {
        self.entries.get(&id)
    }

    /// Whether `id` is tracked.
    #[must_use]
    pub fn contains(&self, id: VehicleId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Inserts or replaces a record, returning the previous one.
    pub fn insert(&mut self, entry: TrackedVehicle) -> Option<TrackedVehicle> {
        self.entries.insert(entry.vehicle_id, entry)
    }

    /// Records in ascending vehicle id order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedVehicle> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TrackedVehicle> {
        self.entries.values_mut()
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Brings the table in line with the vehicles present in `world`.
    ///
    /// Records whose vehicle no longer resolves are dropped. Vehicles without
    /// a record get a fresh one with no snapshot, so nothing is loaded into
    /// them until they have been refreshed once.
    pub fn reconcile<W: WorldAccess + ?Sized>(&mut self, world: &W) -> ReconcileSummary {
        let before = self.entries.len();
        self.entries.retain(|&id, _| world.vehicle_exists(id));
        let removed = before - self.entries.len();

        let mut inserted = 0;
        for vehicle in world.list_vehicles() {
            self.entries.entry(vehicle.id).or_insert_with(|| {
                inserted += 1;
                TrackedVehicle::new(vehicle.id)
            });
        }

        debug!("reconciled tracking table: {removed} removed, {inserted} inserted");
        ReconcileSummary { removed, inserted }
    }
}
