//! The per-tick loading pipeline.
//!
//! Each tick runs three phases in order:
//!
//! 1. [`TickPipeline::reconcile`] matches the tracking table to the vehicles
//!    in the world.
//! 2. [`TickPipeline::perform_loading`] checks last tick's snapshots against
//!    live positions and loads whatever has landed.
//! 3. [`TickPipeline::refresh`] records positions, predicts the next tile and
//!    takes new snapshots above both.
//!
//! Snapshots are fixed when taken and verified a tick later, so the result
//! does not depend on whether the host moves vehicles or objects first.

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::error::{LoadingError, TickError};
use crate::loadable::{loadables_at, Loadable};
use crate::prediction::predict_next_pos;
use crate::tracking::{ReconcileSummary, TrackingTable};
use crate::transfer::TransferOutcome;
use crate::world::{RideFlags, Vehicle, VehicleId, WorldAccess};
use crate::Coord;

/// Pipeline phase, used to tag errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickPhase {
    /// Matching the table to the world.
    Reconcile,
    /// Loading landed candidates.
    Load,
    /// Recording positions and snapshots.
    Refresh,
}

/// Counters from [`TickPipeline::perform_loading`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Candidates found on their vehicle's tile.
    pub arrived: usize,
    /// Candidates moved into a vehicle, in processing order.
    pub loaded: Vec<(VehicleId, Loadable)>,
    /// Arrived candidates that did not fit.
    pub rejected: usize,
    /// Candidates the host refused to move.
    pub refused: usize,
    /// Snapshot entries that no longer exist in the world.
    pub stale: usize,
}

/// Everything one tick did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Phase 1 result.
    pub reconcile: ReconcileSummary,
    /// Phase 2 result.
    pub load: LoadSummary,
}

/// Owns the tracking table and runs the tick phases against a world.
#[derive(Debug, Clone, Default)]
pub struct TickPipeline {
    table: TrackingTable,
    ride_flags: RideFlags,
}

fn live_vehicle<W: WorldAccess + ?Sized>(
    world: &W,
    id: VehicleId,
) -> Result<(Vehicle, Coord), LoadingError> {
    let vehicle = world
        .resolve_vehicle(id)
        .ok_or(LoadingError::VehicleVanished(id))?;
    let pos = world
        .item_position(vehicle.cargo_item)
        .ok_or(LoadingError::CargoItemMissing {
            vehicle: id,
            item: vehicle.cargo_item,
        })?;
    Ok((vehicle, pos))
}

impl TickPipeline {
    /// Creates a pipeline with an empty table.
    #[must_use]
    pub const fn new(ride_flags: RideFlags) -> Self {
        Self {
            table: TrackingTable::new(),
            ride_flags,
        }
    }

    /// The tracking table.
    #[must_use]
    pub const fn table(&self) -> &TrackingTable {
        &self.table
    }

    /// Mutable access to the tracking table, for hosts restoring state and
    /// for tests.
    pub fn table_mut(&mut self) -> &mut TrackingTable {
        &mut self.table
    }

    /// Flags applied to creatures mounted by this pipeline.
    #[must_use]
    pub const fn ride_flags(&self) -> RideFlags {
        self.ride_flags
    }

    /// Forgets every tracked vehicle.
    pub fn reset(&mut self) {
        self.table.clear();
    }

    /// Phase 1: see [`TrackingTable::reconcile`].
    pub fn reconcile<W: WorldAccess + ?Sized>(&mut self, world: &W) -> ReconcileSummary {
        self.table.reconcile(world)
    }

    /// Phase 2: loads candidates that have landed on their vehicle.
    ///
    /// # Errors
    /// Fails when a tracked vehicle cannot be resolved or an item transfer
    /// finds the world inconsistent.
    pub fn perform_loading<W: WorldAccess + ?Sized>(
        &mut self,
        world: &mut W,
    ) -> Result<LoadSummary, TickError> {
        let mut summary = LoadSummary::default();
        let mut claimed = BTreeSet::new();
        for entry in self.table.iter() {
            let (vehicle, live) = live_vehicle(world, entry.vehicle_id)
                .map_err(|e| TickError::new(TickPhase::Load, e))?;
            let snapshot = entry.snapshot_for(live);
            if !snapshot.is_empty() {
                trace!("{} at {live} checks {snapshot:?}", vehicle.id);
            }
            for &candidate in snapshot {
                // Vehicles sharing a tile see the same candidates.
                if claimed.contains(&candidate) {
                    trace!(
                        "{candidate:?} already loaded this tick; skipped by {}",
                        vehicle.id
                    );
                    continue;
                }
                match candidate.position(world) {
                    None => summary.stale += 1,
                    Some(pos) if pos == live => {
                        summary.arrived += 1;
                        let loaded = self
                            .try_load(world, &vehicle, candidate, &mut summary)
                            .map_err(|e| TickError::new(TickPhase::Load, e))?;
                        if loaded {
                            claimed.insert(candidate);
                        }
                    }
                    Some(_) => {}
                }
            }
        }
        debug!(
            "loading phase: {} arrived, {} loaded, {} rejected, {} refused, {} stale",
            summary.arrived,
            summary.loaded.len(),
            summary.rejected,
            summary.refused,
            summary.stale
        );
        Ok(summary)
    }

    /// Returns whether `candidate` ended up in `vehicle`.
    fn try_load<W: WorldAccess + ?Sized>(
        &self,
        world: &mut W,
        vehicle: &Vehicle,
        candidate: Loadable,
        summary: &mut LoadSummary,
    ) -> Result<bool, LoadingError> {
        if !candidate.can_fit(world, vehicle) {
            debug!("{candidate:?} landed on {} but does not fit", vehicle.id);
            summary.rejected += 1;
            return Ok(false);
        }
        match candidate.load(world, vehicle, self.ride_flags)? {
            TransferOutcome::Loaded => {
                summary.loaded.push((vehicle.id, candidate));
                Ok(true)
            }
            TransferOutcome::Refused => {
                summary.refused += 1;
                Ok(false)
            }
        }
    }

    /// Phase 3: records live positions and takes fresh snapshots.
    ///
    /// # Errors
    /// Fails when a tracked vehicle cannot be resolved.
    pub fn refresh<W: WorldAccess + ?Sized>(&mut self, world: &W) -> Result<(), TickError> {
        for entry in self.table.iter_mut() {
            let (vehicle, live) = live_vehicle(world, entry.vehicle_id)
                .map_err(|e| TickError::new(TickPhase::Refresh, e))?;
            entry.current_pos = live;
            entry.predicted_next_pos = predict_next_pos(live, &vehicle.motion);
            entry.candidates_at_current = snapshot_above(world, entry.current_pos);
            entry.candidates_at_next = snapshot_above(world, entry.predicted_next_pos);
            trace!(
                "{} refreshed at {} -> {}: {:?} / {:?}",
                vehicle.id,
                entry.current_pos,
                entry.predicted_next_pos,
                entry.candidates_at_current,
                entry.candidates_at_next
            );
        }
        Ok(())
    }

    /// Runs all three phases.
    ///
    /// # Errors
    /// Propagates the first phase failure; later phases do not run.
    pub fn run_tick<W: WorldAccess + ?Sized>(
        &mut self,
        world: &mut W,
    ) -> Result<TickReport, TickError> {
        let reconcile = self.reconcile(world);
        let load = self.perform_loading(world)?;
        self.refresh(world)?;
        Ok(TickReport { reconcile, load })
    }
}

fn snapshot_above<W: WorldAccess + ?Sized>(world: &W, pos: Coord) -> BTreeSet<Loadable> {
    loadables_at(world, pos.above())
}
