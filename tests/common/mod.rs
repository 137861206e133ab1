//! Shared assertions for pipeline integration tests.

use anyhow::{ensure, Context, Result};
use minecart_loading::{ItemId, Loadable, TickPipeline, TrackedVehicle, VehicleId, WorldHandle};
use test_utils::is_loaded;

/// Assertion helpers for common loading checks.
pub struct LoadingAssertions;

impl LoadingAssertions {
    /// Fetch the tracking record for a vehicle.
    pub fn entry(pipeline: &TickPipeline, vehicle: VehicleId) -> Result<&TrackedVehicle> {
        pipeline
            .table()
            .get(vehicle)
            .with_context(|| format!("{vehicle} is not tracked"))
    }

    /// Assert whether `item` sits in the vehicle's cargo.
    pub fn assert_loaded(
        world: &WorldHandle,
        vehicle: VehicleId,
        item: ItemId,
        expected: bool,
    ) -> Result<()> {
        let actual = is_loaded(world, vehicle, item);
        ensure!(
            actual == expected,
            "expected {item} loaded into {vehicle} = {expected}, got {actual}"
        );
        Ok(())
    }

    /// Assert that the vehicle's next-tile snapshot contains `candidate`.
    pub fn assert_in_next_snapshot(
        pipeline: &TickPipeline,
        vehicle: VehicleId,
        candidate: Loadable,
    ) -> Result<()> {
        let entry = Self::entry(pipeline, vehicle)?;
        ensure!(
            entry.candidates_at_next.contains(&candidate),
            "{candidate:?} missing from next snapshot {:?}",
            entry.candidates_at_next
        );
        Ok(())
    }
}
