//! Error types raised while loading vehicles.
//!
//! Refused transfers and stale snapshot entries are not errors; they are
//! counted in [`LoadSummary`](crate::pipeline::LoadSummary). The variants here
//! are host inconsistencies that abort the current tick.

use thiserror::Error;

use crate::pipeline::TickPhase;
use crate::world::{ItemId, ProjectileId, VehicleId};

/// A broken assumption about the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadingError {
    /// An item claims to be airborne but the projectile registry has no
    /// matching record.
    #[error("{item} links to {projectile}, which is not in the projectile registry")]
    MissingInFlightRecord {
        /// The airborne item.
        item: ItemId,
        /// The identifier its in-flight link carries.
        projectile: ProjectileId,
    },
    /// An item's in-flight link names a record that carries another item.
    #[error("{item} links to {projectile}, which carries {owner}")]
    ForeignInFlightRecord {
        /// The item being grounded.
        item: ItemId,
        /// The identifier its in-flight link carries.
        projectile: ProjectileId,
        /// The item the record actually belongs to.
        owner: ItemId,
    },
    /// A tracked vehicle stopped resolving after reconciliation.
    #[error("{0} vanished while the world was expected to be quiescent")]
    VehicleVanished(VehicleId),
    /// A vehicle's cargo item has no position in the world.
    #[error("cargo {item} of {vehicle} has no position")]
    CargoItemMissing {
        /// The vehicle being processed.
        vehicle: VehicleId,
        /// Its cargo item.
        item: ItemId,
    },
}

/// A [`LoadingError`] tagged with the pipeline phase that hit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{phase:?}: {source}")]
pub struct TickError {
    /// Where the failure occurred.
    pub phase: TickPhase,
    /// The underlying failure.
    pub source: LoadingError,
}

impl TickError {
    /// Convenience constructor used by the pipeline phases.
    #[must_use]
    pub const fn new(phase: TickPhase, source: LoadingError) -> Self {
        Self { phase, source }
    }
}
