//! Loads items and creatures that fall onto minecarts into the cart.
//!
//! Every tick the [`TickPipeline`] reconciles its per-vehicle records with the
//! world, loads whatever landed on a vehicle since the previous tick, and
//! snapshots what is above each vehicle's current and predicted tile for the
//! next tick to verify. Hosts expose their world through [`WorldAccess`] and
//! drive the pipeline through [`FallLoadingPlugin`].
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod fit;
pub mod link;
pub mod loadable;
pub mod logging;
mod macros;
pub mod numeric;
pub mod pipeline;
pub mod plugin;
pub mod prediction;
pub mod tracking;
pub mod transfer;
pub mod world;
pub mod world_handle;
pub use constants::*;

// Re-export commonly used items
pub use config::LoaderConfig;
pub use coord::Coord;
pub use error::{LoadingError, TickError};
pub use link::Link;
pub use loadable::Loadable;
pub use logging::init as init_logging;
pub use pipeline::{LoadSummary, TickPhase, TickPipeline, TickReport};
pub use plugin::{FallLoadingPlugin, WorldEvent};
pub use prediction::{predict_next_pos, FixedVec, Motion};
pub use tracking::{TrackedVehicle, TrackingTable};
pub use transfer::TransferOutcome;
pub use world::{
    AgentId, BuildingId, ItemId, ProjectileId, RideFlags, Vehicle, VehicleId, WorldAccess,
};
pub use world_handle::WorldHandle;

pub mod prelude {
    //! Prelude exports for hosts wiring the plugin.
    //!
    //! ```rust,no_run
    //! use minecart_loading::prelude::*;
    //! ```

    pub use crate::Coord;
    pub use crate::FallLoadingPlugin;
    pub use crate::LoaderConfig;
    pub use crate::Loadable;
    pub use crate::WorldAccess;
    pub use crate::WorldEvent;
}
