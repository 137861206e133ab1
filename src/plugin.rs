//! Host-facing lifecycle wrapper around the tick pipeline.
//!
//! The pipeline only makes sense while a world is loaded. The host forwards
//! its load and unload events to [`FallLoadingPlugin::on_world_event`] and
//! calls [`FallLoadingPlugin::on_update`] once per simulation step.

use log::{info, warn};

use crate::config::LoaderConfig;
use crate::error::TickError;
use crate::pipeline::{TickPipeline, TickReport};
use crate::world::WorldAccess;

/// Host lifecycle notifications the plugin reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    /// A world finished loading.
    Loaded,
    /// The world was unloaded.
    Unloaded,
}

/// Runs the loading pipeline while a world is loaded.
#[derive(Debug, Clone)]
pub struct FallLoadingPlugin {
    config: LoaderConfig,
    pipeline: TickPipeline,
    active: bool,
    updates_until_run: u32,
}

impl Default for FallLoadingPlugin {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl FallLoadingPlugin {
    /// Creates an inactive plugin.
    #[must_use]
    pub const fn new(config: LoaderConfig) -> Self {
        Self {
            pipeline: TickPipeline::new(config.ride_flags()),
            config,
            active: false,
            updates_until_run: 0,
        }
    }

    /// The settings in use.
    #[must_use]
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// The pipeline and its tracking table.
    #[must_use]
    pub const fn pipeline(&self) -> &TickPipeline {
        &self.pipeline
    }

    /// Whether a world is loaded.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Reacts to the host loading or unloading a world.
    ///
    /// Unloading drops every tracked vehicle; their ids refer to the world
    /// that went away.
    pub fn on_world_event(&mut self, event: WorldEvent) {
        match event {
            WorldEvent::Loaded => {
                info!("world loaded; minecart fall loading active");
                self.active = true;
                self.updates_until_run = 0;
            }
            WorldEvent::Unloaded => {
                info!("world unloaded; minecart fall loading suspended");
                self.active = false;
                self.pipeline.reset();
            }
        }
    }

    /// Called once per host update.
    ///
    /// Returns `Ok(None)` while inactive or between runs. While active the
    /// pipeline runs on the first update and then every
    /// [`LoaderConfig::update_interval`] updates.
    ///
    /// # Errors
    /// Propagates a [`TickError`] from the pipeline. The tick is abandoned;
    /// the host decides whether to continue.
    pub fn on_update<W: WorldAccess + ?Sized>(
        &mut self,
        world: &mut W,
    ) -> Result<Option<TickReport>, TickError> {
        if !self.active {
            return Ok(None);
        }
        if self.updates_until_run > 0 {
            self.updates_until_run -= 1;
            return Ok(None);
        }
        self.updates_until_run = self.config.update_interval.get() - 1;
        self.pipeline
            .run_tick(world)
            .map(Some)
            .inspect_err(|e| warn!("minecart fall loading tick failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::Motion;
    use crate::world_handle::WorldHandle;
    use crate::Coord;
    use rstest::rstest;

    #[rstest]
    fn inactive_plugin_does_nothing() {
        let mut world = WorldHandle::default();
        world.spawn_vehicle(Coord::new(0, 0, 0), 10, Motion::STILL);
        let mut plugin = FallLoadingPlugin::default();

        let report = plugin.on_update(&mut world).expect("update should succeed");

        assert!(report.is_none());
        assert!(plugin.pipeline().table().is_empty());
    }

    #[rstest]
    fn unloading_clears_tracking() {
        let mut world = WorldHandle::default();
        world.spawn_vehicle(Coord::new(0, 0, 0), 10, Motion::STILL);
        let mut plugin = FallLoadingPlugin::default();
        plugin.on_world_event(WorldEvent::Loaded);
        plugin.on_update(&mut world).expect("update should succeed");
        assert_eq!(plugin.pipeline().table().len(), 1);

        plugin.on_world_event(WorldEvent::Unloaded);

        assert!(!plugin.is_active());
        assert!(plugin.pipeline().table().is_empty());
    }

    #[rstest]
    #[case(1, vec![true, true, true, true])]
    #[case(3, vec![true, false, false, true, false, false, true])]
    fn runs_on_the_configured_interval(#[case] interval: u32, #[case] expected: Vec<bool>) {
        let mut world = WorldHandle::default();
        let config = LoaderConfig {
            update_interval: std::num::NonZeroU32::new(interval).expect("interval is non-zero"),
            flag_exit_vehicle: false,
        };
        let mut plugin = FallLoadingPlugin::new(config);
        plugin.on_world_event(WorldEvent::Loaded);

        let ran: Vec<bool> = expected
            .iter()
            .map(|_| {
                plugin
                    .on_update(&mut world)
                    .expect("update should succeed")
                    .is_some()
            })
            .collect();

        assert_eq!(ran, expected);
    }
}
