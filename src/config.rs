//! Runtime settings for the loading plugin.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::RideFlags;
use crate::DEFAULT_UPDATE_INTERVAL;

/// Failure to parse a [`LoaderConfig`].
#[derive(Debug, Error)]
#[error("invalid loader configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

/// Settings for [`FallLoadingPlugin`](crate::plugin::FallLoadingPlugin).
///
/// Missing fields take their defaults; unknown fields are rejected.
///
/// # Examples
///
/// ```
/// use minecart_loading::LoaderConfig;
/// let config = LoaderConfig::from_json_str(r#"{ "update_interval": 4 }"#)?;
/// assert_eq!(config.update_interval.get(), 4);
/// assert!(!config.flag_exit_vehicle);
/// # Ok::<(), minecart_loading::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Host updates between pipeline runs.
    pub update_interval: NonZeroU32,
    /// Raise the exit-vehicle flag on creatures when they are mounted.
    pub flag_exit_vehicle: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            update_interval: NonZeroU32::new(DEFAULT_UPDATE_INTERVAL).unwrap_or(NonZeroU32::MIN),
            flag_exit_vehicle: false,
        }
    }
}

impl LoaderConfig {
    /// Parses settings from JSON.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for malformed JSON, unknown fields, or a zero
    /// update interval.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Mount flags derived from these settings.
    #[must_use]
    pub const fn ride_flags(&self) -> RideFlags {
        RideFlags {
            exit_vehicle: self.flag_exit_vehicle,
        }
    }
}
