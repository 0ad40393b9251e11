//! Runtime widget configuration, passed from JS as JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::StorageKeys;

pub const MIN_CHART_SIZE: u32 = 80;
pub const MAX_CHART_SIZE: u32 = 800;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoasterConfig {
    /// Id of the element the widget mounts into; created under `<body>` if missing.
    pub mount_id: String,
    /// Side of the square chart canvas, in pixels.
    pub chart_size: u32,
    /// Duration of the roast line fade-in.
    pub animation_ms: u32,
    /// `EnvFilter` directive for console logging.
    pub log_filter: String,
    /// Prepended to the `favorites` and `stats` storage keys.
    pub storage_prefix: String,
}

impl Default for RoasterConfig {
    fn default() -> Self {
        Self {
            mount_id: "droid-roast".to_owned(),
            chart_size: 200,
            animation_ms: 300,
            log_filter: "droid_roast=info".to_owned(),
            storage_prefix: String::new(),
        }
    }
}

impl RoasterConfig {
    /// Parses and validates; an out-of-range `chart_size` is clamped.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.chart_size = config.chart_size.clamp(MIN_CHART_SIZE, MAX_CHART_SIZE);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mount_id.trim().is_empty() {
            return Err(Error::config("mount_id must not be empty"));
        }
        Ok(())
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::with_prefix(&self.storage_prefix)
    }
}
