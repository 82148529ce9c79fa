//! Control surface configuration.
//!
//! Gesture thresholds, the overlay's default anchor and the host bridge
//! fallback policy in one typed struct, with thread-safe access via RwLock
//! and JSON persistence.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{RecBarError, RecBarResult, ResultExt};
use crate::overlay::types::{SurfacePosition, TAP_TIMEOUT_MS, TOUCH_SLOP};

/// What to do when the named host bridge is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum BridgeFallback {
    /// Report `EndpointUnavailable`; actions stay queued in the router.
    Strict,
    /// Construct a fresh bridge and deliver to it.
    #[default]
    BestEffort,
}

/// Centralized control surface configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ControlsConfig {
    /// Presses shorter than this (ms) may be taps.
    pub tap_timeout_ms: i64,

    /// Displacement on either axis that turns a press into a drag.
    pub touch_slop: f32,

    /// Where the floating overlay appears when it is created.
    pub default_anchor: SurfacePosition,

    /// Policy when the host bridge is missing.
    pub bridge_fallback: BridgeFallback,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            tap_timeout_ms: TAP_TIMEOUT_MS,
            touch_slop: TOUCH_SLOP,
            default_anchor: SurfacePosition::new(100.0, 300.0),
            bridge_fallback: BridgeFallback::default(),
        }
    }
}

impl ControlsConfig {
    /// Validate and clamp settings to acceptable ranges.
    pub fn validate(&mut self) {
        self.tap_timeout_ms = self.tap_timeout_ms.clamp(50, 2000);
        if !self.touch_slop.is_finite() {
            self.touch_slop = TOUCH_SLOP;
        }
        self.touch_slop = self.touch_slop.clamp(1.0, 200.0);
    }

    /// Read a config file, filling missing fields with defaults.
    pub fn load_from_path(path: &Path) -> RecBarResult<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: ControlsConfig = serde_json::from_str(&raw)
            .map_err(|e| RecBarError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate();
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> RecBarResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

lazy_static! {
    /// Global control surface configuration.
    ///
    /// Components never read this implicitly; the hub snapshots it and
    /// passes the values into constructors.
    pub static ref CONTROLS_CONFIG: RwLock<ControlsConfig> = RwLock::new(ControlsConfig::default());
}

/// Per-user location of the config file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("recbar").join("controls.json"))
}

/// Load `path` into the global config. A missing file keeps the defaults.
pub fn load_global(path: &Path) -> RecBarResult<()> {
    if !path.exists() {
        log::debug!("[CONFIG] {} not found, using defaults", path.display());
        return Ok(());
    }
    let config = ControlsConfig::load_from_path(path)?;
    log::debug!("[CONFIG] Loaded controls config: {:?}", config);
    *CONTROLS_CONFIG.write() = config;
    Ok(())
}

/// Replace the global config (validated).
pub fn set_controls_config(mut config: ControlsConfig) {
    config.validate();
    log::debug!("[CONFIG] set_controls_config({:?})", config);
    *CONTROLS_CONFIG.write() = config;
}

/// Snapshot of the current global config.
pub fn get_controls_config() -> ControlsConfig {
    CONTROLS_CONFIG.read().clone()
}

pub fn get_bridge_fallback() -> BridgeFallback {
    CONTROLS_CONFIG.read().bridge_fallback
}
