//! Application configuration management.
//!
//! `ControlsConfig` holds every tunable of the control surfaces behind a
//! `parking_lot::RwLock` for fast, non-poisoning access and atomic batch
//! updates from the host.

pub mod controls;

pub use controls::{
    default_config_path, get_bridge_fallback, get_controls_config, load_global,
    set_controls_config, BridgeFallback, ControlsConfig, CONTROLS_CONFIG,
};
