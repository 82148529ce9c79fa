//! Wiring of config, registry, router and both control surfaces.
//!
//! The hub lives on the host's UI thread. It owns the floating overlay (if
//! shown) and the notification adapter, and it is the only place that
//! attaches or resolves the host bridge.

use std::sync::Arc;

use crate::config::{self, ControlsConfig};
use crate::error::{OptionExt, RecBarError, RecBarResult};
use crate::notification::NotificationSurfaceController;
use crate::overlay::{GestureThresholds, OverlayLayout, OverlaySurfaceController, Surface};
use crate::routing::{
    Action, ActionBus, ActionRouter, ControlEndpoint, EndpointRegistry, MAIN_ENDPOINT,
};

use super::commands::HostCommand;

type EndpointFactory = Box<dyn Fn() -> Arc<dyn ControlEndpoint> + Send + Sync>;
type SurfaceFactory = Box<dyn Fn() -> Box<dyn Surface>>;

pub struct ControlHub {
    config: ControlsConfig,
    registry: Arc<EndpointRegistry>,
    router: ActionRouter,
    notification: NotificationSurfaceController,
    overlay: Option<OverlaySurfaceController>,
    endpoint_factory: Option<EndpointFactory>,
    surface_factory: Option<SurfaceFactory>,
}

impl ControlHub {
    pub fn new(config: ControlsConfig, registry: Arc<EndpointRegistry>) -> RecBarResult<Self> {
        let router = ActionRouter::new(Arc::new(ActionBus::new()))?;
        let notification = NotificationSurfaceController::new(router.clone());
        log::info!(
            "[HUB] Ready (tap < {}ms, slop {}, fallback {:?})",
            config.tap_timeout_ms,
            config.touch_slop,
            config.bridge_fallback
        );
        Ok(Self {
            config,
            registry,
            router,
            notification,
            overlay: None,
            endpoint_factory: None,
            surface_factory: None,
        })
    }

    /// Build from a snapshot of the global config.
    pub fn from_global_config(registry: Arc<EndpointRegistry>) -> RecBarResult<Self> {
        Self::new(config::get_controls_config(), registry)
    }

    /// Factory used to build a bridge when none is registered (best effort).
    pub fn with_endpoint_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn ControlEndpoint> + Send + Sync + 'static,
    {
        self.endpoint_factory = Some(Box::new(factory));
        self
    }

    /// Factory used by the `showFloatingButton` host command.
    pub fn with_surface_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Surface> + 'static,
    {
        self.surface_factory = Some(Box::new(factory));
        self
    }

    // ------------------------------------------------------------------
    // Host bridge
    // ------------------------------------------------------------------

    /// Register the host's bridge and start delivering to it.
    pub fn attach_host(&self, endpoint: Arc<dyn ControlEndpoint>) -> RecBarResult<()> {
        self.registry.register(MAIN_ENDPOINT, Arc::clone(&endpoint));
        self.router.attach(endpoint)
    }

    /// Host teardown: deregister and queue until the next attach.
    pub fn detach_host(&self) -> RecBarResult<()> {
        self.registry.deregister(MAIN_ENDPOINT);
        self.router.detach()
    }

    /// Re-attach the registered bridge, or apply the fallback policy.
    ///
    /// On error nothing is dropped; queued actions wait for `attach_host`.
    pub fn reconnect_host(&self) -> RecBarResult<()> {
        let endpoint = match &self.endpoint_factory {
            Some(factory) => {
                self.registry
                    .resolve(MAIN_ENDPOINT, self.config.bridge_fallback, || factory())?
            },
            None => self.registry.get(MAIN_ENDPOINT).ok_or_else(|| {
                log::error!("[HUB] No host bridge registered and no fallback factory");
                RecBarError::EndpointUnavailable {
                    name: MAIN_ENDPOINT.to_string(),
                }
            })?,
        };
        self.router.attach(endpoint)
    }

    // ------------------------------------------------------------------
    // Surfaces
    // ------------------------------------------------------------------

    /// Surface-created hook for the floating overlay.
    ///
    /// Replaces any overlay already shown.
    pub fn show_floating_button(&mut self, surface: Box<dyn Surface>, layout: OverlayLayout) {
        if let Some(previous) = self.overlay.take() {
            log::debug!("[HUB] Replacing existing overlay");
            previous.destroy();
        }
        let thresholds = GestureThresholds {
            tap_timeout_ms: self.config.tap_timeout_ms,
            touch_slop: self.config.touch_slop,
        };
        self.overlay = Some(OverlaySurfaceController::create(
            surface,
            layout,
            self.router.clone(),
            thresholds,
            self.config.default_anchor,
        ));
    }

    /// Surface-destroyed hook. Returns false if no overlay was shown.
    pub fn hide_floating_button(&mut self) -> bool {
        match self.overlay.take() {
            Some(overlay) => {
                overlay.destroy();
                true
            },
            None => false,
        }
    }

    pub fn show_notification_bar(&mut self) {
        log::info!("[HUB] Notification controls shown");
        self.notification.set_visible(true);
    }

    /// Hidden notification buttons no longer dispatch.
    pub fn hide_notification_bar(&mut self) {
        log::info!("[HUB] Notification controls hidden");
        self.notification.set_visible(false);
    }

    /// Execute a named host command.
    pub fn handle_host_command(&mut self, name: &str) -> RecBarResult<()> {
        let command = name.parse::<HostCommand>().map_err(|e| {
            log::warn!("[HUB] {}", e);
            e
        })?;
        log::debug!("[HUB] Host command {}", command.as_str());

        match command {
            HostCommand::ShowFloatingButton => {
                let surface = self
                    .surface_factory
                    .as_ref()
                    .map(|factory| factory())
                    .context("no overlay surface factory configured")?;
                self.show_floating_button(surface, OverlayLayout::default());
            },
            HostCommand::HideFloatingButton => {
                self.hide_floating_button();
            },
            HostCommand::ShowNotificationBar => self.show_notification_bar(),
            HostCommand::HideNotificationBar => self.hide_notification_bar(),
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn overlay(&self) -> Option<&OverlaySurfaceController> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut OverlaySurfaceController> {
        self.overlay.as_mut()
    }

    pub fn notification(&self) -> &NotificationSurfaceController {
        &self.notification
    }

    pub fn is_notification_visible(&self) -> bool {
        self.notification.is_visible()
    }

    pub fn router(&self) -> &ActionRouter {
        &self.router
    }

    pub fn registry(&self) -> &Arc<EndpointRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    /// Tear down both surfaces and stop the router after it drains.
    ///
    /// Returns the actions that never reached a host bridge.
    pub fn shutdown(&mut self) -> Vec<Action> {
        self.hide_floating_button();
        self.notification.set_visible(false);
        let undelivered = self.router.shutdown();
        log::info!("[HUB] Shut down ({} undelivered)", undelivered.len());
        undelivered
    }
}
