//! RecBar: gesture classification and action routing for a screen
//! recorder's floating overlay and notification controls.
//!
//! Both surfaces produce [`routing::Action`]s that flow through one
//! [`routing::ActionRouter`] to the host's control endpoint. The hub in
//! [`app`] ties them together for a host application.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod notification;
pub mod overlay;
pub mod routing;

pub use app::{ControlHub, HostCommand};
pub use config::{BridgeFallback, ControlsConfig};
pub use error::{RecBarError, RecBarResult};
pub use notification::{NotificationSurfaceController, NotificationTrigger};
pub use overlay::{OverlayLayout, OverlaySurfaceController, PointerEvent, Surface, TapOutcome};
pub use routing::{Action, ActionKind, ActionOrigin, ActionRouter, ControlEndpoint};
