//! Cross-surface action routing.
//!
//! Every control surface (floating overlay, notification panel, anything
//! added later) turns user input into an [`Action`] and hands it to the one
//! [`ActionRouter`]. The router owns ordering and queuing; the
//! [`ControlEndpoint`] it delivers to is the only authoritative consumer.
//!
//! # Modules
//!
//! - `action` - Action value types and wire names
//! - `router` - Ordered, non-blocking delivery with queue-until-attach
//! - `bus` - Observer fan-out
//! - `endpoint` - The endpoint trait
//! - `registry` - Named host bridge registry with fallback policy

mod action;
mod bus;
mod endpoint;
mod registry;
mod router;

pub use action::{Action, ActionKind, ActionOrigin};
pub use bus::{ActionBus, SubscriptionId};
pub use endpoint::{ControlEndpoint, FnEndpoint};
pub use registry::{EndpointRegistry, MAIN_ENDPOINT};
pub use router::ActionRouter;
