//! Host application integration.
//!
//! - `hub`: `ControlHub`, which wires config, endpoint registry, router and
//!   both control surfaces together
//! - `commands`: named host commands toggling surface visibility

pub mod commands;
pub mod hub;

pub use commands::HostCommand;
pub use hub::ControlHub;
