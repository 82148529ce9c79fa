//! Input handling for the floating overlay.
//!
//! This module provides:
//! - Tap/drag gesture classification
//! - Hit-testing of taps against overlay regions
//!
//! # Modules
//!
//! - `gesture` - Pointer stream to drag deltas and tap/drag-settled
//! - `hit_test` - First-match region resolution

pub mod gesture;
pub mod hit_test;

pub use gesture::{Gesture, GestureClassifier, GestureThresholds};
pub use hit_test::resolve;
