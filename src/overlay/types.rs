//! Type definitions for the floating overlay.
//!
//! Pointer events, geometry primitives, surface position and the region
//! registry entries used by gesture classification and hit-testing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::routing::ActionKind;

// ============================================================================
// Constants
// ============================================================================

/// Maximum press duration (exclusive) still classified as a tap
pub const TAP_TIMEOUT_MS: i64 = 200;

/// Displacement on either axis at which a press becomes a drag
pub const TOUCH_SLOP: f32 = 20.0;

// ============================================================================
// Geometry Types
// ============================================================================

/// A point in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle with float coordinates.
///
/// Uses left/top/right/bottom format. All four edges are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create bounds from x, y, width, height
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }

    /// Check if a point is inside, edges included
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

// ============================================================================
// Pointer Input
// ============================================================================

/// Phase of a single-pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Platform aborted the gesture (e.g. touch stolen by the system)
    Cancel,
}

/// A raw pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub screen_x: f32,
    pub screen_y: f32,
    pub timestamp_ms: i64,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, screen_x: f32, screen_y: f32, timestamp_ms: i64) -> Self {
        Self {
            phase,
            screen_x,
            screen_y,
            timestamp_ms,
        }
    }

    pub fn down(x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self::new(PointerPhase::Down, x, y, timestamp_ms)
    }

    pub fn moved(x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self::new(PointerPhase::Move, x, y, timestamp_ms)
    }

    pub fn up(x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self::new(PointerPhase::Up, x, y, timestamp_ms)
    }

    pub fn position(&self) -> Point {
        Point::new(self.screen_x, self.screen_y)
    }
}

// ============================================================================
// Surface Position
// ============================================================================

/// Top-left anchor of the overlay in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SurfacePosition {
    pub x: f32,
    pub y: f32,
}

impl SurfacePosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Apply a drag delta. No clamping: the surface may leave the screen.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

// ============================================================================
// Regions
// ============================================================================

/// What a region on the overlay does when tapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionKind {
    /// Interactive button producing an action
    Control(ActionKind),
    /// Drag handle; consumes moves, taps on it do nothing
    Background,
}

impl RegionKind {
    pub fn action(&self) -> Option<ActionKind> {
        match self {
            Self::Control(kind) => Some(*kind),
            Self::Background => None,
        }
    }
}

/// A hit-testable region.
///
/// Bounds are in whatever space the caller works in: the layout stores them
/// relative to the surface anchor, the hit tester receives them translated
/// to screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub kind: RegionKind,
    pub bounds: Bounds,
}

impl Region {
    pub fn new(kind: RegionKind, bounds: Bounds) -> Self {
        Self { kind, bounds }
    }

    pub fn control(kind: ActionKind, bounds: Bounds) -> Self {
        Self::new(RegionKind::Control(kind), bounds)
    }

    /// Move the region to follow a surface anchored at `position`
    pub fn translated(&self, position: SurfacePosition) -> Self {
        Self {
            kind: self.kind,
            bounds: self.bounds.offset(position.x, position.y),
        }
    }
}
