//! Tap/drag classification for a movable surface.
//!
//! Consumes a single pointer's Down, Move*, Up sequence. Every Move yields
//! an incremental drag delta; Up yields exactly one of `Tap` or
//! `DragSettled`.
//!
//! ```text
//! Idle --Down--> Pressed --Move(>= slop)--> PressedMoved
//!                   |                            |
//!                   +------------Up--------------+--> Idle
//! ```
//!
//! Only `Pressed` with elapsed < tap timeout produces `Tap`.

use crate::overlay::state::{GestureState, TouchSession};
use crate::overlay::types::{
    Point, PointerEvent, PointerPhase, SurfacePosition, TAP_TIMEOUT_MS, TOUCH_SLOP,
};

/// Thresholds separating a tap from a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    /// Exclusive upper bound on press duration for a tap
    pub tap_timeout_ms: i64,
    /// Displacement on either axis at which the press counts as moved
    pub touch_slop: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            tap_timeout_ms: TAP_TIMEOUT_MS,
            touch_slop: TOUCH_SLOP,
        }
    }
}

/// Output of the classifier for one input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Move the surface by this much
    DragDelta { dx: f32, dy: f32 },
    /// Short, still press released at `point`
    Tap { point: Point },
    /// Press ended as a drag; surface stays where it was dragged
    DragSettled { origin: SurfacePosition, dx: f32, dy: f32 },
}

#[derive(Debug, Default)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    session: Option<TouchSession>,
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            session: None,
        }
    }

    pub fn thresholds(&self) -> GestureThresholds {
        self.thresholds
    }

    pub fn state(&self) -> GestureState {
        self.session
            .as_ref()
            .map(TouchSession::state)
            .unwrap_or_default()
    }

    pub fn session(&self) -> Option<&TouchSession> {
        self.session.as_ref()
    }

    /// Feed one pointer event. `origin` is the surface anchor, recorded on Down.
    pub fn handle(&mut self, event: &PointerEvent, origin: SurfacePosition) -> Option<Gesture> {
        match event.phase {
            PointerPhase::Down => {
                self.on_down(event, origin);
                None
            },
            PointerPhase::Move => self.on_move(event),
            PointerPhase::Up => self.on_up(event),
            PointerPhase::Cancel => {
                self.cancel();
                None
            },
        }
    }

    /// Discard the open session without classifying it.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            log::debug!("[GESTURE] Session aborted");
        }
    }

    fn on_down(&mut self, event: &PointerEvent, origin: SurfacePosition) {
        if self.session.is_some() {
            // Keep the original session; its start point stays authoritative.
            log::debug!("[GESTURE] Ignoring Down while a session is open");
            return;
        }
        self.session = Some(TouchSession::begin(event, origin));
    }

    fn on_move(&mut self, event: &PointerEvent) -> Option<Gesture> {
        let slop = self.thresholds.touch_slop;
        let session = self.session.as_mut()?;
        let point = event.position();

        let was_moved = session.moved;
        session.track_slop(point, slop);
        if session.moved && !was_moved {
            log::trace!("[GESTURE] Slop exceeded, press is now a drag");
        }

        let (dx, dy) = session.advance(point);
        Some(Gesture::DragDelta { dx, dy })
    }

    fn on_up(&mut self, event: &PointerEvent) -> Option<Gesture> {
        let mut session = self.session.take()?;
        let point = event.position();
        session.track_slop(point, self.thresholds.touch_slop);

        let elapsed = session.elapsed_ms(event.timestamp_ms);
        if !session.moved && elapsed < self.thresholds.tap_timeout_ms {
            log::debug!("[GESTURE] Tap at ({}, {}) after {}ms", point.x, point.y, elapsed);
            return Some(Gesture::Tap { point });
        }

        let (dx, dy) = session.displacement(session.last);
        log::debug!(
            "[GESTURE] Drag settled after {}ms, moved={}, total=({}, {})",
            elapsed,
            session.moved,
            dx,
            dy
        );
        Some(Gesture::DragSettled {
            origin: session.origin,
            dx,
            dy,
        })
    }
}
