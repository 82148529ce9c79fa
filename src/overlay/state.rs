//! Per-gesture state owned by the classifier.
//!
//! # State Organization
//!
//! - `TouchSession` - One Down..Up cycle: start sample, surface origin,
//!   last sample seen and the sticky "moved" flag
//! - `GestureState` - Observable phase of the classifier

use super::types::{Point, PointerEvent, SurfacePosition};

/// Observable phase of the gesture classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pointer down, still within slop
    Pressed,
    /// Pointer down and has exceeded slop at least once
    PressedMoved,
}

/// State for a single press, from Down to Up or abort.
#[derive(Debug, Clone)]
pub struct TouchSession {
    pub start_time_ms: i64,
    /// Pointer position at Down (screen coords)
    pub start: Point,
    /// Surface anchor at Down
    pub origin: SurfacePosition,
    /// Last pointer position used for incremental deltas
    pub last: Point,
    /// Sticky: once set it stays set until the session ends
    pub moved: bool,
}

impl TouchSession {
    pub fn begin(down: &PointerEvent, origin: SurfacePosition) -> Self {
        Self {
            start_time_ms: down.timestamp_ms,
            start: down.position(),
            origin,
            last: down.position(),
            moved: false,
        }
    }

    /// Cumulative displacement of `point` from the Down position
    pub fn displacement(&self, point: Point) -> (f32, f32) {
        (point.x - self.start.x, point.y - self.start.y)
    }

    /// Mark the session moved if `point` is at or beyond `slop` on either axis.
    pub fn track_slop(&mut self, point: Point, slop: f32) {
        let (dx, dy) = self.displacement(point);
        if dx.abs() >= slop || dy.abs() >= slop {
            self.moved = true;
        }
    }

    /// Incremental delta since the previous sample; advances `last`.
    pub fn advance(&mut self, point: Point) -> (f32, f32) {
        let delta = (point.x - self.last.x, point.y - self.last.y);
        self.last = point;
        delta
    }

    pub fn elapsed_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.start_time_ms
    }

    pub fn state(&self) -> GestureState {
        if self.moved {
            GestureState::PressedMoved
        } else {
            GestureState::Pressed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slop_is_sticky() {
        let mut session = TouchSession::begin(
            &PointerEvent::down(100.0, 100.0, 0),
            SurfacePosition::default(),
        );
        assert_eq!(session.state(), GestureState::Pressed);

        session.track_slop(Point::new(125.0, 100.0), 20.0);
        assert_eq!(session.state(), GestureState::PressedMoved);

        // Returning to the start does not clear it
        session.track_slop(Point::new(100.0, 100.0), 20.0);
        assert!(session.moved);
    }

    #[test]
    fn test_slop_boundary_is_inclusive() {
        let mut session = TouchSession::begin(
            &PointerEvent::down(0.0, 0.0, 0),
            SurfacePosition::default(),
        );
        session.track_slop(Point::new(19.9, -19.9), 20.0);
        assert!(!session.moved);
        session.track_slop(Point::new(0.0, -20.0), 20.0);
        assert!(session.moved);
    }

    #[test]
    fn test_advance_is_incremental() {
        let mut session = TouchSession::begin(
            &PointerEvent::down(10.0, 10.0, 0),
            SurfacePosition::default(),
        );
        assert_eq!(session.advance(Point::new(15.0, 12.0)), (5.0, 2.0));
        assert_eq!(session.advance(Point::new(14.0, 20.0)), (-1.0, 8.0));
        assert_eq!(session.displacement(Point::new(14.0, 20.0)), (4.0, 10.0));
    }
}
