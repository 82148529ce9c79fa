//! Floating overlay control surface.
//!
//! A small movable surface with Start, Stop and Screenshot buttons. Dragging
//! anywhere moves it; a tap on a button becomes an [`Action`] for the router.
//!
//! # Architecture
//!
//! ```text
//! mod.rs (Surface capability, OverlaySurfaceController)
//!   |
//!   +-- types.rs (pointer events, geometry, regions)
//!   +-- state.rs (touch session)
//!   +-- layout.rs (button layout -> region registry)
//!   +-- input/ (gesture classification, hit-testing)
//! ```

pub mod input;
pub mod layout;
pub mod state;
pub mod types;


pub use input::{Gesture, GestureClassifier, GestureThresholds};
pub use layout::{ButtonLayout, OverlayLayout};
pub use state::GestureState;
pub use types::{Bounds, Point, PointerEvent, PointerPhase, Region, RegionKind, SurfacePosition};

use crate::routing::{Action, ActionKind, ActionOrigin, ActionRouter};

/// What the rendering layer exposes to the controller.
pub trait Surface {
    /// Current on-screen bounds; only the size is used.
    fn bounds(&self) -> Bounds;

    /// Repaint the surface with its anchor at `position`.
    fn request_redraw(&self, position: SurfacePosition);
}

/// Result of a classified tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// A button was hit and its action was handed to the router
    Dispatched(ActionKind),
    /// A button was hit but the router refused the action (closed)
    Rejected(ActionKind),
    /// The drag background was hit
    Background,
    /// Nothing registered under the tap
    Missed,
}

/// Owns position, region registry and gesture state of one floating surface.
///
/// All methods must be called from the surface's event thread.
pub struct OverlaySurfaceController {
    surface: Box<dyn Surface>,
    router: ActionRouter,
    classifier: GestureClassifier,
    layout: OverlayLayout,
    position: SurfacePosition,
    /// Surface-relative, in registration order
    regions: Vec<Region>,
    hit_tests: u64,
    redraws: u64,
}

impl OverlaySurfaceController {
    /// Surface-created hook: register regions and reset to `anchor`.
    pub fn create(
        surface: Box<dyn Surface>,
        layout: OverlayLayout,
        router: ActionRouter,
        thresholds: GestureThresholds,
        anchor: SurfacePosition,
    ) -> Self {
        let mut controller = Self {
            surface,
            router,
            classifier: GestureClassifier::new(thresholds),
            layout,
            position: anchor,
            regions: Vec::new(),
            hit_tests: 0,
            redraws: 0,
        };
        controller.register_regions();
        log::info!(
            "[OVERLAY] Created at ({}, {}) with {} region(s)",
            anchor.x,
            anchor.y,
            controller.regions.len()
        );
        controller.redraw();
        controller
    }

    /// Surface-destroyed hook: abort any open gesture and release the registry.
    ///
    /// Actions already dispatched are unaffected.
    pub fn destroy(mut self) {
        self.classifier.cancel();
        self.regions.clear();
        log::info!("[OVERLAY] Destroyed at ({}, {})", self.position.x, self.position.y);
    }

    /// Replace the button layout and re-register regions.
    pub fn relayout(&mut self, layout: OverlayLayout) {
        self.layout = layout;
        self.register_regions();
        self.redraw();
    }

    /// Process one pointer event.
    pub fn handle_event(&mut self, event: PointerEvent) -> Option<TapOutcome> {
        self.handle_batch(&[event]).into_iter().next()
    }

    /// Process a platform batch of pointer events, redrawing at most once.
    pub fn handle_batch(&mut self, events: &[PointerEvent]) -> Vec<TapOutcome> {
        let mut outcomes = Vec::new();
        let mut dirty = false;

        for event in events {
            match self.classifier.handle(event, self.position) {
                Some(Gesture::DragDelta { dx, dy }) => {
                    self.move_by(dx, dy);
                    dirty = true;
                },
                Some(Gesture::Tap { point }) => outcomes.push(self.on_tap(point)),
                Some(Gesture::DragSettled { .. }) | None => {},
            }
        }

        if dirty {
            self.redraw();
        }
        outcomes
    }

    /// Move the surface and redraw. Not clamped to the screen.
    pub fn on_drag_delta(&mut self, dx: f32, dy: f32) {
        self.move_by(dx, dy);
        self.redraw();
    }

    /// Hit-test a tap against the regions at the surface's current position.
    pub fn on_tap(&mut self, point: Point) -> TapOutcome {
        self.hit_tests += 1;
        let screen_regions: Vec<Region> = self
            .regions
            .iter()
            .map(|r| r.translated(self.position))
            .collect();

        let Some(region) = input::resolve(point, &screen_regions) else {
            log::trace!("[OVERLAY] Tap at ({}, {}) hit nothing", point.x, point.y);
            return TapOutcome::Missed;
        };

        match region.kind {
            RegionKind::Control(kind) => {
                log::info!("[OVERLAY] {} tapped", kind);
                match self.router.dispatch(Action::new(kind, ActionOrigin::Overlay)) {
                    Ok(()) => TapOutcome::Dispatched(kind),
                    Err(e) => {
                        log::error!("[OVERLAY] Failed to dispatch {}: {}", kind, e);
                        TapOutcome::Rejected(kind)
                    },
                }
            },
            RegionKind::Background => TapOutcome::Background,
        }
    }

    pub fn position(&self) -> SurfacePosition {
        self.position
    }

    pub fn gesture_state(&self) -> GestureState {
        self.classifier.state()
    }

    /// Region registry in screen coordinates at the current position
    pub fn screen_regions(&self) -> Vec<Region> {
        self.regions
            .iter()
            .map(|r| r.translated(self.position))
            .collect()
    }

    pub fn hit_test_count(&self) -> u64 {
        self.hit_tests
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.translate(dx, dy);
    }

    fn register_regions(&mut self) {
        let bounds = self.surface.bounds();
        let (width, height) = if bounds.width() > 0.0 && bounds.height() > 0.0 {
            (bounds.width(), bounds.height())
        } else {
            self.layout.content_size()
        };
        self.regions = self.layout.regions(width, height);
    }

    fn redraw(&mut self) {
        self.redraws += 1;
        self.surface.request_redraw(self.position);
    }
}
