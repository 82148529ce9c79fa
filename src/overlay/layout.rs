//! Overlay button layout.
//!
//! Button rectangles are relative to the surface's top-left anchor so the
//! registry can follow the surface while it is dragged.

use serde::{Deserialize, Serialize};

use super::types::{Bounds, Region, RegionKind};
use crate::routing::ActionKind;

/// Edge length of a default button
pub const BUTTON_SIZE: f32 = 48.0;

/// Gap between default buttons and around the row
pub const BUTTON_GAP: f32 = 8.0;

/// One button in the layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonLayout {
    pub action: ActionKind,
    pub bounds: Bounds,
}

/// Buttons of the floating overlay, in registration (priority) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLayout {
    pub buttons: Vec<ButtonLayout>,
}

impl Default for OverlayLayout {
    /// Start, Stop, Screenshot in one row.
    fn default() -> Self {
        let buttons = ActionKind::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| ButtonLayout {
                action: *action,
                bounds: Bounds::from_xywh(
                    BUTTON_GAP + i as f32 * (BUTTON_SIZE + BUTTON_GAP),
                    BUTTON_GAP,
                    BUTTON_SIZE,
                    BUTTON_SIZE,
                ),
            })
            .collect();
        Self { buttons }
    }
}

impl OverlayLayout {
    /// Smallest surface size that fits every button plus the outer gap
    pub fn content_size(&self) -> (f32, f32) {
        self.buttons.iter().fold((0.0_f32, 0.0_f32), |(w, h), b| {
            (w.max(b.bounds.right + BUTTON_GAP), h.max(b.bounds.bottom + BUTTON_GAP))
        })
    }

    /// Build the surface-relative region registry.
    ///
    /// Buttons come first in layout order; the drag background covering
    /// `width` x `height` is registered last so it never shadows a button.
    pub fn regions(&self, width: f32, height: f32) -> Vec<Region> {
        self.buttons
            .iter()
            .map(|b| Region::control(b.action, b.bounds))
            .chain(std::iter::once(Region::new(
                RegionKind::Background,
                Bounds::from_xywh(0.0, 0.0, width, height),
            )))
            .collect()
    }
}
