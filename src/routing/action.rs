//! Semantic control actions.
//!
//! An [`Action`] is the immutable fact "the user asked for X from surface Y".
//! It is produced once per classified tap or notification trigger and handed
//! to the router exactly once.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::RecBarError;

/// The closed set of recording controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ActionKind {
    StartRecording,
    StopRecording,
    Screenshot,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [Self::StartRecording, Self::StopRecording, Self::Screenshot];

    /// Stable wire name used by host bridges
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartRecording => "start_recording",
            Self::StopRecording => "stop_recording",
            Self::Screenshot => "screenshot",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = RecBarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start_recording" => Ok(Self::StartRecording),
            "stop_recording" => Ok(Self::StopRecording),
            "screenshot" => Ok(Self::Screenshot),
            _ => Err(RecBarError::UnrecognizedAction {
                name: s.to_string(),
            }),
        }
    }
}

/// Which control surface produced an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ActionOrigin {
    Overlay,
    Notification,
}

impl fmt::Display for ActionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlay => f.write_str("overlay"),
            Self::Notification => f.write_str("notification"),
        }
    }
}

/// A single user intent on its way to the control endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Action {
    /// Unique per intent; lets the endpoint drop replayed duplicates
    #[ts(type = "string")]
    pub id: Uuid,
    pub kind: ActionKind,
    pub origin: ActionOrigin,
    #[ts(type = "string")]
    pub issued_at: DateTime<Utc>,
}

impl Action {
    pub fn new(kind: ActionKind, origin: ActionOrigin) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            origin,
            issued_at: Utc::now(),
        }
    }

    /// Host bridge method that carries this action to the recorder UI.
    pub fn host_method(&self) -> &'static str {
        match (self.origin, self.kind) {
            (ActionOrigin::Overlay, ActionKind::StartRecording) => "onFloatingButtonStart",
            (ActionOrigin::Overlay, ActionKind::StopRecording) => "onFloatingButtonStop",
            (ActionOrigin::Overlay, ActionKind::Screenshot) => "onFloatingButtonScreenshot",
            (ActionOrigin::Notification, ActionKind::StartRecording) => "onNotificationStart",
            (ActionOrigin::Notification, ActionKind::StopRecording) => "onNotificationStop",
            (ActionOrigin::Notification, ActionKind::Screenshot) => "onNotificationScreenshot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), kind);
        }
        assert_eq!(
            " Screenshot ".parse::<ActionKind>().unwrap(),
            ActionKind::Screenshot
        );
    }

    #[test]
    fn test_unrecognized_name() {
        let err = "pause_recording".parse::<ActionKind>().unwrap_err();
        assert!(matches!(err, RecBarError::UnrecognizedAction { ref name } if name == "pause_recording"));
    }

    #[test]
    fn test_actions_are_distinct() {
        let a = Action::new(ActionKind::Screenshot, ActionOrigin::Notification);
        let b = Action::new(ActionKind::Screenshot, ActionOrigin::Notification);
        assert_ne!(a.id, b.id);
        assert_eq!(a.kind, b.kind);
    }

    #[test]
    fn test_host_method() {
        let overlay = Action::new(ActionKind::StartRecording, ActionOrigin::Overlay);
        assert_eq!(overlay.host_method(), "onFloatingButtonStart");

        let notification = Action::new(ActionKind::StopRecording, ActionOrigin::Notification);
        assert_eq!(notification.host_method(), "onNotificationStop");
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::new(ActionKind::StopRecording, ActionOrigin::Overlay);
        let json = serde_json::to_string(&action).expect("Failed to serialize");
        assert!(json.contains("\"kind\":\"stopRecording\""));
        assert!(json.contains("\"origin\":\"overlay\""));
        assert!(json.contains("\"issuedAt\""));

        let restored: Action = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(restored, action);
    }
}
