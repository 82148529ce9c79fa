//! Notification panel control surface.
//!
//! Three fixed buttons mapped straight to actions. No gestures and no
//! hit-testing: the platform already tells us which button was pressed.
//! Repeated triggers produce repeated dispatches; de-duplication belongs to
//! the control endpoint. Triggers only count while the notification is
//! visible.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{RecBarError, RecBarResult};
use crate::routing::{Action, ActionKind, ActionOrigin, ActionRouter};

/// Externally addressable notification buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationTrigger {
    Start,
    Stop,
    Screenshot,
}

impl NotificationTrigger {
    pub const ALL: [NotificationTrigger; 3] = [Self::Start, Self::Stop, Self::Screenshot];

    pub fn action_kind(&self) -> ActionKind {
        match self {
            Self::Start => ActionKind::StartRecording,
            Self::Stop => ActionKind::StopRecording,
            Self::Screenshot => ActionKind::Screenshot,
        }
    }

    /// Trigger id the platform uses to address this button
    pub fn id(&self) -> &'static str {
        match self {
            Self::Start => "notification_start",
            Self::Stop => "notification_stop",
            Self::Screenshot => "notification_screenshot",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
            Self::Screenshot => "Screenshot",
        }
    }
}

impl fmt::Display for NotificationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for NotificationTrigger {
    type Err = RecBarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| RecBarError::UnknownTrigger {
                name: s.to_string(),
            })
    }
}

/// Adapter from notification buttons to the router.
///
/// Clones share the visibility flag.
#[derive(Clone)]
pub struct NotificationSurfaceController {
    router: ActionRouter,
    visible: Arc<AtomicBool>,
}

impl NotificationSurfaceController {
    /// Starts hidden.
    pub fn new(router: ActionRouter) -> Self {
        Self {
            router,
            visible: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Release);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    /// Dispatch the trigger's action. Returns false if the notification is
    /// hidden and the press was ignored.
    pub fn trigger(&self, trigger: NotificationTrigger) -> RecBarResult<bool> {
        if !self.is_visible() {
            log::debug!("[NOTIFICATION] {} ignored while hidden", trigger.label());
            return Ok(false);
        }
        let kind = trigger.action_kind();
        log::info!("[NOTIFICATION] {} pressed", trigger.label());
        self.router
            .dispatch(Action::new(kind, ActionOrigin::Notification))?;
        Ok(true)
    }

    /// Trigger by platform id; unknown ids are rejected.
    pub fn trigger_by_id(&self, id: &str) -> RecBarResult<bool> {
        match id.parse::<NotificationTrigger>() {
            Ok(trigger) => self.trigger(trigger),
            Err(e) => {
                log::warn!("[NOTIFICATION] {}", e);
                Err(e)
            },
        }
    }

    pub fn start(&self) -> RecBarResult<bool> {
        self.trigger(NotificationTrigger::Start)
    }

    pub fn stop(&self) -> RecBarResult<bool> {
        self.trigger(NotificationTrigger::Stop)
    }

    pub fn screenshot(&self) -> RecBarResult<bool> {
        self.trigger(NotificationTrigger::Screenshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::routing::{ActionBus, ControlEndpoint, FnEndpoint};

    fn setup() -> (NotificationSurfaceController, ActionRouter, Arc<Mutex<Vec<Action>>>) {
        let router = ActionRouter::new(Arc::new(ActionBus::new())).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let endpoint: Arc<dyn ControlEndpoint> =
            Arc::new(FnEndpoint::new("host", move |action: &Action| {
                sink.lock().push(action.clone());
                Ok(())
            }));
        router.attach(endpoint).unwrap();
        let notification = NotificationSurfaceController::new(router.clone());
        notification.set_visible(true);
        (notification, router, seen)
    }

    #[test]
    fn test_trigger_mapping() {
        assert_eq!(NotificationTrigger::Start.action_kind(), ActionKind::StartRecording);
        assert_eq!(NotificationTrigger::Stop.action_kind(), ActionKind::StopRecording);
        assert_eq!(NotificationTrigger::Screenshot.action_kind(), ActionKind::Screenshot);
    }

    #[test]
    fn test_trigger_ids() {
        for trigger in NotificationTrigger::ALL {
            assert_eq!(trigger.id().parse::<NotificationTrigger>().unwrap(), trigger);
        }
        assert!(matches!(
            "notification_pause".parse::<NotificationTrigger>(),
            Err(RecBarError::UnknownTrigger { .. })
        ));
    }

    #[test]
    fn test_repeated_screenshot_is_not_deduplicated() {
        let (notification, router, seen) = setup();
        notification.screenshot().unwrap();
        notification.screenshot().unwrap();
        router.flush().unwrap();

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert!(seen
            .iter()
            .all(|a| a.kind == ActionKind::Screenshot && a.origin == ActionOrigin::Notification));
        assert_ne!(seen[0].id, seen[1].id);
        drop(seen);
        router.shutdown();
    }

    #[test]
    fn test_hidden_notification_ignores_triggers() {
        let (notification, router, seen) = setup();
        let shared = notification.clone();
        shared.set_visible(false);

        assert!(!notification.is_visible());
        assert!(!notification.screenshot().unwrap());
        assert!(!notification.trigger_by_id("notification_start").unwrap());

        notification.set_visible(true);
        assert!(notification.stop().unwrap());
        router.flush().unwrap();

        let kinds: Vec<ActionKind> = seen.lock().iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![ActionKind::StopRecording]);
        router.shutdown();
    }

    #[test]
    fn test_trigger_by_id() {
        let (notification, router, seen) = setup();
        notification.trigger_by_id("notification_start").unwrap();
        notification.trigger_by_id("notification_stop").unwrap();
        assert!(notification.trigger_by_id("bogus").is_err());
        router.flush().unwrap();

        let kinds: Vec<ActionKind> = seen.lock().iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![ActionKind::StartRecording, ActionKind::StopRecording]);
        router.shutdown();
    }
}
