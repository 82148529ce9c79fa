//! Host bridge commands.
//!
//! The host application drives surface visibility with a small set of named
//! commands. Anything else is reported back as not implemented.

use std::str::FromStr;

use crate::error::RecBarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    ShowFloatingButton,
    HideFloatingButton,
    ShowNotificationBar,
    HideNotificationBar,
}

impl HostCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShowFloatingButton => "showFloatingButton",
            Self::HideFloatingButton => "hideFloatingButton",
            Self::ShowNotificationBar => "showNotificationBar",
            Self::HideNotificationBar => "hideNotificationBar",
        }
    }
}

impl FromStr for HostCommand {
    type Err = RecBarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "showFloatingButton" => Ok(Self::ShowFloatingButton),
            "hideFloatingButton" => Ok(Self::HideFloatingButton),
            "showNotificationBar" => Ok(Self::ShowNotificationBar),
            "hideNotificationBar" => Ok(Self::HideNotificationBar),
            _ => Err(RecBarError::UnknownHostCommand {
                name: s.to_string(),
            }),
        }
    }
}
