// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum_macros::{AsRefStr, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
    Warning,
    Loading,
}

impl NotificationKind {
    /// How long a notification of this kind stays visible before its exit transition.
    #[must_use]
    pub fn dismiss_after(&self) -> Duration {
        match self {
            Self::Loading => Duration::from_millis(30_000),
            _ => Duration::from_millis(4_000),
        }
    }

    /// Background colour of the overlay.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Info => "#2196F3",
            Self::Error => "#f44336",
            Self::Success => "#4CAF50",
            Self::Warning => "#ff9800",
            Self::Loading => "#9C27B0",
        }
    }

    #[must_use]
    pub fn shows_spinner(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
