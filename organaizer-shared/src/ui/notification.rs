// SPDX-License-Identifier: GPL-3.0-only
//! Single-slot status overlay.
//!
//! At most one notification exists at a time. A `loading` notify updates the
//! present one in place and keeps its timer; any other kind replaces it with
//! a fresh one. After its dismiss delay a notification runs a short exit
//! transition and is then removed.

use log::debug;
use std::time::Duration;
use tokio::time::Instant;

use crate::models::notification::NotificationKind;

/// Length of the exit transition.
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Exiting { remove_at: Instant },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNotification {
    pub message: String,
    pub kind: NotificationKind,
    pub phase: Phase,
    dismiss_at: Instant,
}

impl ActiveNotification {
    fn new(message: &str, kind: NotificationKind, now: Instant) -> Self {
        Self {
            message: message.to_string(),
            kind,
            phase: Phase::Visible,
            dismiss_at: now + kind.dismiss_after(),
        }
    }

    #[must_use]
    pub fn dismiss_at(&self) -> Instant {
        self.dismiss_at
    }

    #[must_use]
    pub fn is_exiting(&self) -> bool {
        matches!(self.phase, Phase::Exiting { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NotificationSlot {
    #[default]
    Absent,
    Present(ActiveNotification),
}

/// What a `notify` call did to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Created,
    UpdatedInPlace,
    Replaced,
}

/// Timer transitions reported by [`NotificationSurface::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    StartedExit,
    Removed,
}

/// One `notify` call, kept for renderers and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub message: String,
    pub kind: NotificationKind,
    pub outcome: NotifyOutcome,
}

#[derive(Debug, Default)]
pub struct NotificationSurface {
    slot: NotificationSlot,
    log: Vec<NotificationRecord>,
}

impl NotificationSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, message: &str, kind: NotificationKind) -> NotifyOutcome {
        let outcome = match &self.slot {
            NotificationSlot::Present(active)
                if kind == NotificationKind::Loading && !active.is_exiting() =>
            {
                NotifyOutcome::UpdatedInPlace
            }
            // An exiting node counts as gone for a loading update.
            NotificationSlot::Present(_) if kind == NotificationKind::Loading => {
                NotifyOutcome::Created
            }
            NotificationSlot::Present(_) => NotifyOutcome::Replaced,
            NotificationSlot::Absent => NotifyOutcome::Created,
        };

        match (&mut self.slot, outcome) {
            (NotificationSlot::Present(active), NotifyOutcome::UpdatedInPlace) => {
                active.message = message.to_string();
            }
            _ => {
                self.slot =
                    NotificationSlot::Present(ActiveNotification::new(message, kind, Instant::now()));
            }
        }

        debug!("[{kind}] {message} ({outcome:?})");
        self.log.push(NotificationRecord {
            message: message.to_string(),
            kind,
            outcome,
        });
        outcome
    }

    /// Advance timers to now.
    pub fn tick(&mut self) -> Option<Transition> {
        let now = Instant::now();
        let NotificationSlot::Present(active) = &mut self.slot else {
            return None;
        };

        match active.phase {
            Phase::Visible if now >= active.dismiss_at => {
                active.phase = Phase::Exiting {
                    remove_at: now + EXIT_TRANSITION,
                };
                Some(Transition::StartedExit)
            }
            Phase::Exiting { remove_at } if now >= remove_at => {
                self.slot = NotificationSlot::Absent;
                Some(Transition::Removed)
            }
            _ => None,
        }
    }

    /// When [`Self::tick`] next has something to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.slot {
            NotificationSlot::Absent => None,
            NotificationSlot::Present(active) => Some(match active.phase {
                Phase::Visible => active.dismiss_at,
                Phase::Exiting { remove_at } => remove_at,
            }),
        }
    }

    #[must_use]
    pub fn slot(&self) -> &NotificationSlot {
        &self.slot
    }

    #[must_use]
    pub fn current(&self) -> Option<&ActiveNotification> {
        match &self.slot {
            NotificationSlot::Present(active) => Some(active),
            NotificationSlot::Absent => None,
        }
    }

    /// Every notify call so far.
    #[must_use]
    pub fn log(&self) -> &[NotificationRecord] {
        &self.log
    }

    pub fn drain_log(&mut self) -> Vec<NotificationRecord> {
        std::mem::take(&mut self.log)
    }
}
