// SPDX-License-Identifier: GPL-3.0-only
//! Presentation state owned by the page-interaction layer.

use log::warn;

use crate::models::image::ImageSource;
use crate::models::notification::NotificationKind;
use crate::page::{self, MutationError, Page, TargetLocator};

pub mod modal;
pub mod notification;

pub use modal::{DownloadRequest, ImageModal, ModalAction, ModalState, ModalTarget};
pub use notification::{
    ActiveNotification, NotificationRecord, NotificationSlot, NotificationSurface, NotifyOutcome,
    Phase, Transition,
};

pub const IMAGE_INSERTED_MESSAGE: &str = "Image inserted!";
pub const IMAGE_MODAL_MESSAGE: &str = "Image generated! Click to download or copy.";

/// Where an image ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePlacement {
    Inline,
    Modal,
}

/// The notification slot and the modal slot, the only shared UI state.
#[derive(Debug, Default)]
pub struct UiState {
    pub notifications: NotificationSurface,
    pub modal: ModalState,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, message: &str, kind: NotificationKind) -> NotifyOutcome {
        self.notifications.notify(message, kind)
    }

    /// Insert at the captured cursor, notifying when there is nowhere to insert.
    pub fn insert_text_at_cursor(
        &mut self,
        page: &mut Page,
        locator: TargetLocator,
        text: &str,
    ) -> Result<(), MutationError> {
        let result = page::insert_text_at_cursor(page, locator, text);
        self.report(result)
    }

    /// Replace the captured selection, notifying when there is nothing to replace.
    pub fn replace_selected_text(
        &mut self,
        page: &mut Page,
        locator: TargetLocator,
        text: &str,
    ) -> Result<(), MutationError> {
        let result = page::replace_selected_text(page, locator, text);
        self.report(result)
    }

    /// Insert an image inline in a rich-text region, or show it in the modal.
    pub fn insert_image_at_cursor(
        &mut self,
        page: &mut Page,
        locator: TargetLocator,
        image: &ImageSource,
    ) -> ImagePlacement {
        match page::insert_image_at_cursor(page, locator, image) {
            Ok(()) => {
                self.notify(IMAGE_INSERTED_MESSAGE, NotificationKind::Success);
                ImagePlacement::Inline
            }
            Err(_) => {
                self.show_image_modal(page, image.clone());
                ImagePlacement::Modal
            }
        }
    }

    pub fn show_image_modal(&mut self, page: &mut Page, image: ImageSource) {
        self.modal.open(page, image);
        self.notify(IMAGE_MODAL_MESSAGE, NotificationKind::Success);
    }

    /// Deliver a keydown to the page. Returns whether it closed the modal.
    pub fn keydown(&mut self, page: &mut Page, key: &str) -> bool {
        self.modal.keydown(page, key)
    }

    fn report(&mut self, result: Result<(), MutationError>) -> Result<(), MutationError> {
        if let Err(e) = &result {
            warn!("Mutation skipped: {e}");
            self.notify(
                &MutationError::NoTarget.to_string(),
                NotificationKind::Error,
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Element, PlainField};

    #[tokio::test]
    async fn test_raw_base64_without_focus_opens_modal() {
        let mut ui = UiState::new();
        let mut page = Page::new();

        let locator = TargetLocator::locate(&page);
        let placement =
            ui.insert_image_at_cursor(&mut page, locator, &ImageSource::classify("iVBORw0KGgo="));

        assert_eq!(placement, ImagePlacement::Modal);
        assert_eq!(
            ui.modal.current().unwrap().src(),
            "data:image/png;base64,iVBORw0KGgo="
        );
        assert_eq!(
            ui.notifications.current().unwrap().message,
            IMAGE_MODAL_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_missing_target_notifies_once_and_mutates_nothing() {
        let mut ui = UiState::new();
        let mut page = Page::new();
        let id = page.add(Element::PlainField(PlainField::textarea("abc")));

        let locator = TargetLocator::locate(&page);
        assert!(ui.insert_text_at_cursor(&mut page, locator, "x").is_err());

        assert_eq!(page.plain_field(id).unwrap().value, "abc");
        let log = ui.notifications.log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].message, "No active text field found");
        assert_eq!(log[0].kind, NotificationKind::Error);
    }
}
