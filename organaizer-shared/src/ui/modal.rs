// SPDX-License-Identifier: GPL-3.0-only
use crate::models::image::{DOWNLOAD_FILE_NAME, ImageSource};
use crate::page::{ListenerId, Page};

pub const ESCAPE_KEY: &str = "Escape";

/// Anchor download handed to a [`crate::capabilities::Downloader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub href: String,
    pub filename: String,
}

/// Parts of the overlay a user can click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    Backdrop,
    Image,
    Download,
    Copy,
    Close,
}

/// What a click asks the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    Closed,
    Download(DownloadRequest),
    Copy(ImageSource),
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageModal {
    source: ImageSource,
    escape_listener: ListenerId,
}

impl ImageModal {
    #[must_use]
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    #[must_use]
    pub fn src(&self) -> String {
        self.source.to_src()
    }

    #[must_use]
    pub fn download_request(&self) -> DownloadRequest {
        DownloadRequest {
            href: self.src(),
            filename: DOWNLOAD_FILE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Absent,
    Open(ImageModal),
}

impl ModalState {
    /// Show `source`, replacing any open modal.
    pub fn open(&mut self, page: &mut Page, source: ImageSource) {
        self.close(page);
        let escape_listener = page.add_keydown_listener(ESCAPE_KEY);
        *self = Self::Open(ImageModal {
            source,
            escape_listener,
        });
    }

    /// Remove the overlay and its Escape listener. Returns whether one was open.
    pub fn close(&mut self, page: &mut Page) -> bool {
        match std::mem::take(self) {
            Self::Open(modal) => {
                page.remove_keydown_listener(modal.escape_listener);
                true
            }
            Self::Absent => false,
        }
    }

    pub fn click(&mut self, page: &mut Page, target: ModalTarget) -> ModalAction {
        let Self::Open(modal) = self else {
            return ModalAction::Ignored;
        };

        match target {
            ModalTarget::Backdrop | ModalTarget::Close => {
                self.close(page);
                ModalAction::Closed
            }
            ModalTarget::Download => ModalAction::Download(modal.download_request()),
            ModalTarget::Copy => ModalAction::Copy(modal.source.clone()),
            ModalTarget::Image => ModalAction::Ignored,
        }
    }

    /// Route a keydown through the page. Escape closes the modal.
    pub fn keydown(&mut self, page: &mut Page, key: &str) -> bool {
        let Self::Open(modal) = self else {
            return false;
        };
        if page.keydown_targets(key).contains(&modal.escape_listener) {
            return self.close(page);
        }
        false
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    #[must_use]
    pub fn current(&self) -> Option<&ImageModal> {
        match self {
            Self::Open(modal) => Some(modal),
            Self::Absent => None,
        }
    }
}
