// SPDX-License-Identifier: GPL-3.0-only
//! Action dispatcher.
//!
//! Runs one [`ActionId`] against a [`Page`]: reads the selection, calls the
//! backend through the injected [`RemoteApi`], then inserts, copies, plays or
//! displays the result. Every failure ends in a notification and an `Err`,
//! never a panic.

use log::{error, info, warn};
use std::sync::Arc;

use crate::capabilities::{AudioPlayer, Clipboard, Downloader, PlatformError, RemoteApi, SpeechRecognition};
use crate::client::ApiError;
use crate::config::SettingsStore;
use crate::models::action::ActionId;
use crate::models::image::ImageSource;
use crate::models::notification::NotificationKind;
use crate::models::settings::Settings;
use crate::page::{MutationError, Page, TargetLocator};
use crate::ui::{ImagePlacement, ModalAction, ModalTarget, UiState};
use crate::utils::text::remove_empty_lines;

mod dictation;

pub use dictation::{TEXT_INSERTED_MESSAGE, dictation_error_message};

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

pub const EMPTY_SELECTION_MESSAGE: &str = "Please select some text first";
pub const IMAGE_COPIED_MESSAGE: &str = "Image copied to clipboard!";
pub const IMAGE_COPY_FAILED_MESSAGE: &str = "Failed to copy image";

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Please select some text first")]
    EmptySelection,

    #[error("{}: {source}", failure_prefix(.action))]
    Remote {
        action: ActionId,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Recognition error code reported by the engine.
    #[error("{}", dictation_error_message(.0))]
    Dictation(String),

    #[error(transparent)]
    NoTarget(#[from] MutationError),
}

impl DispatchError {
    /// Exact text shown in the error notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

fn failure_prefix(action: &ActionId) -> &'static str {
    match action {
        ActionId::SpeakSelection => "Failed to generate speech",
        ActionId::SummarizeSelection => "Failed to generate summary",
        ActionId::TranslateSelection => "Failed to translate",
        ActionId::ImageFromSelection => "Failed to generate image",
        ActionId::StartDictation => "Failed to start dictation",
        ActionId::RemoveEmptyLines => "Failed to remove empty lines",
    }
}

fn loading_message(action: ActionId) -> &'static str {
    match action {
        ActionId::SpeakSelection => "🔊 Generating speech...",
        ActionId::SummarizeSelection => "📝 Generating summary...",
        ActionId::TranslateSelection => "🌐 Translating...",
        ActionId::ImageFromSelection => "🖼️ Generating image... This may take a moment.",
        ActionId::StartDictation => "🎤 Listening... Speak now!",
        ActionId::RemoveEmptyLines => "🧹 Removing empty lines...",
    }
}

/// What a successful dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Played { audio_url: String },
    Summarized { copied: bool, inserted: bool },
    Translated { copied: bool, replaced: bool },
    Image { placement: ImagePlacement, copied: bool },
    Dictated { transcript: String },
    LinesRemoved { removed: usize },
}

/// Injected platform capabilities. `speech` is `None` where the platform
/// has no recogniser.
#[derive(Clone)]
pub struct Capabilities {
    pub remote: Arc<dyn RemoteApi>,
    pub clipboard: Arc<dyn Clipboard>,
    pub audio: Arc<dyn AudioPlayer>,
    pub speech: Option<Arc<dyn SpeechRecognition>>,
    pub downloader: Arc<dyn Downloader>,
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("speech", &self.speech.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Dispatcher {
    ui: UiState,
    settings: SettingsStore,
    capabilities: Capabilities,
}

impl Dispatcher {
    #[must_use]
    pub fn new(settings: SettingsStore, capabilities: Capabilities) -> Self {
        Self {
            ui: UiState::new(),
            settings,
            capabilities,
        }
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Run `action` against `page`.
    ///
    /// The cursor target and the selection are captured before the first
    /// suspension point, so later focus changes do not redirect the result.
    ///
    /// # Errors
    ///
    /// Returns the failure that was shown to the user.
    pub async fn dispatch(
        &mut self,
        page: &mut Page,
        action: ActionId,
    ) -> Result<Outcome, DispatchError> {
        info!("Dispatching {action}");
        let locator = TargetLocator::locate(page);
        let text = page.selected_text();
        if action.requires_selection() && text.is_empty() {
            return Err(self.fail(action, DispatchError::EmptySelection));
        }

        match action {
            ActionId::StartDictation => self.dictate(page, locator).await,
            ActionId::RemoveEmptyLines => {
                let raw = page.raw_selected_text();
                self.remove_empty_lines(page, locator, &raw)
            }
            ActionId::SpeakSelection => {
                let settings = self.begin(action);
                self.speak(&settings, &text).await
            }
            ActionId::SummarizeSelection => {
                let settings = self.begin(action);
                self.summarize(page, locator, &settings, &text).await
            }
            ActionId::TranslateSelection => {
                let settings = self.begin(action);
                self.translate(page, locator, &settings, &text).await
            }
            ActionId::ImageFromSelection => {
                let settings = self.begin(action);
                self.image(page, locator, &settings, &text).await
            }
        }
    }

    /// Show the loading notification and read the current settings.
    fn begin(&mut self, action: ActionId) -> Settings {
        self.ui.notify(loading_message(action), NotificationKind::Loading);
        self.settings.load()
    }

    async fn speak(&mut self, settings: &Settings, text: &str) -> Result<Outcome, DispatchError> {
        let action = ActionId::SpeakSelection;
        let audio_url = match self.capabilities.remote.generate_speech(settings, text).await {
            Ok(url) => url,
            Err(e) => return Err(self.fail(action, DispatchError::Remote { action, source: e })),
        };

        if let Err(e) = self.capabilities.audio.play(&audio_url).await {
            return Err(self.fail(action, e.into()));
        }

        self.ui.notify("🔊 Playing audio...", NotificationKind::Success);
        Ok(Outcome::Played { audio_url })
    }

    async fn summarize(
        &mut self,
        page: &mut Page,
        locator: TargetLocator,
        settings: &Settings,
        text: &str,
    ) -> Result<Outcome, DispatchError> {
        let action = ActionId::SummarizeSelection;
        let summary = match self.capabilities.remote.summarize(settings, text).await {
            Ok(summary) => summary,
            Err(e) => return Err(self.fail(action, DispatchError::Remote { action, source: e })),
        };

        let copied = self.copy_text(&summary).await;
        let block = format!("\n\n📝 Summary:\n{summary}\n\n");
        let inserted = self.ui.insert_text_at_cursor(page, locator, &block).is_ok();

        match (copied, inserted) {
            (true, true) => self.ui.notify(
                "📝 Summary inserted and copied to clipboard!",
                NotificationKind::Success,
            ),
            (true, false) => self.ui.notify(
                "📝 Summary generated and copied to clipboard!",
                NotificationKind::Success,
            ),
            (false, true) => self.ui.notify("📝 Summary inserted!", NotificationKind::Success),
            (false, false) => self.ui.notify(
                "📝 Summary generated, but it could not be copied or inserted",
                NotificationKind::Warning,
            ),
        };
        Ok(Outcome::Summarized { copied, inserted })
    }

    async fn translate(
        &mut self,
        page: &mut Page,
        locator: TargetLocator,
        settings: &Settings,
        text: &str,
    ) -> Result<Outcome, DispatchError> {
        let action = ActionId::TranslateSelection;
        let translation = match self.capabilities.remote.translate(settings, text).await {
            Ok(translation) => translation,
            Err(e) => return Err(self.fail(action, DispatchError::Remote { action, source: e })),
        };

        let copied = self.copy_text(&translation).await;
        let replaced = self
            .ui
            .replace_selected_text(page, locator, &translation)
            .is_ok();

        match (copied, replaced) {
            (true, true) => self.ui.notify(
                "🌐 Translation complete and copied to clipboard!",
                NotificationKind::Success,
            ),
            (false, true) => self.ui.notify("🌐 Translation complete!", NotificationKind::Success),
            (true, false) => self.ui.notify(
                "🌐 Translation copied to clipboard!",
                NotificationKind::Success,
            ),
            (false, false) => self.ui.notify(
                "🌐 Translation complete, but it could not be copied or inserted",
                NotificationKind::Warning,
            ),
        };
        Ok(Outcome::Translated { copied, replaced })
    }

    async fn image(
        &mut self,
        page: &mut Page,
        locator: TargetLocator,
        settings: &Settings,
        prompt: &str,
    ) -> Result<Outcome, DispatchError> {
        let action = ActionId::ImageFromSelection;
        let images = match self.capabilities.remote.generate_image(settings, prompt).await {
            Ok(images) => images,
            Err(e) => return Err(self.fail(action, DispatchError::Remote { action, source: e })),
        };
        let Some(first) = images.first() else {
            let empty = ApiError::EmptyResponse { what: "images" };
            return Err(self.fail(action, DispatchError::Remote { action, source: empty }));
        };

        let source = first.source();
        let copied = self.copy_image(settings, &source).await;
        let placement = self.ui.insert_image_at_cursor(page, locator, &source);

        if copied {
            self.ui.notify(
                "🖼️ Image generated and copied to clipboard!",
                NotificationKind::Success,
            );
        }
        Ok(Outcome::Image { placement, copied })
    }

    fn remove_empty_lines(
        &mut self,
        page: &mut Page,
        locator: TargetLocator,
        text: &str,
    ) -> Result<Outcome, DispatchError> {
        let (cleaned, removed) = remove_empty_lines(text);
        if let Err(e) = self.ui.replace_selected_text(page, locator, &cleaned) {
            error!("{} failed: {e}", ActionId::RemoveEmptyLines);
            return Err(e.into());
        }

        let plural = if removed == 1 { "" } else { "s" };
        self.ui.notify(
            &format!("🧹 Removed {removed} empty line{plural}"),
            NotificationKind::Success,
        );
        Ok(Outcome::LinesRemoved { removed })
    }

    /// Handle a click on the image modal: download, copy or dismiss.
    pub async fn modal_click(&mut self, page: &mut Page, target: ModalTarget) -> ModalAction {
        let action = self.ui.modal.click(page, target);
        match &action {
            ModalAction::Download(request) => {
                if let Err(e) = self.capabilities.downloader.download(request).await {
                    error!("Image download failed: {e}");
                    self.ui.notify(&e.to_string(), NotificationKind::Error);
                }
            }
            ModalAction::Copy(source) => {
                let settings = self.settings.load();
                if self.copy_image(&settings, source).await {
                    self.ui.notify(IMAGE_COPIED_MESSAGE, NotificationKind::Success);
                } else {
                    self.ui.notify(IMAGE_COPY_FAILED_MESSAGE, NotificationKind::Error);
                }
            }
            ModalAction::Closed | ModalAction::Ignored => {}
        }
        action
    }

    /// Deliver a keydown; Escape closes the modal.
    pub fn keydown(&mut self, page: &mut Page, key: &str) -> bool {
        self.ui.keydown(page, key)
    }

    async fn copy_text(&self, text: &str) -> bool {
        match self.capabilities.clipboard.write_text(text).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Clipboard write failed: {e}");
                false
            }
        }
    }

    async fn copy_image(&self, settings: &Settings, source: &ImageSource) -> bool {
        let image = match self.capabilities.remote.fetch_image(settings, source).await {
            Ok(image) => image,
            Err(e) => {
                warn!("Could not fetch image {source}: {e}");
                return false;
            }
        };
        match self.capabilities.clipboard.write_image(&image).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Clipboard image write failed: {e}");
                false
            }
        }
    }

    /// Log and notify a failure, handing it back for the caller to return.
    fn fail(&mut self, action: ActionId, error: DispatchError) -> DispatchError {
        error!("{action} failed: {error}");
        self.ui.notify(&error.user_message(), NotificationKind::Error);
        error
    }
}
