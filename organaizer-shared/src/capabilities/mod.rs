// SPDX-License-Identifier: GPL-3.0-only
//! Platform capabilities the dispatcher is handed instead of reaching for
//! globals: the backend, the clipboard, audio playback, speech recognition
//! and file downloads.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::client::ApiError;
use crate::models::image::{ImageBytes, ImageDescriptor, ImageSource};
use crate::models::settings::Settings;
use crate::ui::DownloadRequest;

mod http;
pub mod recognition;

pub use http::HttpRemote;
pub use recognition::{RecognitionAlternative, RecognitionConfig, RecognitionEvent, RecognitionResult};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("Speech recognition not supported in this browser. Try Chrome or Edge.")]
    SpeechUnsupported,

    #[error("Failed to start dictation: {0}")]
    RecognitionStart(String),

    #[error("Clipboard write denied: {0}")]
    ClipboardDenied(String),

    #[error("Failed to play audio: {0}")]
    Playback(String),

    #[error("Download failed: {0}")]
    Download(String),
}

/// The backend calls the dispatcher needs. Settings are passed per call.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Generate speech and return a playable audio URL.
    async fn generate_speech(&self, settings: &Settings, text: &str) -> Result<String, ApiError>;

    async fn summarize(&self, settings: &Settings, text: &str) -> Result<String, ApiError>;

    async fn translate(&self, settings: &Settings, text: &str) -> Result<String, ApiError>;

    async fn generate_image(
        &self,
        settings: &Settings,
        prompt: &str,
    ) -> Result<Vec<ImageDescriptor>, ApiError>;

    /// Resolve the bytes behind an image source.
    async fn fetch_image(
        &self,
        settings: &Settings,
        source: &ImageSource,
    ) -> Result<ImageBytes, ApiError>;
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError>;

    /// Write one clipboard item holding `image`.
    async fn write_image(&self, image: &ImageBytes) -> Result<(), PlatformError>;
}

#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Start playback. `Ok` means playback started.
    async fn play(&self, url: &str) -> Result<(), PlatformError>;
}

#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, request: &DownloadRequest) -> Result<(), PlatformError>;
}

/// A speech-recognition engine. Absent on platforms without one.
pub trait SpeechRecognition: Send + Sync {
    /// Start a session. Events arrive on the returned channel and the last
    /// one is always [`RecognitionEvent::End`].
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::RecognitionStart`] if the session cannot start.
    fn start(
        &self,
        config: RecognitionConfig,
    ) -> Result<mpsc::Receiver<RecognitionEvent>, PlatformError>;
}
