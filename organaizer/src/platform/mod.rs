// SPDX-License-Identifier: GPL-3.0-only
//! Terminal implementations of the page-interaction capabilities.
//!
//! There is no system clipboard or microphone here: clipboard writes go to
//! a file when one is configured, audio and downloads are handed to the
//! desktop, and speech recognition is absent.

use async_trait::async_trait;
use log::{debug, info};
use organaizer_shared::capabilities::{AudioPlayer, Clipboard, Downloader, PlatformError};
use organaizer_shared::models::image::{ImageBytes, ImageSource};
use organaizer_shared::ui::DownloadRequest;
use organaizer_shared::ApiClient;
use std::path::PathBuf;

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;

/// Clipboard backed by a file. Each write replaces the file content.
#[derive(Debug, Clone, Default)]
pub struct FileClipboard {
    path: Option<PathBuf>,
}

impl FileClipboard {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    async fn write(&self, data: &[u8]) -> Result<(), PlatformError> {
        let Some(path) = &self.path else {
            return Err(PlatformError::ClipboardDenied(
                "no clipboard file configured".to_string(),
            ));
        };
        tokio::fs::write(path, data)
            .await
            .map_err(|e| PlatformError::ClipboardDenied(format!("{}: {e}", path.display())))?;
        debug!("Clipboard written to {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl Clipboard for FileClipboard {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        self.write(text.as_bytes()).await
    }

    async fn write_image(&self, image: &ImageBytes) -> Result<(), PlatformError> {
        self.write(&image.data).await
    }
}

/// Hands audio URLs to the desktop's default player.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopAudioPlayer;

#[async_trait]
impl AudioPlayer for DesktopAudioPlayer {
    async fn play(&self, url: &str) -> Result<(), PlatformError> {
        info!("Opening audio {url}");
        open::that_detached(url).map_err(|e| PlatformError::Playback(e.to_string()))
    }
}

/// Saves modal downloads into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
    client: ApiClient,
}

impl DirectoryDownloader {
    #[must_use]
    pub fn new(dir: PathBuf, client: ApiClient) -> Self {
        Self { dir, client }
    }

    #[must_use]
    pub fn target(&self, request: &DownloadRequest) -> PathBuf {
        self.dir.join(&request.filename)
    }
}

#[async_trait]
impl Downloader for DirectoryDownloader {
    async fn download(&self, request: &DownloadRequest) -> Result<(), PlatformError> {
        let source = ImageSource::classify(&request.href);
        let image = self
            .client
            .fetch_image(&source)
            .await
            .map_err(|e| PlatformError::Download(e.to_string()))?;

        let target = self.target(request);
        tokio::fs::write(&target, &image.data)
            .await
            .map_err(|e| PlatformError::Download(format!("{}: {e}", target.display())))?;
        info!("Saved {} ({} bytes)", target.display(), image.data.len());
        Ok(())
    }
}
