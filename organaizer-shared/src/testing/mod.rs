// SPDX-License-Identifier: GPL-3.0-only
//! In-memory capability fakes for dispatcher tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

use crate::capabilities::{
    AudioPlayer, Clipboard, Downloader, PlatformError, RecognitionConfig, RecognitionEvent,
    RemoteApi, SpeechRecognition,
};
use crate::client::ApiError;
use crate::models::image::{ImageBytes, ImageDescriptor, ImageSource};
use crate::models::settings::Settings;
use crate::ui::DownloadRequest;

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Scripted backend. Each call pops the next queued reply for its operation
/// and counts itself; an empty queue yields `EmptyResponse`.
#[derive(Debug, Default)]
pub struct FakeRemote {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    speech: Mutex<VecDeque<Result<String, ApiError>>>,
    completions: Mutex<VecDeque<Result<String, ApiError>>>,
    images: Mutex<VecDeque<Result<Vec<ImageDescriptor>, ApiError>>>,
}

impl FakeRemote {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_speech(self, reply: Result<String, ApiError>) -> Self {
        lock(&self.speech).push_back(reply);
        self
    }

    #[must_use]
    pub fn with_completion(self, reply: Result<String, ApiError>) -> Self {
        lock(&self.completions).push_back(reply);
        self
    }

    #[must_use]
    pub fn with_images(self, reply: Result<Vec<ImageDescriptor>, ApiError>) -> Self {
        lock(&self.images).push_back(reply);
        self
    }

    /// Number of backend calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text sent to the summary/translation/speech/image endpoints, in order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    fn record(&self, prompt: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.prompts).push(prompt.to_string());
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>, what: &'static str) -> Result<T, ApiError> {
        lock(queue)
            .pop_front()
            .unwrap_or(Err(ApiError::EmptyResponse { what }))
    }
}

#[async_trait]
impl RemoteApi for FakeRemote {
    async fn generate_speech(&self, _settings: &Settings, text: &str) -> Result<String, ApiError> {
        self.record(text);
        Self::next(&self.speech, "audio_url")
    }

    async fn summarize(&self, settings: &Settings, text: &str) -> Result<String, ApiError> {
        self.record(&settings.summary_prompt_for(text));
        Self::next(&self.completions, "response")
    }

    async fn translate(&self, settings: &Settings, text: &str) -> Result<String, ApiError> {
        self.record(&settings.translate_prompt_for(text));
        Self::next(&self.completions, "response")
    }

    async fn generate_image(
        &self,
        _settings: &Settings,
        prompt: &str,
    ) -> Result<Vec<ImageDescriptor>, ApiError> {
        self.record(prompt);
        Self::next(&self.images, "images")
    }

    async fn fetch_image(
        &self,
        _settings: &Settings,
        source: &ImageSource,
    ) -> Result<ImageBytes, ApiError> {
        match source.decode_inline() {
            Some(decoded) => Ok(decoded?),
            None => {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Ok(ImageBytes {
                    mime: "image/png".to_string(),
                    data: source.to_src().into_bytes(),
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardItem {
    Text(String),
    Image(ImageBytes),
}

/// Clipboard that records writes, or denies them all.
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    deny: bool,
    items: Mutex<Vec<ClipboardItem>>,
}

impl RecordingClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn items(&self) -> Vec<ClipboardItem> {
        lock(&self.items).clone()
    }

    fn write(&self, item: ClipboardItem) -> Result<(), PlatformError> {
        if self.deny {
            return Err(PlatformError::ClipboardDenied("Document is not focused".to_string()));
        }
        lock(&self.items).push(item);
        Ok(())
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        self.write(ClipboardItem::Text(text.to_string()))
    }

    async fn write_image(&self, image: &ImageBytes) -> Result<(), PlatformError> {
        self.write(ClipboardItem::Image(image.clone()))
    }
}

/// Audio player that records URLs, optionally failing.
#[derive(Debug, Default)]
pub struct FakeAudioPlayer {
    fail: bool,
    played: Mutex<Vec<String>>,
}

impl FakeAudioPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn played(&self) -> Vec<String> {
        lock(&self.played).clone()
    }
}

#[async_trait]
impl AudioPlayer for FakeAudioPlayer {
    async fn play(&self, url: &str) -> Result<(), PlatformError> {
        if self.fail {
            return Err(PlatformError::Playback("NotSupportedError".to_string()));
        }
        lock(&self.played).push(url.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingDownloader {
    requests: Mutex<Vec<DownloadRequest>>,
}

impl RecordingDownloader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<DownloadRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl Downloader for RecordingDownloader {
    async fn download(&self, request: &DownloadRequest) -> Result<(), PlatformError> {
        lock(&self.requests).push(request.clone());
        Ok(())
    }
}

/// Recogniser that replays a fixed event script, ending with
/// [`RecognitionEvent::End`] if the script does not.
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    script: Vec<RecognitionEvent>,
    configs: Mutex<Vec<RecognitionConfig>>,
}

impl ScriptedRecognizer {
    #[must_use]
    pub fn new(script: Vec<RecognitionEvent>) -> Self {
        Self {
            script,
            configs: Mutex::new(Vec::new()),
        }
    }

    /// Configs of every session started.
    #[must_use]
    pub fn configs(&self) -> Vec<RecognitionConfig> {
        lock(&self.configs).clone()
    }
}

impl SpeechRecognition for ScriptedRecognizer {
    fn start(
        &self,
        config: RecognitionConfig,
    ) -> Result<mpsc::Receiver<RecognitionEvent>, PlatformError> {
        lock(&self.configs).push(config);

        let mut events = self.script.clone();
        if events.last() != Some(&RecognitionEvent::End) {
            events.push(RecognitionEvent::End);
        }

        let (tx, rx) = mpsc::channel(events.len());
        for event in events {
            tx.try_send(event)
                .map_err(|e| PlatformError::RecognitionStart(e.to_string()))?;
        }
        Ok(rx)
    }
}
