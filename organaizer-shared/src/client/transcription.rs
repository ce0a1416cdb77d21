// SPDX-License-Identifier: GPL-3.0-only
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use std::path::Path;

use super::{ApiClient, ApiError};
use crate::models::api::Transcription;

/// Media handed to a transcription endpoint: an uploaded file or a URL the
/// backend fetches itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    File { file_name: String, data: Vec<u8> },
    Url(String),
}

impl MediaSource {
    /// Read a local file for upload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if the file cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let data = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::File { file_name, data })
    }

    fn into_form(self, url_field: &'static str) -> Form {
        match self {
            Self::File { file_name, data } => {
                Form::new().part("file", Part::bytes(data).file_name(file_name))
            }
            Self::Url(url) => Form::new().text(url_field, url),
        }
    }
}

impl ApiClient {
    /// `POST /api/stt/transcribe` with `file` or `audio_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyResponse`] when no transcript came back.
    pub async fn transcribe_audio(&self, source: MediaSource) -> Result<Transcription, ApiError> {
        self.transcribe("/api/stt/transcribe", source.into_form("audio_url"))
            .await
    }

    /// `POST /api/video-text/transcribe` with `file` or `video_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyResponse`] when no transcript came back.
    pub async fn transcribe_video(&self, source: MediaSource) -> Result<Transcription, ApiError> {
        self.transcribe("/api/video-text/transcribe", source.into_form("video_url"))
            .await
    }

    async fn transcribe(&self, path: &str, form: Form) -> Result<Transcription, ApiError> {
        let response = self
            .request(Method::POST, path)
            .multipart(form)
            .send()
            .await?;

        let transcription: Transcription = Self::json(response).await?;
        if transcription.text.trim().is_empty() && transcription.segments.is_empty() {
            return Err(ApiError::EmptyResponse { what: "text" });
        }
        Ok(transcription)
    }
}
