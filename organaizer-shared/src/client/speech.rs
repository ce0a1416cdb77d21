// SPDX-License-Identifier: GPL-3.0-only
use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::api::{SpeechRequest, SpeechResponse};

impl ApiClient {
    /// `POST /api/tts/generate`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on a non-2xx response, or a transport/decode error.
    pub async fn generate_speech(&self, text: &str) -> Result<SpeechResponse, ApiError> {
        let response = self
            .request(Method::POST, "/api/tts/generate")
            .json(&SpeechRequest { text_md: text })
            .send()
            .await?;
        Self::json(response).await
    }

    /// Absolute, playable URL of the generated audio.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyResponse`] when the backend produced no audio URL.
    pub fn audio_url(&self, speech: &SpeechResponse) -> Result<String, ApiError> {
        match speech.audio_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(self.resolve(url)),
            _ => Err(ApiError::EmptyResponse { what: "audio_url" }),
        }
    }

    /// Fetch the bytes behind an audio URL returned by [`Self::generate_speech`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on a non-2xx response, or a transport error.
    pub async fn download_audio(&self, audio_url: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.resolve(audio_url);
        log::debug!("GET {url}");
        let response = self.authorize(self.http.get(&url)).send().await?;
        let response = Self::check(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
