// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;

use super::RemoteApi;
use crate::client::{ApiClient, ApiError};
use crate::models::api::AspectRatio;
use crate::models::image::{ImageBytes, ImageDescriptor, ImageSource};
use crate::models::settings::Settings;

/// [`RemoteApi`] over HTTP. One connection pool, a fresh [`ApiClient`] per
/// call so every call sees the current settings.
#[derive(Debug, Clone, Default)]
pub struct HttpRemote {
    http: reqwest::Client,
}

impl HttpRemote {
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn client(&self, settings: &Settings) -> ApiClient {
        ApiClient::with_http(self.http.clone(), settings)
    }
}

#[async_trait]
impl RemoteApi for HttpRemote {
    async fn generate_speech(&self, settings: &Settings, text: &str) -> Result<String, ApiError> {
        let client = self.client(settings);
        let speech = client.generate_speech(text).await?;
        client.audio_url(&speech)
    }

    async fn summarize(&self, settings: &Settings, text: &str) -> Result<String, ApiError> {
        self.client(settings).summarize(settings, text).await
    }

    async fn translate(&self, settings: &Settings, text: &str) -> Result<String, ApiError> {
        self.client(settings).translate(settings, text).await
    }

    async fn generate_image(
        &self,
        settings: &Settings,
        prompt: &str,
    ) -> Result<Vec<ImageDescriptor>, ApiError> {
        self.client(settings)
            .generate_image(prompt, AspectRatio::default(), Vec::new())
            .await
    }

    async fn fetch_image(
        &self,
        settings: &Settings,
        source: &ImageSource,
    ) -> Result<ImageBytes, ApiError> {
        self.client(settings).fetch_image(source).await
    }
}
