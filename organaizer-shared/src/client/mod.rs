// SPDX-License-Identifier: GPL-3.0-only
//! HTTP adapters for the OrganAIzer backend
//!
//! Each operation is a single request/response pair with no retry. The base
//! URL and API key come from [`Settings`]; the key travels in the
//! `X-API-Key` header and is omitted when blank.

use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use crate::models::settings::Settings;

mod health;
mod image;
mod llm;
mod mail;
mod speech;
mod transcription;
mod youtube;

#[cfg(test)]
mod fake_server;
#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

pub use image::ReferenceImage;
pub use transcription::MediaSource;
pub use youtube::{DEFAULT_VIDEO_FILE_NAME, youtube_error_message};

pub const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response, body text kept verbatim
    #[error("Server error: {status} - {body}")]
    Http { status: u16, body: String },

    /// 2xx response without the field the caller needs
    #[error("Empty response from server")]
    EmptyResponse { what: &'static str },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid image data: {0}")]
    InvalidImage(#[from] base64::DecodeError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status of a non-2xx response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Client for one backend base URL and API key.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    api_key: Option<String>,
}

impl ApiClient {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self::with_http(reqwest::Client::new(), settings)
    }

    /// Reuse an existing connection pool.
    #[must_use]
    pub fn with_http(http: reqwest::Client, settings: &Settings) -> Self {
        Self {
            http,
            base: settings.api_url.trim().trim_end_matches('/').to_string(),
            api_key: settings.api_key().map(ToString::to_string),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// `path` must start with `/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Absolute URL for a backend-relative resource such as a generated audio file.
    #[must_use]
    pub fn resolve(&self, url_or_path: &str) -> String {
        if url_or_path.starts_with("http://") || url_or_path.starts_with("https://") {
            url_or_path.to_string()
        } else if url_or_path.starts_with('/') {
            self.endpoint(url_or_path)
        } else {
            self.endpoint(&format!("/{url_or_path}"))
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{method} {path}");
        self.authorize(self.http.request(method, self.endpoint(path)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    /// Turn a non-2xx response into [`ApiError::Http`].
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        warn!("{path} returned {status}: {body}");
        Err(ApiError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
