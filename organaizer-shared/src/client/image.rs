// SPDX-License-Identifier: GPL-3.0-only
use log::debug;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use std::path::Path;

use super::{ApiClient, ApiError};
use crate::models::api::{AspectRatio, ImageGenerationResponse};
use crate::models::image::{DEFAULT_IMAGE_MIME, ImageBytes, ImageDescriptor, ImageSource};

/// A reference image uploaded alongside the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl ReferenceImage {
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
            .map_or_else(|| "reference.png".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self { file_name, data })
    }
}

impl ApiClient {
    /// `POST /api/text-image/generate`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyResponse`] when the `images` list is missing or empty.
    pub async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        references: Vec<ReferenceImage>,
    ) -> Result<Vec<ImageDescriptor>, ApiError> {
        let mut form = Form::new()
            .text("prompt", prompt.to_string())
            .text("aspect_ratio", aspect_ratio.to_string());
        for reference in references {
            form = form.part(
                "images",
                Part::bytes(reference.data).file_name(reference.file_name),
            );
        }

        let response = self
            .request(Method::POST, "/api/text-image/generate")
            .multipart(form)
            .send()
            .await?;

        let generated: ImageGenerationResponse = Self::json(response).await?;
        let images: Vec<_> = generated
            .images
            .into_iter()
            .filter(|image| !image.url.trim().is_empty())
            .collect();
        if images.is_empty() {
            return Err(ApiError::EmptyResponse { what: "images" });
        }
        Ok(images)
    }

    /// Bytes of an image, decoding inline data or fetching a remote URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidImage`] for malformed inline data, or
    /// [`ApiError::Http`] when the remote fetch fails.
    pub async fn fetch_image(&self, source: &ImageSource) -> Result<ImageBytes, ApiError> {
        if let Some(decoded) = source.decode_inline() {
            return Ok(decoded?);
        }

        let url = source.to_src();
        debug!("GET {url}");
        let response = Self::check(self.http.get(&url).send().await?).await?;
        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .filter(|value| value.starts_with("image/"))
            .unwrap_or(DEFAULT_IMAGE_MIME)
            .to_string();
        let data = response.bytes().await?.to_vec();
        Ok(ImageBytes { mime, data })
    }
}
