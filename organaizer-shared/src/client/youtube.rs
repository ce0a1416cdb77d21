// SPDX-License-Identifier: GPL-3.0-only
use futures_util::StreamExt;
use log::{debug, info, warn};
use reqwest::Method;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{ApiClient, ApiError};

pub const DEFAULT_VIDEO_FILE_NAME: &str = "video.mp4";

const ACCESS_RESTRICTED_MESSAGE: &str = "YouTube download failed due to access restrictions. YouTube has implemented measures to prevent automated downloads. This is a common limitation.";
const UNAVAILABLE_MESSAGE: &str = "YouTube download failed. The video may be unavailable or YouTube has changed their API. Try a different video.";

/// User-facing text for a failed YouTube download.
#[must_use]
pub fn youtube_error_message(error: &ApiError) -> String {
    match error.status() {
        Some(403) => ACCESS_RESTRICTED_MESSAGE.to_string(),
        Some(400) => UNAVAILABLE_MESSAGE.to_string(),
        _ => error.to_string(),
    }
}

impl ApiClient {
    /// `POST /api/youtube/download`, streaming the video into `destination`.
    ///
    /// The body goes to a hidden temp file beside `destination` and is renamed
    /// into place only once the stream completes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on a non-2xx response (see
    /// [`youtube_error_message`]), or [`ApiError::Io`] if the file cannot be written.
    pub async fn download_youtube(
        &self,
        video_url: &str,
        destination: &Path,
    ) -> Result<PathBuf, ApiError> {
        let response = self
            .request(Method::POST, "/api/youtube/download")
            .json(&serde_json::json!({ "url": video_url }))
            .send()
            .await?;
        let response = Self::check(response).await?;

        let dir = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| ApiError::Io { path, source }
        };
        fs::create_dir_all(dir).await.map_err(io_err(dir))?;

        let temp_path = dir.join(format!(".tmp-{}", uuid::Uuid::new_v4()));
        debug!("Streaming video into {}", temp_path.display());

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(io_err(&temp_path))?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    drop(file);
                    let _ = fs::remove_file(&temp_path).await;
                    warn!("Download interrupted, removed {}", temp_path.display());
                    return Err(e.into());
                }
            };
            if let Err(source) = file.write_all(&chunk).await {
                drop(file);
                let _ = fs::remove_file(&temp_path).await;
                return Err(ApiError::Io {
                    path: temp_path,
                    source,
                });
            }
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(io_err(&temp_path))?;
        drop(file);

        if written == 0 {
            let _ = fs::remove_file(&temp_path).await;
            return Err(ApiError::EmptyResponse { what: "video" });
        }

        fs::rename(&temp_path, destination)
            .await
            .map_err(io_err(destination))?;
        info!("Saved {written} bytes to {}", destination.display());
        Ok(destination.to_path_buf())
    }
}
