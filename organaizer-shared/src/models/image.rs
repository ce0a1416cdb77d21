// SPDX-License-Identifier: GPL-3.0-only
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// MIME type assumed for bare base64 payloads.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// File name offered when the user downloads a generated image.
pub const DOWNLOAD_FILE_NAME: &str = "generated-image.png";

/// One entry of the image-generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub url: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ImageDescriptor {
    #[must_use]
    pub fn source(&self) -> ImageSource {
        ImageSource::classify(&self.url)
    }
}

/// Where an image comes from, decided once from its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// `http://` or `https://` URL
    Remote(String),
    /// A complete `data:` URI, kept exactly as received
    DataUri { uri: String, mime: String },
    /// Bare base64, assumed to be PNG
    RawBase64(String),
}

impl ImageSource {
    #[must_use]
    pub fn classify(data: &str) -> Self {
        let data = data.trim();
        if data.starts_with("http") {
            return Self::Remote(data.to_string());
        }
        if let Some(rest) = data.strip_prefix("data:") {
            let meta = rest.split_once(',').map_or(rest, |(meta, _)| meta);
            let mime = meta
                .split(';')
                .next()
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_IMAGE_MIME);
            return Self::DataUri {
                uri: data.to_string(),
                mime: mime.to_string(),
            };
        }
        Self::RawBase64(data.to_string())
    }

    /// Displayable `src` attribute value.
    #[must_use]
    pub fn to_src(&self) -> String {
        match self {
            Self::Remote(url) => url.clone(),
            Self::DataUri { uri, .. } => uri.clone(),
            Self::RawBase64(payload) => format!("data:{DEFAULT_IMAGE_MIME};base64,{payload}"),
        }
    }

    /// Decode inline image data. Remote images return `None`; they must be fetched.
    ///
    /// Data URIs are base64-decoded only when their metadata ends in
    /// `;base64`; otherwise the payload bytes are taken verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if a base64 payload is not valid base64.
    pub fn decode_inline(&self) -> Option<Result<ImageBytes, base64::DecodeError>> {
        let (mime, payload, is_base64) = match self {
            Self::Remote(_) => return None,
            Self::DataUri { uri, mime } => {
                let rest = uri.strip_prefix("data:").unwrap_or(uri);
                let (meta, payload) = rest.split_once(',').unwrap_or((rest, ""));
                (mime.as_str(), payload, meta.ends_with(";base64"))
            }
            Self::RawBase64(payload) => (DEFAULT_IMAGE_MIME, payload.as_str(), true),
        };

        let data = if is_base64 {
            match STANDARD.decode(payload.as_bytes()) {
                Ok(data) => data,
                Err(e) => return Some(Err(e)),
            }
        } else {
            payload.as_bytes().to_vec()
        };
        Some(Ok(ImageBytes {
            mime: mime.to_string(),
            data,
        }))
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::DataUri { uri, mime } => write!(f, "<inline {mime}, {} chars>", uri.len()),
            Self::RawBase64(payload) => write!(f, "<inline base64, {} chars>", payload.len()),
        }
    }
}

/// Image bytes ready to be written to a clipboard item or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBytes {
    pub mime: String,
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sources() {
        assert_eq!(
            ImageSource::classify("https://cdn.example/img.png"),
            ImageSource::Remote("https://cdn.example/img.png".to_string())
        );
        assert_eq!(
            ImageSource::classify("data:image/jpeg;base64,AAAA"),
            ImageSource::DataUri {
                uri: "data:image/jpeg;base64,AAAA".to_string(),
                mime: "image/jpeg".to_string()
            }
        );
        assert_eq!(
            ImageSource::classify("iVBORw0KGgo="),
            ImageSource::RawBase64("iVBORw0KGgo=".to_string())
        );
    }

    #[test]
    fn test_raw_base64_becomes_png_data_uri() {
        let source = ImageSource::classify("AQID");
        assert_eq!(source.to_src(), "data:image/png;base64,AQID");
        let bytes = source.decode_inline().unwrap().unwrap();
        assert_eq!(bytes.data, vec![1, 2, 3]);
        assert_eq!(bytes.mime, "image/png");
    }

    #[test]
    fn test_remote_and_data_uri_src_are_unchanged() {
        for src in [
            "http://x/y.png",
            "data:image/gif;base64,R0lG",
            "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg'/>",
        ] {
            assert_eq!(ImageSource::classify(src).to_src(), src);
        }
        assert!(ImageSource::classify("http://x/y.png").decode_inline().is_none());
    }

    #[test]
    fn test_plain_data_uri_payload_is_not_base64_decoded() {
        let source = ImageSource::classify("data:image/svg+xml;utf8,<svg/>");
        let bytes = source.decode_inline().unwrap().unwrap();
        assert_eq!(bytes.mime, "image/svg+xml");
        assert_eq!(bytes.data, b"<svg/>".to_vec());

        let encoded = ImageSource::classify("data:image/png;base64,AQID");
        assert_eq!(encoded.decode_inline().unwrap().unwrap().data, vec![1, 2, 3]);
    }

    #[test]
    fn test_invalid_base64_is_reported() {
        let source = ImageSource::classify("not base64!!");
        assert!(source.decode_inline().unwrap().is_err());
    }
}
