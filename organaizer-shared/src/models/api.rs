// SPDX-License-Identifier: GPL-3.0-only
//! Request and response bodies exchanged with the OrganAIzer backend.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, EnumIter, VariantNames};

use super::image::ImageDescriptor;

/// Model the backend falls back to when the request names none.
pub const DEFAULT_LLM_MODEL: &str = "openrouter/auto";

/// Default page size for mail and calendar listings.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

#[derive(Serialize, Debug, Clone)]
pub struct SpeechRequest<'a> {
    pub text_md: &'a str,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SpeechResponse {
    #[serde(default)]
    pub text_normalized: String,
    #[serde(default)]
    pub language: String,
    /// Usually relative to the API base, e.g. `/api/tts/audio/<id>`
    #[serde(default)]
    pub audio_url: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct LlmRequest<'a> {
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LlmResponse {
    #[serde(default)]
    pub response: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Segment {
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Transcription {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// Shape accepted for an image-generation response: `{"images": [...]}`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ImageGenerationResponse {
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
}

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Default,
    ValueEnum,
    EnumIter,
    VariantNames,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AspectRatio {
    #[default]
    Square,
    Landscape,
    Portrait,
    Wide,
    Tall,
}

impl AspectRatio {
    #[must_use]
    pub fn dimensions(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Landscape => "3:2",
            Self::Portrait => "2:3",
            Self::Wide => "16:9",
            Self::Tall => "9:16",
        }
    }

    #[must_use]
    pub fn pretty_name(&self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::Landscape => "Landscape",
            Self::Portrait => "Portrait",
            Self::Wide => "Wide",
            Self::Tall => "Tall",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    ValueEnum,
    EnumIter,
    VariantNames,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MailProvider {
    Google,
    Outlook,
}

impl std::fmt::Display for MailProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct EmailList {
    #[serde(default)]
    pub emails: Vec<Email>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct EventList {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

/// A mailbox message from either provider.
///
/// Google sends `to` as one comma-separated string, `snippet` and `date`;
/// Outlook sends `to` as a list, `body_preview` and `received_date_time`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Email {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "threadId")]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "deserialize_recipients")]
    pub to: Vec<String>,
    #[serde(default, alias = "received_date_time")]
    pub date: Option<String>,
    #[serde(default, alias = "body_preview")]
    pub snippet: Option<String>,
    #[serde(default)]
    pub is_read: Option<bool>,
}

impl Email {
    #[must_use]
    pub fn received_at(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_timestamp)
    }
}

/// A calendar entry from either provider (`summary` on Google, `subject` on Outlook).
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "subject")]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "body_preview")]
    pub description: Option<String>,
}

impl CalendarEvent {
    #[must_use]
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.start.as_deref().and_then(parse_timestamp)
    }

    #[must_use]
    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        self.end.as_deref().and_then(parse_timestamp)
    }
}

/// Response of the Outlook device-code initiation endpoint.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceCodeResponse {
    #[serde(default)]
    pub user_code: Option<String>,
    #[serde(default)]
    pub verification_uri: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Page users open to enter an Outlook device code.
pub const DEVICE_LOGIN_URL: &str = "https://microsoft.com/devicelogin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceLogin {
    /// The user must enter `user_code` at `verification_uri`
    Code {
        user_code: String,
        verification_uri: String,
        message: Option<String>,
    },
    /// Nothing to enter; backend reported a status message
    Status(String),
}

impl From<DeviceCodeResponse> for DeviceLogin {
    fn from(response: DeviceCodeResponse) -> Self {
        match response.user_code {
            Some(user_code) if !user_code.is_empty() => Self::Code {
                user_code,
                verification_uri: response
                    .verification_uri
                    .unwrap_or_else(|| DEVICE_LOGIN_URL.to_string()),
                message: response.message,
            },
            _ => Self::Status(
                response
                    .message
                    .unwrap_or_else(|| "Authentication status checked".to_string()),
            ),
        }
    }
}

impl std::fmt::Display for DeviceLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code {
                user_code,
                verification_uri,
                ..
            } => write!(f, "Enter the code: {user_code} at {verification_uri}"),
            Self::Status(message) => write!(f, "{message}"),
        }
    }
}

/// Backend reachability as shown by the settings surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Error(u16),
    Timeout,
    Disconnected,
}

impl ConnectionStatus {
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected => write!(f, "Connected"),
            Self::Error(status) => write!(f, "Error ({status})"),
            Self::Timeout => write!(f, "Timeout"),
            Self::Disconnected => write!(f, "Disconnected"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Recipients {
    One(String),
    Many(Vec<String>),
}

fn deserialize_recipients<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let recipients = Option::<Recipients>::deserialize(deserializer)?;
    Ok(match recipients {
        None => Vec::new(),
        Some(Recipients::One(list)) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect(),
        Some(Recipients::Many(list)) => list,
    })
}

/// Parse the timestamp formats the providers emit: RFC 3339, RFC 2822,
/// zone-less ISO date-times (Graph) and all-day dates.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
