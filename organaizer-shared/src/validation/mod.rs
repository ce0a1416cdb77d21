// SPDX-License-Identifier: GPL-3.0-only
//! Input validation for settings and user-supplied request fields
//!
//! Everything here runs before a network call or a settings write, so a
//! rejected input never reaches the backend or the store.

use url::Url;

use crate::models::api::SendEmailRequest;
use crate::models::settings::{SettingsUpdate, TEXT_PLACEHOLDER};

/// Maximum allowed sizes for user-supplied fields
pub mod limits {
    /// Maximum length of the backend base URL
    pub const MAX_URL_LENGTH: usize = 2048;

    /// Maximum length of an API key
    pub const MAX_API_KEY_LENGTH: usize = 1024;

    /// Maximum length of a prompt template
    pub const MAX_PROMPT_LENGTH: usize = 16 * 1024;

    /// Maximum length of a BCP-47 language tag
    pub const MAX_LANGUAGE_TAG_LENGTH: usize = 35;

    /// Maximum length of an email subject line
    pub const MAX_SUBJECT_LENGTH: usize = 998;
}

/// Validation errors for better error reporting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("String too long: {len} > {max} characters")]
    StringTooLong { len: usize, max: usize },

    #[error("Empty required field: {field}")]
    EmptyField { field: String },

    #[error("Invalid character in field '{field}': contains control characters")]
    InvalidCharacters { field: String },

    #[error("Invalid URL format: {value}")]
    InvalidUrl { value: String },

    #[error("{field} must contain {{text}} placeholder")]
    MissingPlaceholder { field: String },

    #[error("Invalid language tag: {value}")]
    InvalidLanguageTag { value: String },
}

/// Trait for validating request and settings components
pub trait Validate {
    /// Validate the component and return a detailed error if invalid
    ///
    /// # Errors
    /// Returns a [`ValidationError`] variant describing the specific
    /// validation failure when the input is not acceptable.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Validate string fields with length and character restrictions
///
/// # Errors
/// Returns [`ValidationError::StringTooLong`] when `value` exceeds `max_length`,
/// or [`ValidationError::InvalidCharacters`] when control characters are found.
pub fn validate_string(
    value: &str,
    field_name: &str,
    max_length: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max_length {
        return Err(ValidationError::StringTooLong {
            len,
            max: max_length,
        });
    }

    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(ValidationError::InvalidCharacters {
            field: field_name.to_string(),
        });
    }

    Ok(())
}

/// Validate required string fields (non-empty after trimming)
///
/// # Errors
/// Returns [`ValidationError::EmptyField`] when `value` is blank,
/// or propagates errors from [`validate_string`].
pub fn validate_required_string(
    value: &str,
    field_name: &str,
    max_length: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: field_name.to_string(),
        });
    }
    validate_string(value, field_name, max_length)
}

/// Validate the backend base URL: required, absolute, with a host.
///
/// # Errors
/// Returns [`ValidationError::EmptyField`] for a blank value and
/// [`ValidationError::InvalidUrl`] when it does not parse as an absolute
/// `http`/`https` URL.
pub fn validate_api_url(value: &str) -> Result<Url, ValidationError> {
    let value = value.trim();
    validate_required_string(value, "apiUrl", limits::MAX_URL_LENGTH)?;

    let invalid = || ValidationError::InvalidUrl {
        value: value.to_string(),
    };
    let url = Url::parse(value).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(invalid());
    }
    Ok(url)
}

/// Validate a prompt template contains the `{text}` placeholder
///
/// # Errors
/// Returns [`ValidationError::MissingPlaceholder`] when the placeholder is
/// absent, or propagates errors from [`validate_string`].
pub fn validate_prompt_template(value: &str, field_name: &str) -> Result<(), ValidationError> {
    validate_string(value, field_name, limits::MAX_PROMPT_LENGTH)?;
    if !value.contains(TEXT_PLACEHOLDER) {
        return Err(ValidationError::MissingPlaceholder {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// Validate the shape of a BCP-47 language tag such as `en`, `en-US` or `zh-Hans-CN`
///
/// # Errors
/// Returns [`ValidationError::InvalidLanguageTag`] when a subtag is empty,
/// longer than 8 characters or not alphanumeric, or when the primary subtag
/// is not 2-3 letters.
pub fn validate_language_tag(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidLanguageTag {
        value: value.to_string(),
    };
    if value.is_empty() || value.len() > limits::MAX_LANGUAGE_TAG_LENGTH {
        return Err(invalid());
    }

    let mut subtags = value.split('-');
    let primary = subtags.next().unwrap_or_default();
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    for subtag in subtags {
        if subtag.is_empty()
            || subtag.len() > 8
            || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(invalid());
        }
    }
    Ok(())
}

impl Validate for SettingsUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(api_url) = &self.api_url {
            validate_api_url(api_url)?;
        }
        if let Some(api_key) = &self.api_key {
            validate_string(api_key.trim(), "apiKey", limits::MAX_API_KEY_LENGTH)?;
        }
        if let Some(prompt) = &self.summary_prompt {
            validate_prompt_template(prompt, "Summary prompt")?;
        }
        if let Some(prompt) = &self.translate_prompt {
            validate_prompt_template(prompt, "Translation prompt")?;
        }
        if let Some(language) = &self.dictation_language {
            validate_language_tag(language)?;
        }
        Ok(())
    }
}

impl Validate for SendEmailRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required_string(&self.to, "to", limits::MAX_URL_LENGTH)?;
        validate_required_string(&self.subject, "subject", limits::MAX_SUBJECT_LENGTH)?;
        if self.body.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "body".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_string() {
        assert!(validate_string("hello", "test", 10).is_ok());
        assert!(validate_string("hello world!", "test", 5).is_err());
        assert!(validate_string("hello\x00world", "test", 20).is_err());
        assert!(validate_string("hello\nworld\ttest", "test", 20).is_ok());
        // counts characters, not bytes
        assert!(validate_string("ääää", "test", 4).is_ok());
    }

    #[test]
    fn test_validate_api_url() {
        assert!(validate_api_url("http://localhost:8000").is_ok());
        assert!(validate_api_url(" https://api.example.com/base ").is_ok());

        assert_eq!(
            validate_api_url("  "),
            Err(ValidationError::EmptyField {
                field: "apiUrl".to_string()
            })
        );
        assert!(matches!(
            validate_api_url("localhost:8000"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(validate_api_url("not a url").is_err());
        assert!(validate_api_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_validate_prompt_template() {
        assert!(validate_prompt_template("Summarize: {text}", "Summary prompt").is_ok());
        let err = validate_prompt_template("Summarize this", "Summary prompt").unwrap_err();
        assert_eq!(err.to_string(), "Summary prompt must contain {text} placeholder");
        assert!(validate_prompt_template("{ text }", "Summary prompt").is_err());
    }

    #[test]
    fn test_validate_language_tag() {
        for tag in ["en", "en-US", "pt-BR", "zh-Hans-CN", "es-419"] {
            assert!(validate_language_tag(tag).is_ok(), "{tag} should be valid");
        }
        for tag in ["", "e", "english-US", "en_US", "en--US", "en-", "12-US"] {
            assert!(validate_language_tag(tag).is_err(), "{tag} should be invalid");
        }
    }

    #[test]
    fn test_settings_update_validation() {
        let ok = SettingsUpdate {
            api_url: Some("http://localhost:9000".to_string()),
            dictation_language: Some("de-DE".to_string()),
            ..SettingsUpdate::default()
        };
        assert!(ok.validate().is_ok());

        let bad_prompt = SettingsUpdate {
            translate_prompt: Some("Translate please".to_string()),
            ..SettingsUpdate::default()
        };
        assert!(matches!(
            bad_prompt.validate(),
            Err(ValidationError::MissingPlaceholder { .. })
        ));
    }

    #[test]
    fn test_send_email_requires_all_fields() {
        let mut request = SendEmailRequest {
            to: "a@example.com".to_string(),
            subject: "Hi".to_string(),
            body: "Body".to_string(),
        };
        assert!(request.validate().is_ok());
        request.subject = String::new();
        assert_eq!(
            request.validate(),
            Err(ValidationError::EmptyField {
                field: "subject".to_string()
            })
        );
    }
}
