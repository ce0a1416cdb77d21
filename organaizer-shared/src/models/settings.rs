// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_KEY: &str = "";
pub const DEFAULT_SUMMARY_PROMPT: &str =
    "Summarize the following text in a concise manner, highlighting the key points:\n\n{text}";
pub const DEFAULT_TRANSLATE_PROMPT: &str = "Translate the following text to English:\n\n{text}";
pub const DEFAULT_DICTATION_LANGUAGE: &str = "en-US";

/// Placeholder every prompt template must contain.
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Fully-populated settings, as handed to adapters and the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub api_url: String,
    pub api_key: String,
    pub summary_prompt: String,
    pub translate_prompt: String,
    pub dictation_language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            summary_prompt: DEFAULT_SUMMARY_PROMPT.to_string(),
            translate_prompt: DEFAULT_TRANSLATE_PROMPT.to_string(),
            dictation_language: DEFAULT_DICTATION_LANGUAGE.to_string(),
        }
    }
}

impl Settings {
    /// Merge stored values over the defaults, field by field.
    ///
    /// A missing or empty stored field falls back to its default.
    #[must_use]
    pub fn merged(stored: &StoredSettings) -> Self {
        let defaults = Self::default();
        let pick = |value: &Option<String>, default: String| match value {
            Some(v) if !v.is_empty() => v.clone(),
            _ => default,
        };

        Self {
            api_url: pick(&stored.api_url, defaults.api_url),
            api_key: pick(&stored.api_key, defaults.api_key),
            summary_prompt: pick(&stored.summary_prompt, defaults.summary_prompt),
            translate_prompt: pick(&stored.translate_prompt, defaults.translate_prompt),
            dictation_language: pick(&stored.dictation_language, defaults.dictation_language),
        }
    }

    /// API key to send, if one is configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }

    #[must_use]
    pub fn summary_prompt_for(&self, text: &str) -> String {
        render_prompt(&self.summary_prompt, text)
    }

    #[must_use]
    pub fn translate_prompt_for(&self, text: &str) -> String {
        render_prompt(&self.translate_prompt, text)
    }
}

/// Substitute the first `{text}` placeholder of `template`.
#[must_use]
pub fn render_prompt(template: &str, text: &str) -> String {
    template.replacen(TEXT_PLACEHOLDER, text, 1)
}

/// Persisted form: every field optional, unknown keys ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictation_language: Option<String>,
}

impl StoredSettings {
    /// Overwrite only the fields present in `update`.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(v) = &update.api_url {
            self.api_url = Some(v.trim().to_string());
        }
        if let Some(v) = &update.api_key {
            self.api_key = Some(v.trim().to_string());
        }
        if let Some(v) = &update.summary_prompt {
            self.summary_prompt = Some(v.clone());
        }
        if let Some(v) = &update.translate_prompt {
            self.translate_prompt = Some(v.clone());
        }
        if let Some(v) = &update.dictation_language {
            self.dictation_language = Some(v.clone());
        }
    }
}

impl From<&Settings> for StoredSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            api_url: Some(settings.api_url.clone()),
            api_key: Some(settings.api_key.clone()),
            summary_prompt: Some(settings.summary_prompt.clone()),
            translate_prompt: Some(settings.translate_prompt.clone()),
            dictation_language: Some(settings.dictation_language.clone()),
        }
    }
}

/// A partial save: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub summary_prompt: Option<String>,
    pub translate_prompt: Option<String>,
    pub dictation_language: Option<String>,
}

impl SettingsUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.api_url.is_none()
            && self.api_key.is_none()
            && self.summary_prompt.is_none()
            && self.translate_prompt.is_none()
            && self.dictation_language.is_none()
    }

    /// The update written by "reset prompts".
    #[must_use]
    pub fn default_prompts() -> Self {
        Self {
            summary_prompt: Some(DEFAULT_SUMMARY_PROMPT.to_string()),
            translate_prompt: Some(DEFAULT_TRANSLATE_PROMPT.to_string()),
            ..Self::default()
        }
    }
}

/// A dictation language offered by the settings surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
}

pub const LANGUAGE_OPTIONS: &[LanguageOption] = &[
    LanguageOption { code: "en-US", name: "English (US)" },
    LanguageOption { code: "en-GB", name: "English (UK)" },
    LanguageOption { code: "de-DE", name: "German" },
    LanguageOption { code: "fr-FR", name: "French" },
    LanguageOption { code: "es-ES", name: "Spanish" },
    LanguageOption { code: "it-IT", name: "Italian" },
    LanguageOption { code: "pt-BR", name: "Portuguese (Brazil)" },
    LanguageOption { code: "nl-NL", name: "Dutch" },
    LanguageOption { code: "pl-PL", name: "Polish" },
    LanguageOption { code: "ru-RU", name: "Russian" },
    LanguageOption { code: "ja-JP", name: "Japanese" },
    LanguageOption { code: "ko-KR", name: "Korean" },
    LanguageOption { code: "zh-CN", name: "Chinese (Simplified)" },
];

#[must_use]
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGE_OPTIONS
        .iter()
        .find(|option| option.code == code)
        .map(|option| option.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_empty_store_yields_defaults() {
        assert_eq!(Settings::merged(&StoredSettings::default()), Settings::default());
    }

    #[test]
    fn test_merge_treats_empty_strings_as_missing() {
        let stored = StoredSettings {
            api_url: Some(String::new()),
            api_key: Some("secret".to_string()),
            dictation_language: Some("de-DE".to_string()),
            ..StoredSettings::default()
        };
        let settings = Settings::merged(&stored);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.api_key, "secret");
        assert_eq!(settings.dictation_language, "de-DE");
        assert_eq!(settings.summary_prompt, DEFAULT_SUMMARY_PROMPT);
    }

    #[test]
    fn test_render_prompt_replaces_first_placeholder_only() {
        assert_eq!(render_prompt("A {text} B {text}", "x"), "A x B {text}");
        let settings = Settings::default();
        assert!(settings.translate_prompt_for("Hallo").ends_with("\n\nHallo"));
    }

    #[test]
    fn test_api_key_blank_means_none() {
        let mut settings = Settings::default();
        assert_eq!(settings.api_key(), None);
        settings.api_key = "  k1 ".to_string();
        assert_eq!(settings.api_key(), Some("k1"));
    }

    #[test]
    fn test_language_catalogue() {
        assert_eq!(LANGUAGE_OPTIONS.len(), 13);
        assert_eq!(language_name("pt-BR"), Some("Portuguese (Brazil)"));
        assert_eq!(language_name("xx-XX"), None);
    }

    #[test]
    fn test_snapshot_round_trips_through_merge() {
        let settings = Settings {
            api_key: "k".to_string(),
            dictation_language: "fr-FR".to_string(),
            ..Settings::default()
        };
        assert_eq!(Settings::merged(&StoredSettings::from(&settings)), settings);
    }
}
