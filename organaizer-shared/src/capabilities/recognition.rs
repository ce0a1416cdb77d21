// SPDX-License-Identifier: GPL-3.0-only
use crate::models::settings::DEFAULT_DICTATION_LANGUAGE;

/// Session options: one utterance, interim results on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    pub language: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl RecognitionConfig {
    #[must_use]
    pub fn dictation(language: &str) -> Self {
        let language = if language.trim().is_empty() {
            DEFAULT_DICTATION_LANGUAGE
        } else {
            language
        };
        Self {
            language: language.to_string(),
            continuous: false,
            interim_results: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionAlternative {
    pub transcript: String,
}

/// One recognised segment, interim until `is_final`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub alternatives: Vec<RecognitionAlternative>,
    pub is_final: bool,
}

impl RecognitionResult {
    #[must_use]
    pub fn new(transcript: &str, is_final: bool) -> Self {
        Self {
            alternatives: vec![RecognitionAlternative {
                transcript: transcript.to_string(),
            }],
            is_final,
        }
    }

    /// Best alternative's transcript.
    #[must_use]
    pub fn transcript(&self) -> &str {
        self.alternatives
            .first()
            .map_or("", |alternative| alternative.transcript.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Results from `result_index` onward changed.
    Result {
        result_index: usize,
        results: Vec<RecognitionResult>,
    },
    /// Engine error code such as `not-allowed`, `no-speech` or `network`.
    Error(String),
    End,
}
