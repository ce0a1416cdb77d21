// SPDX-License-Identifier: GPL-3.0-only
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{AsRefStr, EnumCount, EnumIter, VariantArray, VariantNames};

/// Where a context-menu entry is offered.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MenuContext {
    /// Only when the user has selected text
    Selection,
    /// Only when the user right-clicked an editable field
    Editable,
}

/// Discrete actions the page-interaction layer can run.
///
/// The serialized form is the identifier used by the context menu and the
/// keyboard command surface.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    EnumIter,
    EnumCount,
    VariantArray,
    VariantNames,
    AsRefStr,
)]
pub enum ActionId {
    #[serde(rename = "textToSpeech")]
    #[value(name = "speak")]
    SpeakSelection,
    #[serde(rename = "textToSummary")]
    #[value(name = "summarize")]
    SummarizeSelection,
    #[serde(rename = "translate")]
    #[value(name = "translate")]
    TranslateSelection,
    #[serde(rename = "textToImage")]
    #[value(name = "image")]
    ImageFromSelection,
    #[serde(rename = "dictation")]
    #[value(name = "dictation")]
    StartDictation,
    #[serde(rename = "removeEmptyLines")]
    #[value(name = "remove-empty-lines")]
    RemoveEmptyLines,
}

impl ActionId {
    /// Identifier used on the menu / command surface.
    #[must_use]
    pub fn wire_id(&self) -> &'static str {
        match self {
            Self::SpeakSelection => "textToSpeech",
            Self::SummarizeSelection => "textToSummary",
            Self::TranslateSelection => "translate",
            Self::ImageFromSelection => "textToImage",
            Self::StartDictation => "dictation",
            Self::RemoveEmptyLines => "removeEmptyLines",
        }
    }

    #[must_use]
    pub fn menu_title(&self) -> &'static str {
        match self {
            Self::SpeakSelection => "🔊 Read Aloud",
            Self::SummarizeSelection => "📝 Summarize",
            Self::TranslateSelection => "🌐 Translate",
            Self::ImageFromSelection => "🖼️ Generate Image",
            Self::StartDictation => "🎤 Start Dictation",
            Self::RemoveEmptyLines => "🧹 Remove Empty Lines",
        }
    }

    #[must_use]
    pub fn menu_context(&self) -> MenuContext {
        match self {
            Self::StartDictation => MenuContext::Editable,
            _ => MenuContext::Selection,
        }
    }

    /// Only `removeEmptyLines` is bound to a keyboard shortcut.
    #[must_use]
    pub fn has_shortcut(&self) -> bool {
        matches!(self, Self::RemoveEmptyLines)
    }

    /// Actions that operate on the current selection and abort when it is empty.
    #[must_use]
    pub fn requires_selection(&self) -> bool {
        !matches!(self, Self::StartDictation)
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_id())
    }
}

impl FromStr for ActionId {
    type Err = String;

    /// Accepts both the menu identifier (`textToSpeech`) and the CLI name (`speak`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "textToSpeech" | "speak" => Ok(Self::SpeakSelection),
            "textToSummary" | "summarize" => Ok(Self::SummarizeSelection),
            "translate" => Ok(Self::TranslateSelection),
            "textToImage" | "image" => Ok(Self::ImageFromSelection),
            "dictation" => Ok(Self::StartDictation),
            "removeEmptyLines" | "remove-empty-lines" => Ok(Self::RemoveEmptyLines),
            _ => Err(format!("Unknown action: {s}")),
        }
    }
}
