// SPDX-License-Identifier: GPL-3.0-only
use log::{debug, error, info};

use super::{DispatchError, Dispatcher, Outcome, loading_message};
use crate::capabilities::{PlatformError, RecognitionConfig, RecognitionEvent, RecognitionResult};
use crate::models::action::ActionId;
use crate::models::notification::NotificationKind;
use crate::page::{Page, TargetLocator};

pub const TEXT_INSERTED_MESSAGE: &str = "✓ Text inserted!";

/// User-facing text for a recognition error code.
#[must_use]
pub fn dictation_error_message(code: &str) -> String {
    let detail = match code {
        "not-allowed" => "Microphone access denied. Please allow microphone access.",
        "no-speech" => "No speech detected. Try again.",
        "network" => "Network error. Check your connection.",
        other => other,
    };
    format!("Dictation failed: {detail}")
}

/// Final segments accumulated over a session.
#[derive(Debug, Default)]
struct Transcript {
    text: String,
}

impl Transcript {
    /// Fold one result event in. Returns the interim text, if any.
    fn absorb(&mut self, result_index: usize, results: &[RecognitionResult]) -> String {
        let mut interim = String::new();
        for result in results.iter().skip(result_index) {
            if result.is_final {
                self.text.push_str(result.transcript());
            } else {
                interim.push_str(result.transcript());
            }
        }
        interim
    }
}

impl Dispatcher {
    pub(super) async fn dictate(
        &mut self,
        page: &mut Page,
        locator: TargetLocator,
    ) -> Result<Outcome, DispatchError> {
        let action = ActionId::StartDictation;
        let Some(speech) = self.capabilities.speech.clone() else {
            return Err(self.fail(action, PlatformError::SpeechUnsupported.into()));
        };

        let settings = self.settings.load();
        self.ui
            .notify(loading_message(action), NotificationKind::Loading);

        let mut events = match speech.start(RecognitionConfig::dictation(&settings.dictation_language)) {
            Ok(events) => events,
            Err(e) => return Err(self.fail(action, e.into())),
        };

        let mut transcript = Transcript::default();
        let mut failure = None;
        while let Some(event) = events.recv().await {
            match event {
                RecognitionEvent::Result {
                    result_index,
                    results,
                } => {
                    let interim = transcript.absorb(result_index, &results);
                    if !interim.is_empty() {
                        debug!("Interim transcript: {interim}");
                        self.ui.notify(
                            &format!("🎤 Hearing: \"{interim}\""),
                            NotificationKind::Loading,
                        );
                    }
                }
                RecognitionEvent::Error(code) => {
                    let e = DispatchError::Dictation(code);
                    error!("{action} failed: {e}");
                    self.ui.notify(&e.user_message(), NotificationKind::Error);
                    failure = Some(e);
                }
                RecognitionEvent::End => break,
            }
        }

        if transcript.text.is_empty() {
            info!("Dictation ended without a transcript");
            return match failure {
                Some(e) => Err(e),
                None => Ok(Outcome::Dictated {
                    transcript: String::new(),
                }),
            };
        }

        self.ui
            .insert_text_at_cursor(page, locator, &transcript.text)?;
        self.ui
            .notify(TEXT_INSERTED_MESSAGE, NotificationKind::Success);
        Ok(Outcome::Dictated {
            transcript: transcript.text,
        })
    }
}
