// SPDX-License-Identifier: GPL-3.0-only
use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::api::{DEFAULT_LLM_MODEL, LlmRequest, LlmResponse};
use crate::models::settings::Settings;

impl ApiClient {
    /// `POST /api/llm`, falling back to [`DEFAULT_LLM_MODEL`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyResponse`] when the completion is missing or blank.
    pub async fn prompt_llm(&self, prompt: &str, model: Option<&str>) -> Result<String, ApiError> {
        let body = LlmRequest {
            prompt,
            model: Some(model.unwrap_or(DEFAULT_LLM_MODEL)),
        };
        let response = self
            .request(Method::POST, "/api/llm")
            .json(&body)
            .send()
            .await?;

        let completion: LlmResponse = Self::json(response).await?;
        match completion.response {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(ApiError::EmptyResponse { what: "response" }),
        }
    }

    /// Run the summary prompt template over `text`.
    ///
    /// # Errors
    ///
    /// See [`Self::prompt_llm`].
    pub async fn summarize(&self, settings: &Settings, text: &str) -> Result<String, ApiError> {
        self.prompt_llm(&settings.summary_prompt_for(text), None).await
    }

    /// Run the translation prompt template over `text`.
    ///
    /// # Errors
    ///
    /// See [`Self::prompt_llm`].
    pub async fn translate(&self, settings: &Settings, text: &str) -> Result<String, ApiError> {
        self.prompt_llm(&settings.translate_prompt_for(text), None).await
    }
}
