// SPDX-License-Identifier: GPL-3.0-only
use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::api::{
    CalendarEvent, DeviceCodeResponse, DeviceLogin, Email, EmailList, EventList, MailProvider,
    SendEmailRequest, SendReceipt,
};

impl ApiClient {
    /// `GET /api/{provider}/emails?max_results=N`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on a non-2xx response, or a transport/decode error.
    pub async fn list_emails(
        &self,
        provider: MailProvider,
        max_results: u32,
    ) -> Result<Vec<Email>, ApiError> {
        let response = self
            .request(Method::GET, &format!("/api/{provider}/emails"))
            .query(&[("max_results", max_results)])
            .send()
            .await?;
        let list: EmailList = Self::json(response).await?;
        Ok(list.emails)
    }

    /// `POST /api/{provider}/emails/send`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on a non-2xx response, or a transport/decode error.
    pub async fn send_email(
        &self,
        provider: MailProvider,
        email: &SendEmailRequest,
    ) -> Result<SendReceipt, ApiError> {
        let response = self
            .request(Method::POST, &format!("/api/{provider}/emails/send"))
            .json(email)
            .send()
            .await?;
        Self::json(response).await
    }

    /// `GET /api/{provider}/calendar/events?max_results=N`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on a non-2xx response, or a transport/decode error.
    pub async fn list_events(
        &self,
        provider: MailProvider,
        max_results: u32,
    ) -> Result<Vec<CalendarEvent>, ApiError> {
        let response = self
            .request(Method::GET, &format!("/api/{provider}/calendar/events"))
            .query(&[("max_results", max_results)])
            .send()
            .await?;
        let list: EventList = Self::json(response).await?;
        Ok(list.events)
    }

    /// Start the Outlook device-code login (`GET /api/outlook/auth`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on a non-2xx response, or a transport/decode error.
    pub async fn outlook_device_code(&self) -> Result<DeviceLogin, ApiError> {
        let response = self
            .request(Method::GET, "/api/outlook/auth")
            .send()
            .await?;
        let code: DeviceCodeResponse = Self::json(response).await?;
        Ok(code.into())
    }
}
