// SPDX-License-Identifier: GPL-3.0-only
use log::debug;
use std::time::Duration;

use super::ApiClient;
use crate::models::api::ConnectionStatus;

pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

impl ApiClient {
    /// Probe `GET /health` without credentials.
    pub async fn health(&self) -> ConnectionStatus {
        let url = self.endpoint("/health");
        debug!("GET {url}");

        match self.http.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => ConnectionStatus::Connected,
            Ok(response) => ConnectionStatus::Error(response.status().as_u16()),
            Err(e) if e.is_timeout() => ConnectionStatus::Timeout,
            Err(e) => {
                debug!("Health check failed: {e}");
                ConnectionStatus::Disconnected
            }
        }
    }
}
