// SPDX-License-Identifier: GPL-3.0-only
//! Subcommand handlers.

use clap::ArgMatches;
use organaizer_shared::{ApiClient, Settings, SettingsStore};

pub mod act;
pub mod backend;
pub mod mail;
pub mod settings;

/// Settings store plus the effective settings for this invocation.
#[derive(Debug)]
pub struct AppContext {
    pub store: SettingsStore,
    pub settings: Settings,
}

impl AppContext {
    /// Load settings from `store` and apply the `--api-url` / `--api-key`
    /// overrides, which are never persisted.
    #[must_use]
    pub fn new(store: SettingsStore, matches: &ArgMatches) -> Self {
        let mut settings = store.load();
        if let Some(url) = matches.get_one::<String>("api-url") {
            settings.api_url.clone_from(url);
        }
        if let Some(key) = matches.get_one::<String>("api-key") {
            settings.api_key.clone_from(key);
        }
        Self { store, settings }
    }

    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.settings)
    }
}
