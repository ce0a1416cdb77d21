// SPDX-License-Identifier: GPL-3.0-only
pub mod capabilities;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod models;
pub mod page;
pub mod ui;
pub mod utils;
pub mod validation;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use capabilities::{HttpRemote, PlatformError};
pub use client::{ApiClient, ApiError};
pub use config::{SettingsStore, StorageError};
pub use dispatch::{Capabilities, DispatchError, Dispatcher, Outcome};
pub use models::action::ActionId;
pub use models::notification::NotificationKind;
pub use models::settings::{Settings, SettingsUpdate};
pub use utils::logger;
pub use validation::ValidationError;
