// SPDX-License-Identifier: GPL-3.0-only
use tokio::io::{AsyncWriteExt, stdout};

use crate::models::api::ConnectionStatus;
use crate::models::notification::NotificationKind;
use crate::ui::NotificationRecord;

// ANSI color codes
pub const RED: &str = "\x1b[0;31m";
pub const GREEN: &str = "\x1b[0;32m";
pub const YELLOW: &str = "\x1b[0;33m";
pub const BLUE: &str = "\x1b[0;34m";
pub const MAGENTA: &str = "\x1b[0;35m";
pub const CYAN: &str = "\x1b[0;36m";
pub const NC: &str = "\x1b[0m"; // No Color

pub const BOLD_WHITE: &str = "\x1b[1;37m";

// Logging constants
const LOG_INFO: &str = "\x1b[1;32mINFO    \x1b[0m";
const LOG_ERROR: &str = "\x1b[1;31mERROR   \x1b[0m";
const LOG_WARN: &str = "\x1b[1;33mWARN    \x1b[0m";
const LOG_DEBUG: &str = "\x1b[1;34mDEBUG   \x1b[0m";

/// Terminal colour for a notification kind.
#[must_use]
pub fn kind_color(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => BLUE,
        NotificationKind::Success => GREEN,
        NotificationKind::Error => RED,
        NotificationKind::Warning => YELLOW,
        NotificationKind::Loading => MAGENTA,
    }
}

/// One line for a notification, e.g. `[success] 📝 Summary inserted!`.
/// Loading notifications get a spinner glyph.
#[must_use]
pub fn format_notification(kind: NotificationKind, message: &str) -> String {
    let spinner = if kind.shows_spinner() { "⟳ " } else { "" };
    format!("{}[{kind}]{NC} {spinner}{message}", kind_color(kind))
}

#[must_use]
pub fn status_color(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => GREEN,
        ConnectionStatus::Error(_) => RED,
        ConnectionStatus::Timeout | ConnectionStatus::Disconnected => YELLOW,
    }
}

// Function to print messages in color
pub async fn print_color(color: &str, message: &str) {
    let parsed_message = format!("{color}{message}{NC}\n");
    write_stdout(&parsed_message).await;
}

/// Render a batch of notifications in order.
pub async fn notifications(records: &[NotificationRecord]) {
    for record in records {
        let line = format_notification(record.kind, &record.message);
        write_stdout(&format!("{line}\n")).await;
    }
}

// Logging functions
pub async fn debug(message: &str) {
    print_color(LOG_DEBUG, message).await;
}

pub async fn info(message: &str) {
    print_color(LOG_INFO, message).await;
}

pub async fn warn(message: &str) {
    print_color(LOG_WARN, message).await;
}

pub async fn error(message: &str) {
    print_color(LOG_ERROR, message).await;
}

/// Print a newline
pub async fn nl() {
    write_stdout("\n").await;
}

async fn write_stdout(text: &str) {
    let mut stdout = stdout();
    if let Err(e) = stdout.write_all(text.as_bytes()).await {
        println!("Failed to write to stdout. Defaulting to println!(). Error: {e}");
        print!("{text}");
    }
    if let Err(e) = stdout.flush().await {
        println!("Failed to flush stdout. Error: {e}");
    }
}
