// SPDX-License-Identifier: GPL-3.0-only

//! Command-line entry point
//!
//! Parses arguments, sets up logging and routes each subcommand to its
//! handler in [`crate::commands`].

use crate::cli;
use crate::commands::{self, AppContext};
use anyhow::Result;
use log::debug;
use organaizer_shared::SettingsStore;

fn init_logging(verbose: bool) {
    // Respect RUST_LOG env var, fall back to the verbose flag
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
    } else {
        let log_level = if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .init();
    }
}

/// Main entry point for the CLI
///
/// # Errors
///
/// Returns the error of the subcommand that ran.
pub async fn run() -> Result<()> {
    let matches = cli::build().get_matches();
    init_logging(matches.get_flag("verbose"));

    let ctx = AppContext::new(SettingsStore::from_default_path(), &matches);
    debug!("Backend: {}", ctx.settings.api_url);

    match matches.subcommand() {
        Some(("health", _)) => commands::backend::health(&ctx).await,
        Some(("settings", sub)) => match sub.subcommand() {
            Some(("set", set)) => commands::settings::set(&ctx, set).await,
            Some(("reset-prompts", _)) => commands::settings::reset_prompts(&ctx).await,
            Some(("languages", _)) => commands::settings::languages(&ctx).await,
            _ => commands::settings::show(&ctx).await,
        },
        Some(("speak", sub)) => commands::backend::speak(&ctx, sub).await,
        Some(("llm", sub)) => commands::backend::llm(&ctx, sub).await,
        Some(("transcribe", sub)) => commands::backend::transcribe(&ctx, sub).await,
        Some(("image", sub)) => commands::backend::image(&ctx, sub).await,
        Some(("youtube", sub)) => commands::backend::youtube(&ctx, sub).await,
        Some(("mail", sub)) => commands::mail::run(&ctx, sub).await,
        Some(("outlook-auth", sub)) => commands::mail::outlook_auth(&ctx, sub).await,
        Some(("act", sub)) => commands::act::run(&ctx, sub).await,
        _ => Ok(()),
    }
}
