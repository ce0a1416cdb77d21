// SPDX-License-Identifier: GPL-3.0-only
//! Runs page actions against a text document loaded into a one-field page.

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{debug, info};
use organaizer_shared::logger;
use organaizer_shared::models::settings::StoredSettings;
use organaizer_shared::page::{Element, ElementId, Page, PlainField};
use organaizer_shared::ui::ModalTarget;
use organaizer_shared::{ActionId, Capabilities, Dispatcher, HttpRemote, Outcome, SettingsStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use super::AppContext;
use crate::platform::{DesktopAudioPlayer, DirectoryDownloader, FileClipboard};

/// Where the platform side effects of an action land.
#[derive(Debug, Clone)]
pub struct ActTargets {
    pub clipboard: Option<PathBuf>,
    pub download_dir: PathBuf,
}

fn capabilities(ctx: &AppContext, targets: &ActTargets) -> Capabilities {
    Capabilities {
        remote: Arc::new(HttpRemote::default()),
        clipboard: Arc::new(FileClipboard::new(targets.clipboard.clone())),
        audio: Arc::new(DesktopAudioPlayer),
        speech: None,
        downloader: Arc::new(DirectoryDownloader::new(
            targets.download_dir.clone(),
            ctx.client(),
        )),
    }
}

fn field_value(page: &Page, id: ElementId) -> Result<String> {
    page.plain_field(id)
        .map(|field| field.value.clone())
        .context("Document field disappeared")
}

/// Run `action` on `text` with all of it selected and return the resulting text.
///
/// # Errors
///
/// Returns the failure the action reported to the user.
pub async fn run_action(
    ctx: &AppContext,
    action: ActionId,
    text: &str,
    targets: &ActTargets,
) -> Result<String> {
    let store = SettingsStore::in_memory(StoredSettings::from(&ctx.settings));
    let mut dispatcher = Dispatcher::new(store, capabilities(ctx, targets));

    let mut page = Page::new();
    let id = page.add_focused(Element::PlainField(PlainField::textarea(text).select_all()));

    let result = dispatcher.dispatch(&mut page, action).await;

    if dispatcher.ui().modal.is_open() {
        info!(
            "Image shown in modal, downloading into {}",
            targets.download_dir.display()
        );
        dispatcher.modal_click(&mut page, ModalTarget::Download).await;
        dispatcher.modal_click(&mut page, ModalTarget::Close).await;
    }

    let records = dispatcher.ui_mut().notifications.drain_log();
    logger::notifications(&records).await;

    let outcome = result.with_context(|| format!("{} failed", action.menu_title()))?;
    debug!("Outcome: {outcome:?}");
    if let Outcome::Played { audio_url } = &outcome {
        println!("{audio_url}");
    }
    field_value(&page, id)
}

async fn read_input(matches: &ArgMatches) -> Result<String> {
    if let Some(path) = matches.get_one::<PathBuf>("input") {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read stdin")?;
    Ok(text)
}

pub async fn run(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let action = matches
        .get_one::<ActionId>("action")
        .copied()
        .context("No action given")?;
    let targets = ActTargets {
        clipboard: matches.get_one::<PathBuf>("clipboard").cloned(),
        download_dir: matches
            .get_one::<PathBuf>("out")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let text = read_input(matches).await?;
    let result = run_action(ctx, action, &text, &targets).await?;

    match matches.get_one::<PathBuf>("input") {
        Some(path) if matches.get_flag("in-place") => {
            if result != text {
                tokio::fs::write(path, &result)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Updated {}", path.display());
            }
        }
        _ => print!("{result}"),
    }
    Ok(())
}
