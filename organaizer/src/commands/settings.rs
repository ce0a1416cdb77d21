// SPDX-License-Identifier: GPL-3.0-only
use anyhow::{Context, Result};
use clap::ArgMatches;
use organaizer_shared::SettingsUpdate;
use organaizer_shared::config::TomlFileBackend;
use organaizer_shared::logger::{self, BOLD_WHITE, CYAN, GREEN};
use organaizer_shared::models::settings::{LANGUAGE_OPTIONS, language_name};

use super::AppContext;

/// Show all but the last four characters of a key as `*`.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        return "(not set)".to_string();
    }
    let visible = chars.len().saturating_sub(4);
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < visible { '*' } else { *c })
        .collect()
}

pub async fn show(ctx: &AppContext) -> Result<()> {
    let s = &ctx.settings;
    logger::print_color(BOLD_WHITE, "⚙️ Settings").await;
    println!("  apiUrl:            {}", s.api_url);
    println!("  apiKey:            {}", mask(&s.api_key));
    println!(
        "  dictationLanguage: {} ({})",
        s.dictation_language,
        language_name(&s.dictation_language).unwrap_or("custom")
    );
    println!("  summaryPrompt:     {:?}", s.summary_prompt);
    println!("  translatePrompt:   {:?}", s.translate_prompt);
    logger::print_color(
        CYAN,
        &format!("Stored in {}", TomlFileBackend::default_path().display()),
    )
    .await;
    Ok(())
}

pub async fn set(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let field = |name: &str| matches.get_one::<String>(name).cloned();
    let update = SettingsUpdate {
        api_url: field("url"),
        api_key: field("key"),
        summary_prompt: field("summary-prompt"),
        translate_prompt: field("translate-prompt"),
        dictation_language: field("language"),
    };

    ctx.store
        .save(&update)
        .context("Settings were not saved")?;
    logger::print_color(GREEN, "✓ Settings saved!").await;
    Ok(())
}

pub async fn reset_prompts(ctx: &AppContext) -> Result<()> {
    ctx.store
        .reset_prompts()
        .context("Failed to reset prompts")?;
    logger::print_color(GREEN, "✓ Prompts reset to defaults").await;
    Ok(())
}

pub async fn languages(ctx: &AppContext) -> Result<()> {
    for option in LANGUAGE_OPTIONS {
        let marker = if option.code == ctx.settings.dictation_language {
            "*"
        } else {
            " "
        };
        println!("{marker} {:<6} {}", option.code, option.name);
    }
    Ok(())
}
