// SPDX-License-Identifier: GPL-3.0-only
use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use log::{debug, info};
use organaizer_shared::capabilities::AudioPlayer;
use organaizer_shared::client::{MediaSource, ReferenceImage, youtube_error_message};
use organaizer_shared::logger::{self, BOLD_WHITE, CYAN, GREEN, status_color};
use organaizer_shared::models::api::{AspectRatio, Transcription};
use std::path::{Path, PathBuf};

use super::AppContext;
use crate::platform::DesktopAudioPlayer;

pub async fn health(ctx: &AppContext) -> Result<()> {
    let client = ctx.client();
    let status = client.health().await;
    logger::print_color(
        status_color(status),
        &format!("{} {status}", client.base_url()),
    )
    .await;

    if !status.is_connected() {
        bail!("Backend at {} is not reachable ({status})", client.base_url());
    }
    Ok(())
}

pub async fn speak(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let text = matches
        .get_one::<String>("text")
        .context("No text given")?;
    let client = ctx.client();

    info!("🔊 Generating speech...");
    let speech = client
        .generate_speech(text)
        .await
        .context("Failed to generate speech")?;
    let audio_url = client.audio_url(&speech)?;

    if !speech.language.is_empty() {
        println!("Language: {}", speech.language);
    }
    if !speech.text_normalized.is_empty() {
        debug!("Normalized text: {}", speech.text_normalized);
    }
    println!("{audio_url}");

    if let Some(out) = matches.get_one::<PathBuf>("out") {
        let audio = client
            .download_audio(&audio_url)
            .await
            .context("Failed to download audio")?;
        tokio::fs::write(out, &audio)
            .await
            .with_context(|| format!("Failed to write {}", out.display()))?;
        logger::print_color(GREEN, &format!("✓ Saved {}", out.display())).await;
    }

    if matches.get_flag("play") {
        DesktopAudioPlayer.play(&audio_url).await?;
    }
    Ok(())
}

pub async fn llm(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let prompt = matches
        .get_one::<String>("prompt")
        .context("No prompt given")?;
    let model = matches.get_one::<String>("model").map(String::as_str);

    let response = ctx
        .client()
        .prompt_llm(prompt, model)
        .await
        .context("LLM request failed")?;
    println!("{response}");
    Ok(())
}

fn print_transcription(transcription: &Transcription) {
    println!("{}", transcription.text);
    if !transcription.language.is_empty() {
        println!("\nLanguage: {}", transcription.language);
    }
    for segment in &transcription.segments {
        println!(
            "[{:>8.2} → {:>8.2}] {}",
            segment.start,
            segment.end,
            segment.text.trim()
        );
    }
}

pub async fn transcribe(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let source = match (
        matches.get_one::<PathBuf>("file"),
        matches.get_one::<String>("url"),
    ) {
        (Some(path), _) => MediaSource::from_path(path).await?,
        (None, Some(url)) => MediaSource::Url(url.clone()),
        (None, None) => bail!("Give either --file or --url"),
    };

    let client = ctx.client();
    let transcription = if matches.get_flag("video") {
        client.transcribe_video(source).await
    } else {
        client.transcribe_audio(source).await
    }
    .context("Transcription failed")?;

    print_transcription(&transcription);
    Ok(())
}

/// File extension for an image MIME type.
fn image_extension(mime: &str) -> &str {
    match mime.rsplit('/').next() {
        Some("jpeg") => "jpg",
        Some("svg+xml") => "svg",
        Some(ext) if !ext.is_empty() => ext,
        _ => "png",
    }
}

pub async fn image(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let prompt = matches
        .get_one::<String>("prompt")
        .context("No prompt given")?;
    let aspect_ratio = matches
        .get_one::<AspectRatio>("aspect-ratio")
        .copied()
        .unwrap_or_default();

    let mut references = Vec::new();
    for path in matches.get_many::<PathBuf>("reference").unwrap_or_default() {
        references.push(ReferenceImage::from_path(path).await?);
    }

    let client = ctx.client();
    info!(
        "🖼️ Generating {} ({}) image...",
        aspect_ratio.pretty_name(),
        aspect_ratio.dimensions()
    );
    let images = client
        .generate_image(prompt, aspect_ratio, references)
        .await
        .context("Failed to generate image")?;

    let out_dir = matches.get_one::<PathBuf>("out");
    for (index, descriptor) in images.iter().enumerate() {
        let source = descriptor.source();
        if let Some(description) = &descriptor.description {
            logger::print_color(CYAN, description).await;
        }
        let Some(dir) = out_dir else {
            println!("{source}");
            continue;
        };

        let image = client.fetch_image(&source).await?;
        let path = dir.join(format!(
            "image-{}.{}",
            index + 1,
            image_extension(&image.mime)
        ));
        write_file(&path, &image.data).await?;
        logger::print_color(GREEN, &format!("✓ Saved {}", path.display())).await;
    }
    Ok(())
}

pub async fn youtube(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let url = matches.get_one::<String>("url").context("No URL given")?;
    let out = matches
        .get_one::<PathBuf>("out")
        .context("No destination given")?;

    logger::print_color(BOLD_WHITE, "📺 Downloading video...").await;
    let saved = ctx
        .client()
        .download_youtube(url, out)
        .await
        .map_err(|e| anyhow!(youtube_error_message(&e)))?;
    logger::print_color(GREEN, &format!("✓ Saved {}", saved.display())).await;
    Ok(())
}

async fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, data)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
