// SPDX-License-Identifier: GPL-3.0-only
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::ArgMatches;
use log::info;
use organaizer_shared::logger::{self, BOLD_WHITE, CYAN, GREEN, YELLOW};
use organaizer_shared::models::api::{
    CalendarEvent, DEFAULT_MAX_RESULTS, DeviceLogin, Email, MailProvider, SendEmailRequest,
};
use organaizer_shared::validation::Validate;

use super::AppContext;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn format_time(parsed: Option<NaiveDateTime>, raw: Option<&str>) -> String {
    match (parsed, raw) {
        (Some(time), _) => time.format(TIMESTAMP_FORMAT).to_string(),
        (None, Some(raw)) => raw.to_string(),
        (None, None) => "-".to_string(),
    }
}

fn email_line(email: &Email) -> String {
    let unread = if email.is_read == Some(false) { "●" } else { " " };
    format!(
        "{unread} {:<16} {:<28} {}",
        format_time(email.received_at(), email.date.as_deref()),
        email.from.as_deref().unwrap_or("-"),
        email.subject.as_deref().unwrap_or("(no subject)")
    )
}

fn event_line(event: &CalendarEvent) -> String {
    let mut line = format!(
        "{} → {}  {}",
        format_time(event.starts_at(), event.start.as_deref()),
        format_time(event.ends_at(), event.end.as_deref()),
        event.summary.as_deref().unwrap_or("(untitled)")
    );
    if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
        line.push_str(&format!(" @ {location}"));
    }
    line
}

fn max_results(matches: &ArgMatches) -> u32 {
    matches
        .get_one::<u32>("max-results")
        .copied()
        .unwrap_or(DEFAULT_MAX_RESULTS)
}

pub async fn run(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let provider = matches
        .get_one::<MailProvider>("provider")
        .copied()
        .context("No mail provider given")?;
    let client = ctx.client();

    match matches.subcommand() {
        Some(("list", sub)) => {
            let emails = client
                .list_emails(provider, max_results(sub))
                .await
                .with_context(|| format!("Failed to list {provider} emails"))?;
            logger::print_color(BOLD_WHITE, &format!("📧 {} emails", emails.len())).await;
            for email in &emails {
                println!("{}", email_line(email));
                if let Some(snippet) = email.snippet.as_deref().filter(|s| !s.is_empty()) {
                    logger::print_color(CYAN, &format!("    {snippet}")).await;
                }
            }
        }
        Some(("events", sub)) => {
            let events = client
                .list_events(provider, max_results(sub))
                .await
                .with_context(|| format!("Failed to list {provider} events"))?;
            logger::print_color(BOLD_WHITE, &format!("📅 {} events", events.len())).await;
            for event in &events {
                println!("{}", event_line(event));
            }
        }
        Some(("send", sub)) => {
            let field = |name: &str| sub.get_one::<String>(name).cloned().unwrap_or_default();
            let email = SendEmailRequest {
                to: field("to"),
                subject: field("subject"),
                body: field("body"),
            };
            email.validate()?;

            info!("Sending {provider} email to {}", email.to);
            let receipt = client
                .send_email(provider, &email)
                .await
                .context("Failed to send email")?;
            let message = receipt
                .message
                .unwrap_or_else(|| "✓ Email sent".to_string());
            logger::print_color(GREEN, &message).await;
        }
        _ => {}
    }
    Ok(())
}

pub async fn outlook_auth(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let login = ctx
        .client()
        .outlook_device_code()
        .await
        .context("Failed to start Outlook login")?;

    match &login {
        DeviceLogin::Code {
            verification_uri,
            message,
            ..
        } => {
            logger::print_color(YELLOW, &login.to_string()).await;
            if let Some(message) = message {
                println!("{message}");
            }
            if matches.get_flag("open") {
                open::that_detached(verification_uri)
                    .with_context(|| format!("Failed to open {verification_uri}"))?;
            }
        }
        DeviceLogin::Status(message) => logger::print_color(GREEN, message).await,
    }
    Ok(())
}
