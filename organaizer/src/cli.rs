// SPDX-License-Identifier: GPL-3.0-only
use std::path::PathBuf;
use std::sync::LazyLock;

use clap::ValueHint;
use clap::{ArgAction, ArgGroup, Command, arg, command, value_parser};
use organaizer_shared::ActionId;
use organaizer_shared::client::DEFAULT_VIDEO_FILE_NAME;
use organaizer_shared::models::api::{AspectRatio, DEFAULT_MAX_RESULTS, MailProvider};

pub static DEFAULT_MAX_RESULTS_STR: LazyLock<&'static str> =
    LazyLock::new(|| Box::leak(DEFAULT_MAX_RESULTS.to_string().into_boxed_str()));

fn mail_list_args(name: &'static str, about: &'static str) -> Command {
    Command::new(name).about(about).arg(
        arg!(-n --"max-results" <count> "Maximum number of entries to fetch")
            .default_value(*DEFAULT_MAX_RESULTS_STR)
            .value_parser(value_parser!(u32).range(1..=500)),
    )
}

#[must_use]
pub fn build() -> Command {
    command!()
    .about("🗂️ OrganAIzer - AI productivity client")
    .long_about(
        "Command-line client for an OrganAIzer backend: speech, summaries, translation, transcription, image generation, mail and calendar. The `act` command runs the browser-extension actions against a text document."
    )
    .subcommand_required(true)
    .arg_required_else_help(true)
    .arg(
        arg!(-v --verbose "Enable verbose logging")
        .global(true)
        .action(ArgAction::SetTrue)
    )
    .arg(
        arg!(--"api-url" <url> "Backend base URL (not persisted)")
        .global(true)
        .env("ORGANAIZER_API_URL")
        .value_hint(ValueHint::Url)
    )
    .arg(
        arg!(--"api-key" <key> "API key sent as X-API-Key (not persisted)")
        .global(true)
        .env("ORGANAIZER_API_KEY")
        .hide_env_values(true)
    )
    .subcommand(
        Command::new("health")
            .about("🏓 Check the backend connection")
    )
    .subcommand(
        Command::new("settings")
            .about("⚙️ Show or change stored settings")
            .subcommand_required(true)
            .subcommand(Command::new("show").about("Print the effective settings"))
            .subcommand(
                Command::new("set")
                    .about("Save one or more settings")
                    .arg(arg!(--url <url> "Backend base URL").value_hint(ValueHint::Url))
                    .arg(arg!(--key <key> "API key"))
                    .arg(arg!(--"summary-prompt" <template> "Summary prompt, must contain {text}"))
                    .arg(arg!(--"translate-prompt" <template> "Translation prompt, must contain {text}"))
                    .arg(arg!(--language <tag> "Dictation language, e.g. en-US"))
                    .group(
                        ArgGroup::new("fields")
                            .args(["url", "key", "summary-prompt", "translate-prompt", "language"])
                            .multiple(true)
                            .required(true)
                    )
            )
            .subcommand(Command::new("reset-prompts").about("Restore the default prompt templates"))
            .subcommand(Command::new("languages").about("List dictation languages"))
    )
    .subcommand(
        Command::new("speak")
            .about("🔊 Generate speech from text")
            .arg(arg!(<text> "Text to speak (markdown allowed)"))
            .arg(
                arg!(--play "Open the generated audio with the desktop player")
                .action(ArgAction::SetTrue)
            )
            .arg(
                arg!(-o --out <file> "Save the audio to a file")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
            )
    )
    .subcommand(
        Command::new("llm")
            .about("💬 Send a prompt to the language model")
            .arg(arg!(<prompt> "Prompt text"))
            .arg(arg!(-m --model <model> "Model name (backend default when omitted)"))
    )
    .subcommand(
        Command::new("transcribe")
            .about("📝 Transcribe audio or video")
            .arg(
                arg!(-f --file <file> "Local media file to upload")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
            )
            .arg(arg!(-u --url <url> "URL the backend downloads").value_hint(ValueHint::Url))
            .arg(
                arg!(--video "Use the video transcription endpoint")
                .action(ArgAction::SetTrue)
            )
            .group(ArgGroup::new("source").args(["file", "url"]).required(true))
    )
    .subcommand(
        Command::new("image")
            .about("🖼️ Generate images from a prompt")
            .arg(arg!(<prompt> "Image description"))
            .arg(
                arg!(-a --"aspect-ratio" <ratio> "Aspect ratio")
                .default_value("square")
                .value_parser(value_parser!(AspectRatio))
            )
            .arg(
                arg!(-r --reference <file> "Reference image (repeatable)")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
            )
            .arg(
                arg!(-o --out <dir> "Directory to save the images in")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath)
            )
    )
    .subcommand(
        Command::new("youtube")
            .about("📺 Download a YouTube video through the backend")
            .arg(arg!(<url> "Video URL").value_hint(ValueHint::Url))
            .arg(
                arg!(-o --out <file> "Destination file")
                .default_value(DEFAULT_VIDEO_FILE_NAME)
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
            )
    )
    .subcommand(
        Command::new("mail")
            .about("📧 Mail and calendar")
            .arg(
                arg!(<provider> "Mail provider")
                .value_parser(value_parser!(MailProvider))
            )
            .subcommand_required(true)
            .subcommand(mail_list_args("list", "List recent emails"))
            .subcommand(mail_list_args("events", "List upcoming calendar events"))
            .subcommand(
                Command::new("send")
                    .about("Send an email")
                    .arg(arg!(--to <address> "Recipient").required(true))
                    .arg(arg!(--subject <subject> "Subject line").required(true))
                    .arg(arg!(--body <body> "Message body").required(true))
            )
    )
    .subcommand(
        Command::new("outlook-auth")
            .about("🔑 Start the Outlook device-code login")
            .arg(
                arg!(--open "Open the verification page in the browser")
                .action(ArgAction::SetTrue)
            )
    )
    .subcommand(
        Command::new("act")
            .about("⚡ Run an extension action on a text document")
            .long_about("Loads the text into a simulated page with everything selected, runs the action exactly as the context menu would, shows the notifications and prints the resulting text.")
            .arg(
                arg!(<action> "Action to run")
                .value_parser(value_parser!(ActionId))
            )
            .arg(
                arg!(-i --input <file> "Read the document from a file (stdin otherwise)")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
            )
            .arg(
                arg!(--"in-place" "Write the result back to --input")
                .requires("input")
                .action(ArgAction::SetTrue)
            )
            .arg(
                arg!(-c --clipboard <file> "File that receives clipboard writes")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
            )
            .arg(
                arg!(-o --out <dir> "Directory for images downloaded from the image modal")
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath)
            )
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        build().debug_assert();
    }

    #[test]
    fn test_act_parses_cli_names() {
        let matches = build()
            .try_get_matches_from(["organaizer", "act", "remove-empty-lines"])
            .unwrap();
        let (_, act) = matches.subcommand().unwrap();
        assert_eq!(
            act.get_one::<ActionId>("action"),
            Some(&ActionId::RemoveEmptyLines)
        );
    }

    #[test]
    fn test_settings_set_requires_a_field() {
        assert!(
            build()
                .try_get_matches_from(["organaizer", "settings", "set"])
                .is_err()
        );
    }

    #[test]
    fn test_global_api_url() {
        let matches = build()
            .try_get_matches_from(["organaizer", "health", "--api-url", "http://x:1"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("api-url").map(String::as_str),
            Some("http://x:1")
        );
    }
}
