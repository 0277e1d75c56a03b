use std::io::Write;

use onetapp_chat::SubmitRejected;
use onetapp_core::{Message, Sender};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::app::App;
use crate::settings::SettingsError;

const HELP: &str = "\
Type a message and press Enter to send it to the webhook.

Commands:
  /webhook          show the webhook URL
  /webhook <url>    set and store the webhook URL
  /webhook clear    remove the stored webhook URL
  /history          print the conversation so far
  /error            print the last error, if any
  /help             show this help
  /quit             leave (Ctrl-D works too)";

#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Send(String),
    ShowWebhook,
    SetWebhook(String),
    ClearWebhook,
    History,
    LastError,
    Help,
    Quit,
    Unknown(String),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<ReplCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Some(ReplCommand::Send(line.to_string()));
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));

    let parsed = match (name, rest) {
        ("webhook", "") => ReplCommand::ShowWebhook,
        ("webhook", "clear") => ReplCommand::ClearWebhook,
        ("webhook", url) => ReplCommand::SetWebhook(url.to_string()),
        ("history", _) => ReplCommand::History,
        ("error", _) => ReplCommand::LastError,
        ("help", _) => ReplCommand::Help,
        ("quit" | "exit", _) => ReplCommand::Quit,
        (other, _) => ReplCommand::Unknown(other.to_string()),
    };
    Some(parsed)
}

pub fn render(message: &Message) -> String {
    let label = match message.sender() {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    format!("{label}> {}", message.text())
}

pub async fn run(mut app: App) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;

    for message in app.conversation.messages() {
        println!("{}\n", render(&message));
    }
    if !app.conversation.webhook_config().is_set() {
        println!("(no webhook configured yet; use /webhook <url>)\n");
    }

    loop {
        // Readline blocks this task; nothing else runs on the runtime while
        // waiting for input.
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let Some(command) = parse_line(&line) else {
            continue;
        };
        editor.add_history_entry(line.as_str())?;

        match command {
            ReplCommand::Send(text) => send(&app, text).await,
            ReplCommand::ShowWebhook => match app.conversation.webhook_config().url() {
                Some(url) => println!("webhook: {url}"),
                None => println!("webhook: (not set)"),
            },
            ReplCommand::SetWebhook(url) => {
                println!("webhook set to {}", url.trim());
                report_persist(app.store_webhook(&url));
            }
            ReplCommand::ClearWebhook => {
                println!("webhook cleared");
                report_persist(app.store_webhook(""));
            }
            ReplCommand::History => {
                for message in app.conversation.messages() {
                    println!("{}\n", render(&message));
                }
            }
            ReplCommand::LastError => match app.conversation.last_error() {
                Some(err) => println!("last error: {err}"),
                None => println!("no error"),
            },
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
            ReplCommand::Unknown(name) => println!("unknown command /{name}; try /help"),
        }
    }

    Ok(())
}

fn report_persist(result: Result<(), SettingsError>) {
    if let Err(err) = result {
        tracing::warn!(error = %err, "failed to persist settings");
        println!("(applied for this session only; could not save: {err})");
    }
}

async fn send(app: &App, text: String) {
    print!("bot> …");
    let _ = std::io::stdout().flush();

    let result = app.conversation.submit(text).await;
    // Clear the pending indicator.
    print!("\r\x1b[2K");

    match result {
        Ok(round_trip) => println!("{}\n", render(&round_trip.reply)),
        Err(SubmitRejected::Busy) => println!("(still waiting for the previous reply)"),
        Err(SubmitRejected::EmptyText) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_sent_verbatim() {
        assert_eq!(
            parse_line("  hello /there "),
            Some(ReplCommand::Send("  hello /there ".to_string()))
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_line("   "), None);
    }

    #[test]
    fn webhook_commands() {
        assert_eq!(parse_line("/webhook"), Some(ReplCommand::ShowWebhook));
        assert_eq!(parse_line("/webhook clear"), Some(ReplCommand::ClearWebhook));
        assert_eq!(
            parse_line("/webhook  https://hooks.example.com/in "),
            Some(ReplCommand::SetWebhook("https://hooks.example.com/in".to_string()))
        );
    }

    #[test]
    fn other_commands() {
        assert_eq!(parse_line("/history"), Some(ReplCommand::History));
        assert_eq!(parse_line("/error"), Some(ReplCommand::LastError));
        assert_eq!(parse_line("/exit"), Some(ReplCommand::Quit));
        assert_eq!(
            parse_line("/frobnicate now"),
            Some(ReplCommand::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn render_labels_sender() {
        assert_eq!(render(&Message::user("hi")), "you> hi");
        assert_eq!(render(&Message::bot("**ok**")), "bot> **ok**");
    }
}
