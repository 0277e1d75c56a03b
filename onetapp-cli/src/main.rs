mod app;
mod cli;
mod repl;
mod settings;

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use onetapp_chat::Outcome;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::{Cli, Commands, ConfigCommand};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // stdout carries the chat; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let settings_path = match cli.settings.clone() {
        Some(path) => path,
        None => settings::default_path()?,
    };
    let settings = Settings::load(&settings_path)?;
    tracing::debug!(path = %settings_path.display(), "settings loaded");

    match cli.command {
        None | Some(Commands::Chat) => {
            let app = App::new(&cli.chat, settings, settings_path, true)?;
            repl::run(app).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Send { text }) => {
            let app = App::new(&cli.chat, settings, settings_path, false)?;
            let round_trip = app
                .conversation
                .submit(text.join(" "))
                .await
                .context("nothing to send")?;
            println!("{}", round_trip.reply.text());
            Ok(match round_trip.outcome {
                Outcome::Success => ExitCode::SUCCESS,
                Outcome::Error => ExitCode::FAILURE,
            })
        }
        Some(Commands::Config(command)) => {
            run_config(command, settings, &settings_path)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_config(
    command: ConfigCommand,
    mut settings: Settings,
    path: &std::path::Path,
) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("settings file: {}", path.display());
            println!(
                "webhook_url:   {}",
                settings.webhook_url.as_deref().unwrap_or("(not set)")
            );
        }
        ConfigCommand::SetWebhook { url } => {
            settings.set_webhook_url(&url);
            settings.save(path)?;
            println!("webhook stored in {}", path.display());
        }
        ConfigCommand::ClearWebhook => {
            settings.webhook_url = None;
            settings.save(path)?;
            println!("webhook cleared");
        }
    }
    Ok(())
}
