use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// onetapp - relay chat messages to a webhook and read the replies as Markdown
#[derive(Debug, Parser)]
#[command(name = "onetapp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Settings file (default: <config dir>/onetapp/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    #[command(flatten)]
    pub chat: ChatArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive chat (the default)
    Chat,

    /// Send a single message and print the reply
    Send {
        /// Message text
        #[arg(required = true, num_args = 1.., value_name = "TEXT")]
        text: Vec<String>,
    },

    /// Inspect or change the stored settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the settings file location and its contents
    Show,

    /// Store the webhook URL
    SetWebhook {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Remove the stored webhook URL
    ClearWebhook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderArg {
    Google,
    Ollama,
}

#[derive(Debug, Clone, Args)]
pub struct ChatArgs {
    /// Webhook URL; overrides the stored setting for this run
    #[arg(long, global = true, env = "ONETAPP_WEBHOOK_URL", value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Give up on the webhook after this many seconds (no limit by default)
    #[arg(long, global = true, value_name = "SECONDS")]
    pub webhook_timeout_secs: Option<u64>,

    /// Formatting provider
    #[arg(
        long,
        global = true,
        value_enum,
        env = "ONETAPP_PROVIDER",
        default_value = "google"
    )]
    pub provider: ProviderArg,

    /// Model name for the formatting provider
    #[arg(long, global = true, env = "ONETAPP_MODEL")]
    pub model: Option<String>,

    /// Gemini API key
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Ollama server URL
    #[arg(
        long,
        global = true,
        env = "OLLAMA_BASE_URL",
        default_value = onetapp_llm::DEFAULT_OLLAMA_URL
    )]
    pub ollama_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_chat() {
        let cli = Cli::try_parse_from(["onetapp"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.chat.provider, ProviderArg::Google);
    }

    #[test]
    fn send_joins_words_and_accepts_global_flags() {
        let cli = Cli::try_parse_from([
            "onetapp",
            "send",
            "hello",
            "world",
            "--provider",
            "ollama",
            "--webhook-url",
            "https://hooks.example.com/in",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Send { text }) => assert_eq!(text.join(" "), "hello world"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.chat.provider, ProviderArg::Ollama);
        assert_eq!(
            cli.chat.webhook_url.as_deref(),
            Some("https://hooks.example.com/in")
        );
    }

    #[test]
    fn config_set_webhook_parses() {
        let cli =
            Cli::try_parse_from(["onetapp", "config", "set-webhook", "https://x.test/h"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigCommand::SetWebhook { url })) if url == "https://x.test/h"
        ));
    }
}
