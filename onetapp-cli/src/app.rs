use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use onetapp_chat::{Conversation, ResponseFormatter};
use onetapp_core::{Llm, WebhookConfig};
use onetapp_llm::{GoogleClient, OllamaClient, DEFAULT_GEMINI_MODEL};
use onetapp_webhook::HttpWebhookClient;
use secrecy::SecretString;

use crate::cli::{ChatArgs, ProviderArg};
use crate::settings::{Settings, SettingsError};

pub const MISSING_CONFIG_MESSAGE: &str =
    "Error: Webhook URL is not set. Please configure it with /webhook <url> (or `onetapp config set-webhook <url>`).";

const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";

/// Webhook URL for this run: the flag/env value wins over the settings file.
pub fn resolve_webhook(args: &ChatArgs, settings: &Settings) -> WebhookConfig {
    let url = args
        .webhook_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .or(settings.webhook_url.as_deref());
    match url {
        Some(url) => WebhookConfig::new(url.trim()),
        None => WebhookConfig::unset(),
    }
}

pub fn build_llm(args: &ChatArgs) -> anyhow::Result<Arc<dyn Llm>> {
    match args.provider {
        ProviderArg::Google => {
            let Some(api_key) = args.api_key.clone().filter(|key| !key.trim().is_empty()) else {
                bail!("the google provider needs an API key: set GEMINI_API_KEY or pass --api-key");
            };
            let model = args
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
            let client = GoogleClient::new(SecretString::new(api_key), model)
                .context("failed to build the Gemini client")?;
            Ok(Arc::new(client))
        }
        ProviderArg::Ollama => {
            let model = args
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string());
            let client = OllamaClient::new(args.ollama_url.clone(), model)
                .context("failed to build the Ollama client")?;
            Ok(Arc::new(client))
        }
    }
}

pub fn build_webhook_client(args: &ChatArgs) -> anyhow::Result<HttpWebhookClient> {
    match args.webhook_timeout_secs {
        Some(secs) => HttpWebhookClient::with_timeout(Duration::from_secs(secs))
            .context("failed to build the webhook client"),
        None => Ok(HttpWebhookClient::new()),
    }
}

pub struct App {
    pub conversation: Conversation,
    pub settings: Settings,
    pub settings_path: PathBuf,
}

impl App {
    pub fn new(
        args: &ChatArgs,
        settings: Settings,
        settings_path: PathBuf,
        greeting: bool,
    ) -> anyhow::Result<Self> {
        let llm = build_llm(args)?;
        let invoker = build_webhook_client(args)?;
        let config = resolve_webhook(args, &settings);

        let mut builder =
            Conversation::builder(Arc::new(invoker), ResponseFormatter::new(llm), config)
                .missing_config_message(MISSING_CONFIG_MESSAGE);
        if !greeting {
            builder = builder.without_greeting();
        }

        Ok(Self {
            conversation: builder.build(),
            settings,
            settings_path,
        })
    }

    /// Updates the live webhook URL, then persists it. Blank clears it.
    ///
    /// The live value is applied even when the write fails, so the
    /// conversation keeps working for the rest of the session.
    pub fn store_webhook(&mut self, url: &str) -> Result<(), SettingsError> {
        self.settings.set_webhook_url(url);
        match &self.settings.webhook_url {
            Some(url) => self.conversation.webhook_config().set_url(url.clone()),
            None => self.conversation.webhook_config().clear(),
        }
        self.settings.save(&self.settings_path)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn args(extra: &[&str]) -> ChatArgs {
        let mut argv = vec!["onetapp"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap().chat
    }

    #[test]
    fn flag_overrides_stored_webhook() {
        let settings = Settings {
            webhook_url: Some("https://stored.example.com".to_string()),
        };
        let chat_args = args(&["--webhook-url", "https://flag.example.com"]);
        let config = resolve_webhook(&chat_args, &settings);
        assert_eq!(config.url().as_deref(), Some("https://flag.example.com"));
    }

    #[test]
    fn stored_webhook_is_used_without_flag() {
        let settings = Settings {
            webhook_url: Some("https://stored.example.com".to_string()),
        };
        let config = resolve_webhook(&args(&["--webhook-url", ""]), &settings);
        assert_eq!(config.url().as_deref(), Some("https://stored.example.com"));
    }

    #[test]
    fn google_without_api_key_is_a_startup_error() {
        let err = build_llm(&args(&["--provider", "google", "--api-key", ""]))
            .err()
            .expect("missing key must fail");
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn ollama_needs_no_api_key() {
        assert!(build_llm(&args(&["--provider", "ollama"])).is_ok());
    }

    #[test]
    fn store_webhook_updates_the_live_conversation_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut app = App::new(
            &args(&["--provider", "ollama", "--webhook-url", ""]),
            Settings::default(),
            path.clone(),
            false,
        )
        .unwrap();
        assert!(!app.conversation.webhook_config().is_set());

        app.store_webhook("https://hooks.example.com/in").unwrap();
        assert_eq!(
            app.conversation.webhook_config().url().as_deref(),
            Some("https://hooks.example.com/in")
        );
        assert_eq!(
            Settings::load(&path).unwrap().webhook_url.as_deref(),
            Some("https://hooks.example.com/in")
        );

        app.store_webhook("").unwrap();
        assert!(!app.conversation.webhook_config().is_set());
    }

    #[test]
    fn failed_settings_write_still_applies_the_live_webhook() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let mut app = App::new(
            &args(&["--provider", "ollama", "--webhook-url", ""]),
            Settings::default(),
            blocker.join("settings.json"),
            false,
        )
        .unwrap();

        let err = app.store_webhook("https://hooks.example.com/in").unwrap_err();

        assert!(matches!(err, SettingsError::Io { .. }));
        assert_eq!(
            app.conversation.webhook_config().url().as_deref(),
            Some("https://hooks.example.com/in")
        );
        assert_eq!(
            app.settings.webhook_url.as_deref(),
            Some("https://hooks.example.com/in")
        );
    }
}
