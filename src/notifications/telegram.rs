//! Telegram delivery
//!
//! Sends messages through the Bot API `sendMessage` method with a plain
//! HTTP POST. One attempt per message; the caller decides what a failure
//! means.

use crate::config::TelegramConfig;
use crate::errors::DeliveryError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Messages are built with HTML markup and entity escaping
const PARSE_MODE: &str = "HTML";

/// Destination for formatted messages
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, message: &str) -> Result<(), DeliveryError>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram notifier for sending messages
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: Option<String>,
    chat_id: Option<String>,
    disable_web_page_preview: bool,
}

impl TelegramNotifier {
    /// Create a notifier from the telegram config section
    ///
    /// Missing credentials are accepted here; every `deliver` call then fails
    /// with `DeliveryError::MissingCredentials` without touching the network.
    pub fn new(config: &TelegramConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DeliveryError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: non_empty(&config.bot_token),
            chat_id: non_empty(&config.chat_id),
            disable_web_page_preview: config.disable_web_page_preview,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }

    /// Send a plain text message
    pub async fn send_message(&self, message: &str) -> Result<(), DeliveryError> {
        let token = self
            .bot_token
            .as_deref()
            .ok_or(DeliveryError::MissingCredentials("bot token is not set"))?;
        let chat_id = self
            .chat_id
            .as_deref()
            .ok_or(DeliveryError::MissingCredentials("chat id is not set"))?;

        let url = format!("{}/bot{}/sendMessage", self.api_base, token);
        let request = SendMessageRequest {
            chat_id,
            text: message,
            parse_mode: PARSE_MODE,
            disable_web_page_preview: self.disable_web_page_preview,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DeliveryError::Request(redact(&e.to_string(), token)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let api_response = serde_json::from_str::<BotApiResponse>(&body).ok();

        let accepted = match &api_response {
            Some(parsed) => status.is_success() && parsed.ok,
            None => status.is_success(),
        };

        if !accepted {
            let description = api_response
                .and_then(|r| r.description)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: redact(&description, token),
            });
        }

        logger::debug(
            LogTag::Notifier,
            &format!("Sent Telegram notification (length={})", message.len()),
        );
        Ok(())
    }
}

#[async_trait]
impl MessageSink for TelegramNotifier {
    async fn deliver(&self, message: &str) -> Result<(), DeliveryError> {
        self.send_message(message).await
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Remove the bot token from text that may end up in logs
fn redact(text: &str, token: &str) -> String {
    if token.is_empty() {
        return text.to_string();
    }
    text.replace(token, "<redacted>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve_once, unused_local_url};

    fn test_config(api_base: String) -> TelegramConfig {
        TelegramConfig {
            api_base,
            bot_token: "123:secret".to_string(),
            chat_id: "-1001".to_string(),
            connect_timeout_secs: 2,
            timeout_secs: 5,
            ..TelegramConfig::default()
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_without_network() {
        let notifier = TelegramNotifier::new(&TelegramConfig::default()).unwrap();
        assert!(!notifier.has_credentials());

        let err = notifier.deliver("hello").await.unwrap_err();
        assert!(matches!(err, DeliveryError::MissingCredentials(_)));
    }

    #[tokio::test]
    async fn test_send_message_request_shape() {
        let (url, request) =
            serve_once("200 OK", "{\"ok\":true,\"result\":{}}".to_string()).await;

        let notifier = TelegramNotifier::new(&test_config(url)).unwrap();
        notifier.deliver("<b>hi</b>").await.unwrap();

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /bot123:secret/sendMessage "));
        assert!(request.contains("\"chat_id\":\"-1001\""));
        assert!(request.contains("\"text\":\"<b>hi</b>\""));
        assert!(request.contains("\"parse_mode\":\"HTML\""));
        assert!(!request.contains("disable_web_page_preview"));
    }

    #[tokio::test]
    async fn test_parse_mode_is_always_html() {
        let (url, request) =
            serve_once("200 OK", "{\"ok\":true,\"result\":{}}".to_string()).await;

        // A stale parse_mode key in an old config file has no effect
        let config: crate::config::Config = toml::from_str(&format!(
            "[telegram]\napi_base = \"{}\"\nbot_token = \"1:t\"\nchat_id = \"42\"\nparse_mode = \"MarkdownV2\"\n",
            url
        ))
        .unwrap();

        let notifier = TelegramNotifier::new(&config.telegram).unwrap();
        notifier.deliver("<b>hi</b> &amp; bye").await.unwrap();

        let request = request.await.unwrap();
        assert!(request.contains("\"parse_mode\":\"HTML\""));
        assert!(!request.contains("MarkdownV2"));
    }

    #[tokio::test]
    async fn test_rejection_surfaces_description() {
        let body = "{\"ok\":false,\"error_code\":400,\"description\":\"Bad Request: chat not found\"}";
        let (url, _request) = serve_once("400 Bad Request", body.to_string()).await;

        let notifier = TelegramNotifier::new(&test_config(url)).unwrap();
        match notifier.deliver("hi").await.unwrap_err() {
            DeliveryError::Rejected {
                status,
                description,
            } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_network_error_does_not_leak_token() {
        let notifier = TelegramNotifier::new(&test_config(unused_local_url().await)).unwrap();
        let err = notifier.deliver("hi").await.unwrap_err();

        assert!(matches!(err, DeliveryError::Request(_)));
        assert!(!err.to_string().contains("123:secret"));
    }

    #[test]
    fn test_redact() {
        assert_eq!(
            redact("https://api/bot1:tok/sendMessage", "1:tok"),
            "https://api/bot<redacted>/sendMessage"
        );
        assert_eq!(redact("nothing here", ""), "nothing here");
    }
}
