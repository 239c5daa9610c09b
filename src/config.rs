use crate::error::BotError;
use crate::matcher::MatcherConfig;

/* ====== Runtime configuration ======
   Everything the bot needs besides TELOXIDE_TOKEN (read by Bot::from_env).
   Built once in main and passed down; no process-wide state. */

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Webhook mode when set, long-polling otherwise.
    pub webhook: Option<WebhookConfig>,
    /// When set, /retrain is accepted from this chat only.
    pub admin_chat_id: Option<i64>,
    pub matcher: MatcherConfig,
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Public URL Telegram should deliver updates to.
    pub url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| BotError::Config("DATABASE_URL is missing".into()))?;

        let webhook = match std::env::var("WEBHOOK_URL") {
            Ok(url) if !url.trim().is_empty() => {
                let port = match std::env::var("PORT") {
                    Ok(p) => p
                        .parse()
                        .map_err(|_| BotError::Config(format!("PORT is not a number: {p}")))?,
                    Err(_) => 8443,
                };
                Some(WebhookConfig { url, port })
            }
            _ => None,
        };

        let admin_chat_id = match std::env::var("ADMIN_CHAT_ID") {
            Ok(v) => Some(
                v.parse()
                    .map_err(|_| BotError::Config(format!("ADMIN_CHAT_ID is not a chat id: {v}")))?,
            ),
            Err(_) => None,
        };

        let mut matcher = MatcherConfig::default();
        if let Ok(v) = std::env::var("SIMILARITY_THRESHOLD") {
            matcher.similarity_threshold = v
                .parse()
                .map_err(|_| BotError::Config(format!("SIMILARITY_THRESHOLD is not a number: {v}")))?;
        }

        Ok(Self {
            database_url,
            webhook,
            admin_chat_id,
            matcher,
        })
    }
}
