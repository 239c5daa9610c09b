use thiserror::Error;

/// Failure kinds of the bot core. Per-message handlers never see these raw:
/// they are either recovered on the spot (cast decoding) or turned into an
/// apology reply at the Telegram boundary.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("repository unavailable: {0}")]
    Repository(#[from] sqlx::Error),

    #[error("malformed cast data: {0}")]
    MalformedCast(#[from] serde_json::Error),

    #[error("missing or invalid configuration: {0}")]
    Config(String),
}
