mod config;
mod corpus;
mod engine;
mod error;
mod matcher;
mod repo;
mod tg;

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = config::Config::from_env().context("loading configuration")?;
    let bot = Bot::from_env();

    let repo = repo::MovieRepo::connect(&config.database_url)
        .await
        .context("connecting to the movie database")?;
    let engine = engine::Engine::bootstrap(repo, &config)
        .await
        .context("building the match index")?;

    tg::run(bot, Arc::new(engine), config).await
}
