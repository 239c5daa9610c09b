use std::sync::Arc;

use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    error_handlers::LoggingErrorHandler,
    prelude::*,
    update_listeners::webhooks,
    utils::command::BotCommands,
};
use tracing::error;

use crate::config::Config;
use crate::engine::Engine;

const GREETING: &str = "Hello! Ask me about movies, actors, or recommendations.";
const APOLOGY_REPLY: &str = "⚠️ Error retrieving movie data. Try again later.";

/* ====== Commands ====== */
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Commands:")]
enum Command {
    #[command(description = "greeting and usage hint")]
    Start,
    #[command(description = "reload movies and rebuild the matcher")]
    Retrain,
    #[command(description = "help")]
    Help,
}

/// Wire the dispatcher and serve updates until shutdown. The inbound source
/// is long-polling by default, or the axum webhook listener when configured;
/// both feed the same handler tree.
pub async fn run(bot: Bot, engine: Arc<Engine>, config: Config) -> anyhow::Result<()> {
    let handler = dptree::entry().branch(
        Update::filter_message()
            .branch(
                dptree::entry().filter_command::<Command>().endpoint({
                    let engine = engine.clone();
                    let admin_chat_id = config.admin_chat_id;
                    move |bot: Bot, msg: Message, cmd: Command| {
                        let engine = engine.clone();
                        async move { on_command(bot, msg, cmd, &engine, admin_chat_id).await }
                    }
                }),
            )
            .branch({
                let engine = engine.clone();
                dptree::endpoint(move |bot: Bot, msg: Message| {
                    let engine = engine.clone();
                    async move { on_text(bot, msg, &engine).await }
                })
            }),
    );

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .enable_ctrlc_handler()
        .build();

    match &config.webhook {
        Some(webhook) => {
            let addr = ([0, 0, 0, 0], webhook.port).into();
            let options = webhooks::Options::new(addr, webhook.url.parse()?);
            // Malformed inbound payloads are answered with an error status by
            // the listener itself and never reach the handlers.
            let listener = webhooks::axum(bot, options).await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("webhook listener error"),
                )
                .await;
        }
        None => dispatcher.dispatch().await,
    }
    Ok(())
}

/* ====== Handlers ====== */

async fn on_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    engine: &Engine,
    admin_chat_id: Option<i64>,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, GREETING).await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Retrain => {
            if admin_chat_id.is_some_and(|id| id != msg.chat.id.0) {
                bot.send_message(msg.chat.id, "Retraining is restricted to the operator chat.")
                    .await?;
                return Ok(());
            }
            match engine.retrain().await {
                Ok((movies, prompts)) => {
                    bot.send_message(
                        msg.chat.id,
                        format!("Retrained on {movies} movies ({prompts} prompts)."),
                    )
                    .await?;
                }
                Err(e) => {
                    error!("retrain failed: {e}");
                    bot.send_message(msg.chat.id, APOLOGY_REPLY).await?;
                }
            }
        }
    }
    Ok(())
}

async fn on_text(bot: Bot, msg: Message, engine: &Engine) -> ResponseResult<()> {
    let Some(text) = message_text_any(&msg) else {
        return Ok(());
    };
    if text.trim().is_empty() {
        return Ok(());
    }
    let reply = engine.reply(&text).await;
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

fn message_text_any(msg: &Message) -> Option<String> {
    if let Some(t) = msg.text() {
        return Some(t.to_string());
    }
    if let Some(c) = msg.caption() {
        return Some(c.to_string());
    }
    None
}
