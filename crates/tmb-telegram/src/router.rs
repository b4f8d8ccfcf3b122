use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::info;

use tmb_core::{
    config::TelegramConfig, dispatch::CommandDispatcher, errors::Error,
    messaging::port::MessagingPort, security::AuthorizationSet, telemetry::TelemetryClient,
    Result,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<CommandDispatcher>,
}

/// Build the Bot, pointing it at an alternate Bot API server when configured.
pub fn build_bot(cfg: &TelegramConfig) -> Result<Bot> {
    let bot = Bot::new(cfg.bot_token.clone());
    let Some(endpoint) = cfg.api_endpoint.as_deref() else {
        return Ok(bot);
    };
    let url = reqwest::Url::parse(endpoint).map_err(|e| {
        Error::TransportInit(format!("invalid telegram.api_endpoint {endpoint:?}: {e}"))
    })?;
    info!(endpoint, "using custom Telegram API endpoint");
    Ok(bot.set_api_url(url))
}

/// Verify the token against the Bot API. Fails fast on a bad token or endpoint.
pub async fn connect(cfg: &TelegramConfig) -> Result<Bot> {
    let bot = build_bot(cfg)?;
    let me = bot
        .get_me()
        .await
        .map_err(|e| Error::TransportInit(e.to_string()))?;
    info!(username = %me.username(), "authorized on Telegram");
    Ok(bot)
}

/// Long-poll Telegram and feed every update through the core dispatcher.
///
/// teloxide runs different chats concurrently but keeps updates of one chat in
/// arrival order.
pub async fn run_polling(
    bot: Bot,
    auth: AuthorizationSet,
    telemetry: Arc<dyn TelemetryClient>,
) -> anyhow::Result<()> {
    info!(chats = auth.len(), "authorized chats");

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        dispatcher: Arc::new(CommandDispatcher::new(auth, telemetry, messenger)),
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    info!("receiving updates");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(endpoint: Option<&str>) -> TelegramConfig {
        TelegramConfig {
            bot_token: "123:abc".to_string(),
            whitelist_chat_ids: vec![1],
            api_endpoint: endpoint.map(str::to_string),
        }
    }

    #[test]
    fn default_endpoint_is_official_api() {
        let bot = build_bot(&cfg(None)).unwrap();
        assert_eq!(bot.api_url().as_str(), "https://api.telegram.org/");
    }

    #[test]
    fn custom_endpoint_is_used() {
        let bot = build_bot(&cfg(Some("http://localhost:8081"))).unwrap();
        assert_eq!(bot.api_url().host_str(), Some("localhost"));
        assert_eq!(bot.api_url().port(), Some(8081));
    }

    #[test]
    fn invalid_endpoint_is_init_error() {
        assert!(matches!(
            build_bot(&cfg(Some("not a url"))),
            Err(Error::TransportInit(_))
        ));
    }
}
