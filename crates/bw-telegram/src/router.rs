use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use bw_core::{
    breach::BreachApi, config::Config, lookup::BreachLookup, messaging::port::MessagingPort,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub messenger: Arc<dyn MessagingPort>,
    pub lookup: Arc<BreachLookup>,
}

impl AppState {
    pub fn new(api: Arc<dyn BreachApi>, messenger: Arc<dyn MessagingPort>) -> Self {
        Self {
            lookup: Arc::new(BreachLookup::new(api, messenger.clone())),
            messenger,
        }
    }
}

/// Long-poll Telegram until Ctrl-C.
pub async fn run_polling(cfg: Arc<Config>, api: Arc<dyn BreachApi>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!("BreachWatcher bot running as @{}", me.username()),
        Err(e) => return Err(anyhow::anyhow!("telegram getMe failed: {e}")),
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(
        bot.clone(),
        cfg.telegram_safe_limit,
    ));
    let state = Arc::new(AppState::new(api, messenger));

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("BreachWatcher bot stopped");
    Ok(())
}
