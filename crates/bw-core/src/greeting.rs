use crate::{
    domain::{ChatId, MessageRef},
    messaging::port::MessagingPort,
    Result,
};

pub const WELCOME_HTML: &str = "👋 Welcome to <b>BreachWatcher Bot</b>.\n\n\
Send me your <b>email address</b> and I’ll check if it’s been exposed in any known data breaches.";

/// Reply to `/start` with the static welcome message.
pub async fn send_welcome(messenger: &dyn MessagingPort, chat_id: ChatId) -> Result<MessageRef> {
    messenger.send_html(chat_id, WELCOME_HTML).await
}
