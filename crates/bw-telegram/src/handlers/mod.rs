//! Telegram update handlers.
//!
//! Each handler is a small adapter that extracts the text of a message and
//! calls into the `bw-core` responders. Delivery failures are logged and
//! swallowed so one bad update never stops the dispatcher.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use bw_core::domain::ChatId;

use crate::router::AppState;

mod commands;
mod text;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        // Photos, stickers, etc. are not lookups.
        return Ok(());
    };

    route_text(ChatId(msg.chat.id.0), text, state).await
}

/// Commands go to the command table, everything else is a lookup.
async fn route_text(chat_id: ChatId, text: &str, state: Arc<AppState>) -> ResponseResult<()> {
    if text.starts_with('/') {
        return commands::handle_command(chat_id, text, state).await;
    }
    text::handle_text(chat_id, text, state).await
}
