//! Telegram adapter (teloxide).
//!
//! This crate implements the `bw-core` MessagingPort over Telegram Bot API
//! and routes incoming updates to the core handlers.

use async_trait::async_trait;

use teloxide::{prelude::*, types::ParseMode};

pub mod handlers;
pub mod router;

use bw_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    formatting::{split_html, split_text},
    messaging::port::MessagingPort,
    Result,
};

/// Hard Telegram limit for a single text message.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
    safe_limit: usize,
}

impl TelegramMessenger {
    pub fn new(bot: Bot, safe_limit: usize) -> Self {
        Self {
            bot,
            safe_limit: safe_limit.min(TELEGRAM_MESSAGE_LIMIT),
        }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    /// Deliver `text` in as many messages as the length limit requires.
    /// Returns a reference to the last message sent.
    async fn send_chunks(
        &self,
        chat_id: ChatId,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<MessageRef> {
        let chunks = match parse_mode {
            Some(ParseMode::Html) => split_html(text, self.safe_limit),
            _ => split_text(text, self.safe_limit),
        };

        let mut last = None;
        for chunk in chunks {
            let mut req = self.bot.send_message(Self::tg_chat(chat_id), chunk);
            if let Some(mode) = parse_mode {
                req = req.parse_mode(mode);
            }
            let msg = req.await.map_err(Self::map_err)?;
            last = Some(MessageRef {
                chat_id,
                message_id: MessageId(msg.id.0),
            });
        }
        last.ok_or_else(|| Error::External("telegram error: empty message".to_string()))
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        self.send_chunks(chat_id, text, None).await
    }

    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        self.send_chunks(chat_id, html, Some(ParseMode::Html)).await
    }
}
