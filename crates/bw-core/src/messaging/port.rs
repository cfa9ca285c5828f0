use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::OutgoingMessage,
    Result,
};

/// Cross-messenger port.
///
/// Telegram is the only implementation; handlers depend on this trait so they
/// can be driven by a recording fake in tests.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef>;

    /// Send a composed reply using the parse mode it was composed for.
    async fn send(&self, chat_id: ChatId, msg: &OutgoingMessage) -> Result<MessageRef> {
        match msg {
            OutgoingMessage::Text(text) => self.send_text(chat_id, text).await,
            OutgoingMessage::Html(html) => self.send_html(chat_id, html).await,
        }
    }
}
