use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{port::MessagingPort, types::OutgoingMessage},
    Result,
};

/// Messenger fake that keeps every delivery in memory.
#[derive(Default)]
pub(crate) struct RecordingMessenger {
    sent: Mutex<Vec<(ChatId, OutgoingMessage)>>,
    reject_html: bool,
}

impl RecordingMessenger {
    /// A messenger whose HTML sends fail, as a Telegram parse error would.
    pub(crate) fn rejecting_html() -> Self {
        Self {
            reject_html: true,
            ..Self::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<(ChatId, OutgoingMessage)> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, chat_id: ChatId, msg: OutgoingMessage) -> MessageRef {
        let mut sent = self.sent.lock().unwrap();
        sent.push((chat_id, msg));
        MessageRef {
            chat_id,
            message_id: MessageId(sent.len() as i32),
        }
    }
}

#[async_trait]
impl MessagingPort for RecordingMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        Ok(self.record(chat_id, OutgoingMessage::Text(text.to_string())))
    }

    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        if self.reject_html {
            return Err(Error::External("telegram send error: can't parse entities".to_string()));
        }
        Ok(self.record(chat_id, OutgoingMessage::Html(html.to_string())))
    }
}
