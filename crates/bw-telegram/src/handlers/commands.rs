use std::sync::Arc;

use teloxide::prelude::*;

use bw_core::{domain::ChatId, greeting::send_welcome};

use crate::router::AppState;

/// Command name without the leading `/` or an `@botname` suffix, lowercased.
fn parse_command(text: &str) -> String {
    // Telegram may send `/cmd@botname arg1 ...`
    let first = text.split_whitespace().next().unwrap_or("");

    first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase()
}

pub async fn handle_command(
    chat_id: ChatId,
    text: &str,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    match parse_command(text).as_str() {
        "start" | "help" => {
            if let Err(e) = send_welcome(state.messenger.as_ref(), chat_id).await {
                tracing::warn!(chat_id = chat_id.0, error = %e, "failed to send welcome");
            }
            Ok(())
        }
        // Unknown commands are not lookups; stay silent.
        _ => Ok(()),
    }
}
