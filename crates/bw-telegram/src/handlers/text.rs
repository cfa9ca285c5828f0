use std::sync::Arc;

use teloxide::prelude::*;

use bw_core::domain::ChatId;

use crate::router::AppState;

/// Every plain text message is treated as a breach lookup.
pub async fn handle_text(chat_id: ChatId, text: &str, state: Arc<AppState>) -> ResponseResult<()> {
    if let Err(e) = state.lookup.handle(chat_id, text).await {
        tracing::warn!(chat_id = chat_id.0, error = %e, "failed to deliver lookup reply");
    }
    Ok(())
}
