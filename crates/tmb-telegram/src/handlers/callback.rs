use std::sync::Arc;

use teloxide::prelude::*;
use tracing::debug;

use tmb_core::{
    domain::{ChatId, MessageId, MessageRef, UserId},
    messaging::types::{CallbackQuery as CoreCallback, IncomingUpdate},
};

use crate::router::AppState;

pub async fn handle_callback(
    _bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    // Inline-mode callbacks carry no message, hence no chat to authorize against.
    let Some(message) = q.message.as_ref() else {
        debug!(callback_id = %q.id, "dropping callback without message");
        return Ok(());
    };

    let update = IncomingUpdate::Callback(CoreCallback {
        user_id: UserId(q.from.id.0 as i64),
        username: q.from.username.clone(),
        callback_id: q.id.clone(),
        data: q.data.clone().unwrap_or_default(),
        message: MessageRef {
            chat_id: ChatId(message.chat.id.0),
            message_id: MessageId(message.id.0),
        },
    });

    state.dispatcher.handle(update).await;
    Ok(())
}
