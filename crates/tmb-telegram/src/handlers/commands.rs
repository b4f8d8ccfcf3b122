use std::sync::Arc;

use teloxide::prelude::*;

use tmb_core::{
    domain::{ChatId, UserId},
    messaging::types::{CommandMessage, IncomingUpdate, TextMessage},
};

use crate::router::AppState;

/// Split `/cmd@botname arg1 ...` into a lowercase command name and the rest.
/// A slash with no name directly after it is not a command.
pub(crate) fn parse_command(text: &str) -> Option<(String, String)> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }

    let mut parts = text.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();
    if cmd.is_empty() {
        return None;
    }

    Some((cmd, rest))
}

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = ChatId(msg.chat.id.0);
    let user_id = msg.from().map(|u| UserId(u.id.0 as i64));
    let username = msg.from().and_then(|u| u.username.clone());

    let update = match parse_command(text) {
        Some((name, args)) => IncomingUpdate::Command(CommandMessage {
            chat_id,
            user_id,
            username,
            name,
            args,
        }),
        None => IncomingUpdate::Text(TextMessage {
            chat_id,
            user_id,
            username,
            text: text.to_string(),
        }),
    };

    state.dispatcher.handle(update).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_command() {
        assert_eq!(
            parse_command("/status"),
            Some(("status".to_string(), String::new()))
        );
    }

    #[test]
    fn strips_bot_mention_and_lowercases() {
        assert_eq!(
            parse_command("/Battery@TeslaMateBot now please"),
            Some(("battery".to_string(), "now please".to_string()))
        );
    }

    #[test]
    fn non_commands_are_not_parsed() {
        assert_eq!(parse_command("status"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn slash_without_name_is_plain_text() {
        assert_eq!(parse_command("/"), None);
        assert_eq!(parse_command("/ status"), None);
        assert_eq!(parse_command("/@TeslaMateBot"), None);
    }
}
