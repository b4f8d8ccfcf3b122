//! Static texts and inline keyboards.

use crate::{
    command::{Query, BACK_TO_MAIN},
    messaging::types::{InlineButton, InlineKeyboard},
};

pub const WELCOME_TEXT: &str = "🚗 Welcome to the TeslaMate bot\n\nPick what you want to see:";

pub const HELP_TEXT: &str = "📖 Available commands:\n\n\
/start - Show the main menu\n\
/info - Vehicle details\n\
/status - Current vehicle status\n\
/battery - Battery health\n\
/charge - Latest charge record\n\
/drive - Latest drive (last 7 days)\n\
/help - Show this help";

pub const UNKNOWN_COMMAND_TEXT: &str = "❓ Unknown command, use /help to see available commands";

pub const UNKNOWN_ACTION_TEXT: &str = "❓ Unknown action";

fn label(query: Query) -> &'static str {
    match query {
        Query::Info => "📋 Vehicle info",
        Query::Status => "⚡ Status",
        Query::Battery => "🔋 Battery health",
        Query::Charge => "🔌 Latest charge",
        Query::Drive => "🚗 Latest drive",
    }
}

fn button(query: Query) -> InlineButton {
    InlineButton::new(label(query), query.as_str())
}

/// Two buttons per row, one button per query category.
pub fn main_menu() -> InlineKeyboard {
    InlineKeyboard::new(
        Query::ALL
            .chunks(2)
            .map(|row| row.iter().copied().map(button).collect())
            .collect(),
    )
}

/// "Refresh this" + "back to main menu", attached to every query reply.
pub fn refresh_menu(query: Query) -> InlineKeyboard {
    InlineKeyboard::new(vec![vec![
        InlineButton::new("🔄 Refresh", query.refresh_token()),
        InlineButton::new("🏠 Main menu", BACK_TO_MAIN),
    ]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CallbackAction;

    #[test]
    fn main_menu_lists_every_query() {
        let menu = main_menu();
        assert_eq!(menu.rows.len(), 3);
        assert_eq!(
            menu.callback_data(),
            vec!["info", "status", "battery", "charge", "drive"]
        );
        for token in menu.callback_data() {
            assert!(matches!(
                CallbackAction::parse(token),
                CallbackAction::Show(_)
            ));
        }
    }

    #[test]
    fn refresh_menu_tokens_parse_back() {
        let menu = refresh_menu(Query::Charge);
        assert_eq!(menu.callback_data(), vec!["refresh_charge", "back_main"]);
        assert_eq!(
            CallbackAction::parse(menu.callback_data()[0]),
            CallbackAction::Refresh(Query::Charge)
        );
        assert_eq!(
            CallbackAction::parse(menu.callback_data()[1]),
            CallbackAction::BackToMain
        );
    }

    #[test]
    fn help_mentions_every_command() {
        for name in ["start", "help", "info", "status", "battery", "charge", "drive"] {
            assert!(HELP_TEXT.contains(&format!("/{name} ")), "{name}");
        }
    }
}
