//! Command dispatcher: authorization gate, routing and reply building.
//!
//! Handles one inbound update at a time and keeps no state between updates.
//! Chats outside the [`AuthorizationSet`] get no response of any kind.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    command::{CallbackAction, Command, Query},
    formatting,
    menu::{self, HELP_TEXT, UNKNOWN_ACTION_TEXT, UNKNOWN_COMMAND_TEXT, WELCOME_TEXT},
    messaging::{
        port::MessagingPort,
        types::{CallbackQuery, CommandMessage, IncomingUpdate, InlineKeyboard},
    },
    security::AuthorizationSet,
    telemetry::TelemetryClient,
    Result,
};

/// Outbound reply: text plus an optional inline keyboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
}

impl Reply {
    fn new(text: impl Into<String>, keyboard: Option<InlineKeyboard>) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}

pub struct CommandDispatcher {
    auth: AuthorizationSet,
    telemetry: Arc<dyn TelemetryClient>,
    messenger: Arc<dyn MessagingPort>,
}

impl CommandDispatcher {
    pub fn new(
        auth: AuthorizationSet,
        telemetry: Arc<dyn TelemetryClient>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            auth,
            telemetry,
            messenger,
        }
    }

    pub async fn handle(&self, update: IncomingUpdate) {
        let chat_id = update.chat_id();
        if !self.auth.is_authorized(chat_id) {
            let user = match &update {
                IncomingUpdate::Command(c) => c.username.as_deref(),
                IncomingUpdate::Text(t) => t.username.as_deref(),
                IncomingUpdate::Callback(q) => q.username.as_deref(),
            };
            warn!(
                chat_id = chat_id.0,
                user = user.unwrap_or("unknown"),
                "unauthorized access attempt"
            );
            return;
        }

        match update {
            IncomingUpdate::Command(cmd) => self.handle_command(cmd).await,
            IncomingUpdate::Callback(q) => self.handle_callback(q).await,
            IncomingUpdate::Text(t) => {
                debug!(
                    chat_id = t.chat_id.0,
                    user_id = ?t.user_id.map(|u| u.0),
                    "ignoring non-command text"
                );
            }
        }
    }

    async fn handle_command(&self, cmd: CommandMessage) {
        info!(
            chat_id = cmd.chat_id.0,
            user_id = ?cmd.user_id.map(|u| u.0),
            command = %cmd.name,
            args = %cmd.args,
            "command received"
        );

        let reply = match Command::parse(&cmd.name) {
            Some(command) => self.reply_for(command).await,
            None => Reply::new(UNKNOWN_COMMAND_TEXT, None),
        };

        if let Err(e) = self
            .messenger
            .send_message(cmd.chat_id, &reply.text, reply.keyboard)
            .await
        {
            warn!(chat_id = cmd.chat_id.0, error = %e, "failed to send reply");
        }
    }

    async fn handle_callback(&self, q: CallbackQuery) {
        let msg = q.message;
        info!(
            chat_id = msg.chat_id.0,
            user_id = q.user_id.0,
            data = %q.data,
            "callback received"
        );

        let action = CallbackAction::parse(&q.data);

        // The platform expects every callback to be answered before anything else.
        let ack = match action {
            CallbackAction::Unknown => Some(UNKNOWN_ACTION_TEXT),
            _ => None,
        };
        if let Err(e) = self.messenger.answer_callback_query(&q.callback_id, ack).await {
            warn!(chat_id = msg.chat_id.0, error = %e, "failed to answer callback");
        }

        let result = match action {
            CallbackAction::Show(query) => {
                let reply = self.query_reply(query).await;
                self.messenger
                    .send_message(msg.chat_id, &reply.text, reply.keyboard)
                    .await
                    .map(|_| ())
            }
            CallbackAction::Refresh(query) => {
                let reply = self.query_reply(query).await;
                self.messenger
                    .edit_message(msg, &reply.text, reply.keyboard)
                    .await
            }
            CallbackAction::BackToMain => {
                self.messenger
                    .edit_message(msg, WELCOME_TEXT, Some(menu::main_menu()))
                    .await
            }
            CallbackAction::Unknown => Ok(()),
        };

        if let Err(e) = result {
            warn!(chat_id = msg.chat_id.0, error = %e, "failed to deliver callback reply");
        }
    }

    /// Reply for a recognized command. Query failures are rendered, not returned.
    pub async fn reply_for(&self, command: Command) -> Reply {
        match command {
            Command::Start => Reply::new(WELCOME_TEXT, Some(menu::main_menu())),
            Command::Help => Reply::new(HELP_TEXT, None),
            Command::Query(query) => self.query_reply(query).await,
        }
    }

    async fn query_reply(&self, query: Query) -> Reply {
        let text = match self.fetch(query).await {
            Ok(text) => text,
            Err(e) => {
                warn!(command = query.as_str(), error = %e, "telemetry query failed");
                failure_text(query, &e)
            }
        };
        Reply::new(text, Some(menu::refresh_menu(query)))
    }

    async fn fetch(&self, query: Query) -> Result<String> {
        let t = &self.telemetry;
        Ok(match query {
            Query::Info => formatting::format_car_details(&t.car_details().await?),
            Query::Status => formatting::format_status(&t.car_status().await?),
            Query::Battery => formatting::format_battery_health(&t.battery_health().await?),
            Query::Charge => formatting::format_charge(&t.latest_charge().await?),
            Query::Drive => formatting::format_drive(&t.latest_drive().await?),
        })
    }
}

/// `❌ Failed to fetch <resource>: <error>`
pub fn failure_text(query: Query, err: &crate::Error) -> String {
    format!("❌ Failed to fetch {}: {err}", query.resource())
}
