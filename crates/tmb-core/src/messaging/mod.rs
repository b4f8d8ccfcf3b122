//! Messenger-agnostic update model and outbound port (Telegram today).

pub mod port;
pub mod types;
