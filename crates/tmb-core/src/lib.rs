//! Core domain + application logic for the TeslaMate Telegram bot.
//!
//! This crate is framework-agnostic. Telegram and the TeslaMate HTTP API live
//! behind ports (traits) implemented in adapter crates.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod menu;
pub mod messaging;
pub mod security;
pub mod telemetry;

pub use errors::{Error, Result};
