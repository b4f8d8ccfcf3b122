use std::{
    collections::BTreeMap,
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::{domain::CarId, errors::Error, Result};

/// Request timeout used when the config leaves it unset or non-positive.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File name looked up next to the executable when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Typed configuration, loaded once at startup from a TOML file.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub teslamate: TeslaMateConfig,
}

#[derive(Clone, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub whitelist_chat_ids: Vec<i64>,
    /// Alternate Bot API server (self-hosted `telegram-bot-api`).
    #[serde(default)]
    pub api_endpoint: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct TeslaMateConfig {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub car_id: i64,
    /// Seconds.
    #[serde(default)]
    pub timeout: i64,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Config {
    /// Read, parse and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut cfg = Self::parse(&raw)?;
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse TOML without validating or consulting the environment.
    pub fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("invalid TOML: {e}")))
    }

    /// Secrets may come from the environment instead of the file.
    pub fn apply_env_overrides(&mut self) {
        if let Some(token) = env_str("TELEGRAM_BOT_TOKEN").and_then(non_empty) {
            self.telegram.bot_token = token;
        }
        if let Some(key) = env_str("TESLAMATE_API_KEY").and_then(non_empty) {
            self.teslamate.api_key = Some(key);
        }
    }

    /// Check required fields and normalize optional ones.
    pub fn validate(&mut self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(Error::Config("telegram.bot_token is required".to_string()));
        }
        if self.telegram.whitelist_chat_ids.is_empty() {
            return Err(Error::Config(
                "telegram.whitelist_chat_ids must not be empty".to_string(),
            ));
        }
        if self.teslamate.api_url.trim().is_empty() {
            return Err(Error::Config("teslamate.api_url is required".to_string()));
        }
        if self.teslamate.car_id <= 0 {
            return Err(Error::Config(
                "teslamate.car_id must be greater than 0".to_string(),
            ));
        }
        if self.teslamate.timeout <= 0 {
            self.teslamate.timeout = DEFAULT_TIMEOUT_SECS as i64;
        }

        self.teslamate.api_url = trim_trailing_slash(&self.teslamate.api_url);
        self.teslamate.api_key = self.teslamate.api_key.take().and_then(non_empty);
        self.telegram.api_endpoint = self
            .telegram
            .api_endpoint
            .take()
            .and_then(non_empty)
            .map(|e| trim_trailing_slash(&e));

        Ok(())
    }
}

impl TeslaMateConfig {
    pub fn car_id(&self) -> CarId {
        CarId(self.car_id)
    }

    pub fn request_timeout(&self) -> Duration {
        if self.timeout <= 0 {
            return Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        }
        Duration::from_secs(self.timeout as u64)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("telegram", &self.telegram)
            .field("teslamate", &self.teslamate)
            .finish()
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("whitelist_chat_ids", &self.whitelist_chat_ids)
            .field("api_endpoint", &self.api_endpoint)
            .finish()
    }
}

impl fmt::Debug for TeslaMateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeslaMateConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("car_id", &self.car_id)
            .field("timeout", &self.timeout)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// `config.toml` in the directory of the running executable.
pub fn default_config_path() -> Result<PathBuf> {
    let exe = env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| Error::Config(format!("executable has no parent: {}", exe.display())))?;
    Ok(dir.join(DEFAULT_CONFIG_FILE))
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn trim_trailing_slash(s: &str) -> String {
    s.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[telegram]
bot_token = "123:abc"
whitelist_chat_ids = [42, -100]
api_endpoint = "https://tg.example.com/"

[teslamate]
api_url = "https://tm.example.com/"
api_key = "secret"
car_id = 1
timeout = 10

[teslamate.headers]
"CF-Access-Client-Id" = "id"
"#;

    #[test]
    fn parses_and_normalizes_full_config() {
        let mut cfg = Config::parse(FULL).unwrap();
        cfg.validate().unwrap();

        assert_eq!(cfg.telegram.whitelist_chat_ids, vec![42, -100]);
        assert_eq!(
            cfg.telegram.api_endpoint.as_deref(),
            Some("https://tg.example.com")
        );
        assert_eq!(cfg.teslamate.api_url, "https://tm.example.com");
        assert_eq!(cfg.teslamate.car_id(), CarId(1));
        assert_eq!(cfg.teslamate.request_timeout(), Duration::from_secs(10));
        assert_eq!(
            cfg.teslamate.headers.get("CF-Access-Client-Id").map(String::as_str),
            Some("id")
        );
    }

    #[test]
    fn non_positive_timeout_defaults_to_thirty_seconds() {
        let raw = FULL.replace("timeout = 10", "timeout = -5");
        let mut cfg = Config::parse(&raw).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.teslamate.timeout, 30);
        assert_eq!(cfg.teslamate.request_timeout(), Duration::from_secs(30));

        let raw = FULL.replace("timeout = 10\n", "");
        let mut cfg = Config::parse(&raw).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.teslamate.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn empty_optional_fields_become_none() {
        let raw = FULL
            .replace("api_key = \"secret\"", "api_key = \"\"")
            .replace("api_endpoint = \"https://tg.example.com/\"", "api_endpoint = \"\"");
        let mut cfg = Config::parse(&raw).unwrap();
        cfg.validate().unwrap();
        assert!(cfg.teslamate.api_key.is_none());
        assert!(cfg.telegram.api_endpoint.is_none());
    }

    #[test]
    fn rejects_missing_required_fields() {
        let cases = [
            (FULL.replace("bot_token = \"123:abc\"", ""), "bot_token"),
            (
                FULL.replace("whitelist_chat_ids = [42, -100]", "whitelist_chat_ids = []"),
                "whitelist_chat_ids",
            ),
            (
                FULL.replace("api_url = \"https://tm.example.com/\"", ""),
                "api_url",
            ),
            (FULL.replace("car_id = 1", "car_id = 0"), "car_id"),
        ];

        for (raw, key) in cases {
            let mut cfg = Config::parse(&raw).unwrap();
            match cfg.validate() {
                Err(Error::Config(msg)) => assert!(msg.contains(key), "{msg}"),
                other => panic!("expected config error for {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn load_reads_file_and_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, FULL).unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.teslamate.car_id, 1);

        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(&missing), Err(Error::Config(_))));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(Config::parse("[telegram"), Err(Error::Config(_))));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = Config::parse(FULL).unwrap();
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("123:abc"));
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
