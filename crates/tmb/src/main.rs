use std::{path::PathBuf, process, sync::Arc};

use clap::{ArgAction, Parser};
use tracing::{error, info};

use tmb_core::{
    config::{self, Config},
    security::AuthorizationSet,
    telemetry::TelemetryClient,
    Error,
};
use tmb_teslamate::TeslaMateClient;

/// Telegram bot answering TeslaMate vehicle queries.
#[derive(Debug, Parser)]
#[command(name = "tmb", version, disable_version_flag = true)]
struct Cli {
    /// Path to the TOML config file (default: config.toml next to the binary).
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = tmb_core::logging::init("tmb") {
        eprintln!("failed to init logging: {e}");
    }

    if let Err(e) = run(cli).await {
        error!("{e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> tmb_core::Result<()> {
    let path = match cli.config {
        Some(p) => p,
        None => config::default_config_path()?,
    };
    info!(path = %path.display(), "loading config");
    let cfg = Config::load(&path)?;
    info!(
        car_id = cfg.teslamate.car_id,
        api_url = %cfg.teslamate.api_url,
        "config loaded"
    );

    let telemetry: Arc<dyn TelemetryClient> = Arc::new(TeslaMateClient::new(&cfg.teslamate)?);
    let auth = AuthorizationSet::new(cfg.telegram.whitelist_chat_ids.iter().copied());

    let bot = tmb_telegram::router::connect(&cfg.telegram).await?;

    tmb_telegram::router::run_polling(bot, auth, telemetry)
        .await
        .map_err(|e| Error::External(format!("telegram bot failed: {e}")))?;

    info!("shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_flag_short_and_long() {
        let cli = Cli::try_parse_from(["tmb", "-c", "/etc/tmb.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/tmb.toml")));

        let cli = Cli::try_parse_from(["tmb", "--config", "a.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
    }

    #[test]
    fn config_defaults_to_none() {
        let cli = Cli::try_parse_from(["tmb"]).unwrap();
        assert!(cli.config.is_none());
    }

    #[test]
    fn version_flag_exits_with_version() {
        let err = Cli::try_parse_from(["tmb", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[tokio::test]
    async fn missing_config_file_fails_with_config_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/tmb/config.toml")),
            version: None,
        };
        assert!(matches!(run(cli).await, Err(Error::Config(_))));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
