/// Core error type.
///
/// Adapter crates map their specific errors into this type so the dispatcher
/// can render failures consistently. Only `Config` and `TransportInit` are
/// fatal; everything else is recovered per event.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("telegram init failed: {0}")]
    TransportInit(String),

    #[error("API returned status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
