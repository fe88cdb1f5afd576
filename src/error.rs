use thiserror::Error;

/// A failed backend call. The variants only say where the cause came from;
/// callers are expected to treat them alike.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("decode {0}")]
    Decode(#[from] serde_json::Error),
    #[error("backend {0}")]
    Remote(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io {0}")]
    Io(#[from] std::io::Error),
    #[error("parse {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("no config dir")]
    NoConfigDir,
    #[error("http client {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid base url {0}")]
    InvalidUrl(#[from] url::ParseError),
}
