use std::{env, net::SocketAddr, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/state.json";
pub const DEFAULT_WEBHOOK_URL: &str = "https://hook.eu2.make.com/cmisp812xpoab5zhiy7z52h1d6kh73wn";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub webhook_url: String,
}

impl Config {
    /// Reads `PORT`, `APP_DATA_PATH` and `WEBHOOK_URL`, falling back to the
    /// defaults above for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            port: resolve_port(),
            data_path: resolve_data_path(),
            webhook_url: resolve_webhook_url(),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DATA_PATH)
}

pub fn resolve_webhook_url() -> String {
    env::var("WEBHOOK_URL")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string())
}
