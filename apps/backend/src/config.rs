//! Service configuration from environment variables.

use std::path::PathBuf;

use crate::error::{ApiError, Result};

/// Pack opened when a request does not name one.
pub const DEFAULT_PACK_ID: &str = "ks2_2024_streaky_and_squeaky";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding `packs.json` and one `<id>.json` per pack.
    pub packs_dir: PathBuf,
    pub default_pack_id: String,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Optional env vars:
    /// - HOST (default `0.0.0.0`)
    /// - PORT (default `3000`)
    /// - PACKS_DIR (default `data`)
    /// - DEFAULT_PACK_ID
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ApiError::Config(format!("PORT is not a valid port: {}", value)))?,
            Err(_) => 3000,
        };

        let packs_dir = std::env::var("PACKS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let default_pack_id =
            std::env::var("DEFAULT_PACK_ID").unwrap_or_else(|_| DEFAULT_PACK_ID.to_string());

        Ok(Self {
            host,
            port,
            packs_dir,
            default_pack_id,
        })
    }

    /// Config serving packs from `packs_dir` with every other value defaulted.
    pub fn with_packs_dir(packs_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            packs_dir: packs_dir.into(),
            default_pack_id: DEFAULT_PACK_ID.to_string(),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
