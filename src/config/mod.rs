use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub api_server: ServerConfig,
    pub cache: CacheConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the base web-log CSV loaded at startup
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    #[serde(default = "CacheConfig::default_max_entries")]
    pub max_entries: u64,
    #[serde(default = "CacheConfig::default_ttl_secs")]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Request body limit for user uploads
    #[serde(default = "UploadConfig::default_max_bytes")]
    pub max_bytes: usize,
}

impl CacheConfig {
    const fn default_max_entries() -> u64 {
        1000
    }

    const fn default_ttl_secs() -> u64 {
        300
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: Self::default_max_entries(),
            ttl_secs: Self::default_ttl_secs(),
        }
    }
}

impl UploadConfig {
    const fn default_max_bytes() -> usize {
        10 * 1024 * 1024
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: Self::default_max_bytes(),
        }
    }
}

fn parse_bool(key: &str, value: &str, default: bool) -> bool {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        other => {
            tracing::warn!("Unknown {key} value '{other}', falling back to '{default}'");
            default
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let data_path = std::env::var("DATA_PATH")
            .unwrap_or_else(|_| "olympic_web_logs.csv".to_string());

        let api_host = std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let api_port = std::env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("API_PORT must be a valid port number")?;

        let cache_enabled = std::env::var("CACHE_ENABLED")
            .map(|v| parse_bool("CACHE_ENABLED", &v, true))
            .unwrap_or(true);
        let cache_max_entries = std::env::var("CACHE_MAX_ENTRIES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or_else(CacheConfig::default_max_entries);
        let cache_ttl_secs = std::env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or_else(CacheConfig::default_ttl_secs);

        let upload_max_bytes = std::env::var("UPLOAD_MAX_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or_else(UploadConfig::default_max_bytes);

        Ok(Config {
            data: DataConfig { path: data_path },
            api_server: ServerConfig {
                host: api_host,
                port: api_port,
            },
            cache: CacheConfig {
                enabled: cache_enabled,
                max_entries: cache_max_entries,
                ttl_secs: cache_ttl_secs,
            },
            upload: UploadConfig {
                max_bytes: upload_max_bytes,
            },
        })
    }
}
