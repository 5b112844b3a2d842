/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, JWT_SECRET, DATABASE_URL, storage backend など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres { database_url: String },
}

impl StorageBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Postgres { .. } => "postgres",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub jwt_secret: String,
    pub access_token_ttl_seconds: u64,

    pub storage: StorageBackend,
    pub database_max_connections: u32,
    pub page_size: u64,

    pub request_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the secret or the connection string
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("storage", &self.storage.name())
            .field("database_max_connections", &self.database_max_connections)
            .field("page_size", &self.page_size)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 5050,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = get("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let access_token_ttl_seconds = match get("ACCESS_TOKEN_TTL_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ttl| *ttl > 0 && i64::try_from(*ttl).is_ok())
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))?,
            None => 2 * 24 * 60 * 60, // 2 days
        };

        let storage = match get("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            "postgres" => StorageBackend::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            _ => return Err(ConfigError::Invalid("STORAGE_BACKEND")),
        };

        let database_max_connections = get("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let page_size = get("PAGE_SIZE")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(10);

        let request_timeout = Duration::from_secs(
            get("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
        );

        Ok(Self {
            addr,
            app_env,
            jwt_secret,
            access_token_ttl_seconds,
            storage,
            database_max_connections,
            page_size,
            request_timeout,
        })
    }
}
