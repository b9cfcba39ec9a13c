//! Process configuration, loaded from the environment at startup.
//!
//! An explicit `Config` is constructed once in `main` and injected into the
//! services; there is no ambient global state.

use std::env;
use std::fmt;

use tracing::info;

/// Which storage variant to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process key-value store
    Memory,
    /// Relational store via sqlx
    Postgres,
}

impl BackendKind {
    /// Parse from a config value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "postgres" => Some(Self::Postgres),
            _ => None,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage variant (`CINEPULSE_BACKEND`, default memory)
    pub backend: BackendKind,
    /// Connection string for the postgres backend (`DATABASE_URL`)
    pub database_url: Option<String>,
    /// Webhook target for feedback notifications (`CINEPULSE_WEBHOOK_URL`);
    /// notifications are logged only when unset
    pub webhook_url: Option<String>,
    /// When true, feedback update/delete require the session user to own the
    /// record (`CINEPULSE_REQUIRE_OWNER`, default false — the source system
    /// let any caller mutate any record)
    pub require_owner: bool,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Panics
    /// Panics if `CINEPULSE_BACKEND` is set to an unknown value. A typo here
    /// should stop the process, not silently fall back.
    #[must_use]
    pub fn from_env() -> Self {
        let backend = match env::var("CINEPULSE_BACKEND") {
            Ok(value) => BackendKind::parse(&value)
                .unwrap_or_else(|| panic!("unknown CINEPULSE_BACKEND: {value}")),
            Err(_) => {
                info!("CINEPULSE_BACKEND not set, using memory backend");
                BackendKind::Memory
            }
        };

        let config = Self {
            backend,
            database_url: env::var("DATABASE_URL").ok(),
            webhook_url: env::var("CINEPULSE_WEBHOOK_URL").ok(),
            require_owner: flag("CINEPULSE_REQUIRE_OWNER"),
        };

        info!(
            backend = %config.backend,
            require_owner = config.require_owner,
            webhook = config.webhook_url.is_some(),
            "configuration loaded"
        );
        config
    }
}

fn flag(key: &str) -> bool {
    matches!(
        env::var(key).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes")
    )
}
