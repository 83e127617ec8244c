use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::Error;

/// Kaltura caps `pager[pageSize]` at 500.
pub const MAX_PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Kaltura session (KS) used for every request.
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default = "default_service_url")]
    pub service_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_delete_wait_ms")]
    pub delete_wait_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_service_url() -> String {
    "https://www.kaltura.com".to_string()
}

fn default_page_size() -> u32 {
    50
}

fn default_delete_wait_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Startup checks; runs before any request is made.
    pub fn validate(&self) -> Result<(), Error> {
        self.session()?;

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::InvalidConfig(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }

        if self.service_url.trim().is_empty() {
            return Err(Error::InvalidConfig("service_url is empty".to_string()));
        }

        Ok(())
    }

    pub fn session(&self) -> Result<&str, Error> {
        match self.session.as_deref().map(str::trim) {
            Some(session) if !session.is_empty() => Ok(session),
            _ => Err(Error::MissingSession),
        }
    }

    pub fn delete_wait(&self) -> Duration {
        Duration::from_millis(self.delete_wait_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Copy safe to print.
    pub fn redacted(&self) -> AppConfig {
        AppConfig {
            session: self.session.as_ref().map(|_| "<redacted>".to_string()),
            ..self.clone()
        }
    }
}

/// Load `Config.toml` from the working directory (or `path` when given),
/// overlaid with `FLAVOR_SWEEP_*` environment variables.
pub fn load_configuration(path: Option<&Path>) -> Result<AppConfig, Error> {
    let file_source = match path {
        Some(path) => ConfigFile::from(path).required(true),
        None => ConfigFile::with_name("Config").required(false),
    };

    let builder = Config::builder()
        .add_source(file_source)
        .add_source(Environment::with_prefix("FLAVOR_SWEEP"))
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}
