use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{config_dir, find_config_file, read_config};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

pub static API_URL_ENV: &str = "LEXILEARN_API_URL";
pub static STORAGE_PATH_ENV: &str = "LEXILEARN_STORAGE_PATH";

static DEFAULT_API_URL: &str = "http://localhost:5000/api";
static DEFAULT_STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    api: Api,
    #[serde(default)]
    storage: Storage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    #[serde(default = "default_api_url")]
    base_url: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    path: Option<PathBuf>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Returns the process-wide config, loading it on first use.
    ///
    /// A missing config file is fine, defaults (and env overrides) apply. A broken one is fatal.
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                match Self::load(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        crate::error::log_error(&e);
                        tracing::error!("Config is invalid.");
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    pub fn load(use_local: bool) -> ConfigResult<Self> {
        let mut config = match read_config(use_local) {
            Ok(bytes) => Self::from_slice(&bytes)?,
            Err(ConfigError::ConfigNotFound) => {
                tracing::debug!("no config file found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };

        config.apply_env();
        config.api_url()?;
        Ok(config)
    }

    pub fn from_slice(bytes: &[u8]) -> ConfigResult<Self> {
        let config: Self = toml::from_slice(bytes)?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            tracing::debug!("api url overridden by {}", API_URL_ENV);
            self.api.base_url = url;
        }

        if let Ok(path) = std::env::var(STORAGE_PATH_ENV) {
            self.storage.path = Some(PathBuf::from(path));
        }
    }

    #[inline]
    pub fn api(&self) -> &Api {
        &self.api
    }

    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Parsed API base url, always ending with a slash so relative joins keep the path prefix.
    pub fn api_url(&self) -> ConfigResult<Url> {
        let mut raw = self.api.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        Url::parse(&raw).map_err(|error| ConfigError::InvalidApiUrl {
            url: self.api.base_url.clone(),
            error,
        })
    }

    pub fn storage_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.path {
            return path.clone();
        }

        match config_dir() {
            Some(dir) => dir.join(DEFAULT_STORAGE_FILE),
            None => PathBuf::from("./lexilearn-storage.json"),
        }
    }
}

impl Api {
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[inline]
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Storage {
    #[inline]
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}
