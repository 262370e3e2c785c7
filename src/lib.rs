//! Client SDK for the LexiLearn reading platform.
//!
//! [`api::ApiClient`] talks to the REST API, [`auth::SessionStore`] keeps the signed in user
//! next to the rest of the client state in [`storage`], and [`video`] and [`quiz`] hold the
//! little logic that runs on the client.

use std::sync::Arc;

use crate::{api::ApiClient, error::AppResult, storage::FileStorage};

pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod api;
pub mod auth;
pub mod error;
pub mod model;
pub mod quiz;
pub mod storage;
pub mod video;

static APPLICATION_NAME: &str = "lexilearn";

/// Builds a client from the config file, with the session kept in the configured storage file.
#[tracing::instrument]
pub async fn connect(use_local: bool) -> AppResult<ApiClient> {
    let config = Config::get_or_init(use_local).await;
    let storage = FileStorage::open(config.storage_path())?;

    tracing::debug!(
        "using api at {}, storage at {}",
        config.api().base_url(),
        storage.path().display()
    );
    ApiClient::from_config(config, Arc::new(storage))
}

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}
