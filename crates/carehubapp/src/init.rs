//! # Context Setup
//!
//! [`initialize`] loads configuration and wires the production collaborators
//! into a [`CareApi`]: the HTTP content service, the file-backed lead log
//! and, when email is configured, the notifier.
//!
//! ## Data Directory Resolution
//!
//! 1. An explicit `data_override` (the CLI's `--data`) wins.
//! 2. Otherwise `data_dir` from configuration (`CAREHUB_DATA_DIR` or the
//!    config file).
//! 3. Otherwise the OS data directory from the `directories` crate.
//! 4. If the OS gives none, `.carehub` under the current directory.

use crate::api::CareApi;
use crate::config::{project_dirs, CareConfig};
use crate::error::Result;
use crate::notify::Notifier;
use crate::service::HttpService;
use crate::store::FsLog;
use std::path::{Path, PathBuf};

pub const LOCAL_DATA_DIR: &str = ".carehub";

pub struct CareContext {
    pub api: CareApi<HttpService, FsLog>,
    pub config: CareConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(config: &CareConfig, data_override: Option<PathBuf>) -> PathBuf {
    data_override
        .or_else(|| config.data_dir.clone())
        .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(LOCAL_DATA_DIR))
}

pub fn initialize(config_path: Option<&Path>, data_override: Option<PathBuf>) -> Result<CareContext> {
    let config = CareConfig::load(config_path)?;
    let data_dir = resolve_data_dir(&config, data_override);
    tracing::debug!(
        data_dir = %data_dir.display(),
        api = %config.api_base_url,
        "initializing context"
    );

    let timeout = config.request_timeout();
    let service = HttpService::new(&config.api_base_url, timeout)?;
    let notifier = Notifier::from_config(&config.email, timeout)?;
    if notifier.is_none() {
        tracing::debug!("email notifications disabled");
    }

    let api = CareApi::new(service, FsLog::new(&data_dir)).with_notifier(notifier);
    Ok(CareContext {
        api,
        config,
        data_dir,
    })
}
