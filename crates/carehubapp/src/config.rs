//! # Configuration
//!
//! Carehub configuration is managed by [`confique`], which handles layered
//! loading from a TOML file and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `CAREHUB_API_BASE_URL`, `CAREHUB_DATA_DIR`, etc.
//! 2. **Config file**: `--config <path>`, or `carehub.toml` in the OS config
//!    directory (via the `directories` crate).
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_base_url` | `http://localhost:8000/api` | REST API root |
//! | `request_timeout_secs` | `30` | Per-request timeout |
//! | `data_dir` | OS data dir | Where the lead log lives |
//! | `email.*` | unset | Email relay credentials and routing |
//!
//! Email is disabled unless `service_id`, `template_id` and `public_key` are
//! all set.

use crate::error::{CareError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "carehub.toml";

/// Configuration for carehub, stored in `carehub.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CareConfig {
    /// Root URL of the content API.
    #[config(env = "CAREHUB_API_BASE_URL", default = "http://localhost:8000/api")]
    pub api_base_url: String,

    /// Timeout for a single API request, in seconds.
    #[config(env = "CAREHUB_REQUEST_TIMEOUT_SECS", default = 30)]
    pub request_timeout_secs: u64,

    /// Directory holding the local lead log. When absent, the OS data
    /// directory is used.
    #[config(env = "CAREHUB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[config(nested)]
    pub email: EmailConfig,
}

/// Email relay settings and recipient routing.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    #[config(env = "CAREHUB_EMAILJS_SERVICE_ID")]
    pub service_id: Option<String>,

    /// Template used for tour bookings.
    #[config(env = "CAREHUB_EMAILJS_TEMPLATE_ID")]
    pub template_id: Option<String>,

    /// Template used for care enquiries. Falls back to `template_id`.
    #[config(env = "CAREHUB_EMAILJS_CARE_TEMPLATE_ID")]
    pub care_template_id: Option<String>,

    #[config(env = "CAREHUB_EMAILJS_PUBLIC_KEY")]
    pub public_key: Option<String>,

    #[config(
        env = "CAREHUB_EMAILJS_ENDPOINT",
        default = "https://api.emailjs.com/api/v1.0/email/send"
    )]
    pub endpoint: String,

    /// Receives every notification.
    #[config(default = "bellavistacarehomegit@gmail.com")]
    pub global_admin: String,

    /// Locations containing this text (case-insensitive) go to `location_admin`.
    #[config(default = "barry")]
    pub location_match: String,

    #[config(default = "anwinws@gmail.com")]
    pub location_admin: String,

    /// Location admin for every other location.
    #[config(default = "anwing4umuthe@gmail.com")]
    pub fallback_admin: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            service_id: None,
            template_id: None,
            care_template_id: None,
            public_key: None,
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".to_string(),
            global_admin: "bellavistacarehomegit@gmail.com".to_string(),
            location_match: "barry".to_string(),
            location_admin: "anwinws@gmail.com".to_string(),
            fallback_admin: "anwing4umuthe@gmail.com".to_string(),
        }
    }
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            request_timeout_secs: 30,
            data_dir: None,
            email: EmailConfig::default(),
        }
    }
}

impl CareConfig {
    /// Loads environment variables over `explicit` (or the default config
    /// file when `None`) over the compiled defaults. A missing file is not an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        let mut builder = CareConfig::builder().env();
        if let Some(file) = &file {
            tracing::debug!(path = %file.display(), "loading config file");
            builder = builder.file(file);
        }
        builder.load().map_err(|e| CareError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// A commented `carehub.toml` listing every key with its default.
    pub fn template() -> String {
        confique::toml::template::<CareConfig>(confique::toml::FormatOptions::default())
    }
}

impl EmailConfig {
    /// Whether enough is configured to send anything.
    pub fn is_enabled(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }

    pub fn care_template(&self) -> Option<&str> {
        self.care_template_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.template_id.as_deref())
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "bellavista", "carehub")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
