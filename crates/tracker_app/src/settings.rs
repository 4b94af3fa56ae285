//! Optional `tracker.ron` overrides for the API client.
//!
//! Every field may be left out; durations are given in milliseconds.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;
use tracker_engine::ApiSettings;
use tracker_logging::{tracker_info, tracker_warn};

pub(crate) const SETTINGS_FILENAME: &str = "tracker.ron";
const DEFAULT_SUBMISSION_COUNT: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub(crate) enum SettingsError {
    #[error("could not read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    base_url: Option<String>,
    connect_timeout_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    max_bytes: Option<u64>,
    user_agent: Option<String>,
    submission_count: Option<usize>,
    log_level: Option<String>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AppSettings {
    pub api: ApiSettings,
    /// How many recent submissions `solved` inspects.
    pub submission_count: usize,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            submission_count: DEFAULT_SUBMISSION_COUNT,
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl AppSettings {
    /// Longest a caller should wait for one command's response.
    pub fn response_deadline(&self) -> Duration {
        self.api.connect_timeout + self.api.request_timeout + Duration::from_secs(5)
    }
}

/// Read settings from `path`. A missing file yields the defaults.
pub(crate) fn load_settings(path: &Path) -> Result<AppSettings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppSettings::default()),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let file: SettingsFile = ron::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    apply(file)
}

/// Like [`load_settings`], but any failure falls back to the defaults.
pub(crate) fn load_or_default(path: &Path) -> (AppSettings, Option<SettingsError>) {
    match load_settings(path) {
        Ok(settings) => (settings, None),
        Err(err) => (AppSettings::default(), Some(err)),
    }
}

/// Logged once the logger exists, since settings pick the log level.
pub(crate) fn report_load(path: &Path, error: Option<&SettingsError>) {
    match error {
        Some(err) => tracker_warn!("{}; using default settings", err),
        None => tracker_info!("settings from {:?}", path),
    }
}

fn apply(file: SettingsFile) -> Result<AppSettings, SettingsError> {
    let mut settings = AppSettings::default();
    let api = &mut settings.api;
    if let Some(base_url) = file.base_url {
        api.base_url = base_url;
    }
    if let Some(ms) = file.connect_timeout_ms {
        api.connect_timeout = Duration::from_millis(ms);
    }
    if let Some(ms) = file.request_timeout_ms {
        api.request_timeout = Duration::from_millis(ms);
    }
    if let Some(max_bytes) = file.max_bytes {
        api.max_bytes = max_bytes;
    }
    if let Some(user_agent) = file.user_agent {
        api.user_agent = user_agent;
    }
    if let Some(count) = file.submission_count {
        settings.submission_count = count;
    }
    if let Some(level) = file.log_level {
        settings.log_level = level
            .parse()
            .map_err(|_| SettingsError::LogLevel(level.clone()))?;
    }
    settings.log_file = file.log_file;
    Ok(settings)
}
