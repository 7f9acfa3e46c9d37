use std::{fs, path::Path, time::Duration};

use client_core::{DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT};
use toml::{Table, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn set_timeout(&mut self, raw: &str) {
        if let Ok(parsed) = raw.trim().parse::<u64>() {
            if parsed > 0 {
                self.request_timeout_secs = parsed;
            }
        }
    }
}

pub fn load_settings(path: &Path) -> Settings {
    let file = fs::read_to_string(path).ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file, then environment variables. Later layers
/// win; unusable values are skipped.
pub fn load_settings_from(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = raw.parse::<Table>() {
            if let Some(v) = file_value(&file_cfg, "api_base") {
                settings.api_base = v;
            }
            if let Some(v) = file_value(&file_cfg, "request_timeout_secs") {
                settings.set_timeout(&v);
            }
            if let Some(v) = file_value(&file_cfg, "log_filter") {
                settings.log_filter = v;
            }
        }
    }

    if let Some(v) = env("API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = env("APP__API_BASE") {
        settings.api_base = v;
    }

    if let Some(v) = env("REQUEST_TIMEOUT_SECS") {
        settings.set_timeout(&v);
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        settings.set_timeout(&v);
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

fn file_value(table: &Table, key: &str) -> Option<String> {
    match table.get(key)? {
        Value::String(v) => Some(v.clone()),
        Value::Integer(v) => Some(v.to_string()),
        _ => None,
    }
}
