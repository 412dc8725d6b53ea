use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use toml::{Table, Value};
use tracing::warn;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "library.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub log_filter: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api/books".into(),
            log_filter: "info".into(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

pub fn load_settings(path: &Path) -> Settings {
    load_settings_with_env(path, |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file at `path` if present, then environment.
///
/// File keys are applied one at a time; a key with an unusable value is
/// skipped without discarding the rest of the file.
pub fn load_settings_with_env(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match raw.parse::<Table>() {
            Ok(table) => apply_file_table(&mut settings, &table, path),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    "invalid library config TOML; using defaults: {err}"
                );
            }
        }
    }

    if let Some(v) = env("LIBRARY_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    settings
}

fn apply_file_table(settings: &mut Settings, table: &Table, path: &Path) {
    for (key, value) in table {
        match (key.as_str(), value) {
            ("api_base_url", Value::String(v)) => settings.api_base_url = v.clone(),
            ("log_filter", Value::String(v)) => settings.log_filter = v.clone(),
            ("request_timeout_secs", v) => match timeout_secs(v) {
                Some(secs) => settings.request_timeout_secs = Some(secs),
                None => warn!(
                    path = %path.display(),
                    value = %v,
                    "ignoring request_timeout_secs; expected a whole number of seconds"
                ),
            },
            ("api_base_url" | "log_filter", v) => warn!(
                path = %path.display(),
                value = %v,
                "ignoring {key}; expected a string"
            ),
            (other, _) => warn!(path = %path.display(), key = other, "unknown config key"),
        }
    }
}

fn timeout_secs(value: &Value) -> Option<u64> {
    match value {
        Value::Integer(n) => u64::try_from(*n).ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Checks that `raw` is an absolute http(s) URL and strips any trailing slash.
pub fn validate_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).with_context(|| format!("invalid api base url '{trimmed}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("api base url must start with http:// or https://, got '{trimmed}'");
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
