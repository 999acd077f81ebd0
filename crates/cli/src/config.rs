//! Runtime configuration from environment variables and flags.

use std::path::PathBuf;

use anyhow::{Context, anyhow};

use invtrack_observability::LogFormat;

pub const DATA_DIR_VAR: &str = "INVTRACK_DATA_DIR";
pub const LOG_FORMAT_VAR: &str = "INVTRACK_LOG_FORMAT";

const INVENTORY_FILE: &str = "inventory.json";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Resolve from the process environment; `data_dir` (a CLI flag) wins over the env var.
    pub fn from_env(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        Self::resolve(data_dir, |key| std::env::var(key).ok())
    }

    /// Resolve using `var` as the environment lookup.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        var: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let data_dir = match data_dir.or_else(|| var(DATA_DIR_VAR).map(PathBuf::from)) {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        let log_format = match var(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e: String| anyhow!(e))
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            data_dir,
            log_format,
        })
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join(INVENTORY_FILE)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }
}

/// `{app_data_dir}/invtrack`, falling back to `~/.local/share/invtrack`.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;
    dir.push("invtrack");
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn flag_overrides_environment() {
        let config = CliConfig::resolve(
            Some(PathBuf::from("/tmp/flag")),
            env(&[(DATA_DIR_VAR, "/tmp/env")]),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/flag"));
        assert_eq!(config.inventory_path(), PathBuf::from("/tmp/flag/inventory.json"));
        assert_eq!(config.session_path(), PathBuf::from("/tmp/flag/session.json"));
    }

    #[test]
    fn environment_supplies_dir_and_format() {
        let config = CliConfig::resolve(
            None,
            env(&[(DATA_DIR_VAR, "/srv/invtrack"), (LOG_FORMAT_VAR, "json")]),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/invtrack"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_log_format_is_rejected() {
        let result = CliConfig::resolve(
            Some(PathBuf::from("/tmp")),
            env(&[(LOG_FORMAT_VAR, "yaml")]),
        );
        assert!(result.is_err());
    }
}
