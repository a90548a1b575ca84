use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::error::ConfigError;

/// Env var naming an optional YAML/JSON config file.
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base address of the agents service, e.g. `http://agents:7777`.
    #[serde(default = "default_agents_url")]
    pub agents_url: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_index_file")]
    pub index_file: String,
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_agents_url() -> String {
    "http://localhost:7777".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_index_file() -> String {
    "index.html".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            agents_url: default_agents_url(),
            static_dir: default_static_dir(),
            index_file: default_index_file(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

impl Config {
    /// Resolve the configuration from the process environment.
    pub fn resolve() -> Result<Self, ConfigError> {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Defaults, then the file named by `CONFIG_PATH` (if any), then env overrides.
    pub fn resolve_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match lookup(CONFIG_PATH_VAR).filter(|p| !p.is_empty()) {
            Some(path) => Self::load_with(&path, &lookup)?,
            None => Self::default(),
        };
        base.apply_env(&lookup)
    }

    /// Load a YAML (or `.json`) config file, substituting `${VAR}` placeholders first.
    pub fn load_with<F>(path: impl AsRef<Path>, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = substitute_env(&content, lookup)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            debug!("Parsing {} as JSON", path.display());
            Ok(serde_json::from_str(&content)?)
        } else {
            debug!("Parsing {} as YAML", path.display());
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    fn apply_env<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.host = host;
        }
        if let Some(port) = get("PORT") {
            self.port = parse_env("PORT", port)?;
        }
        if let Some(url) = get("AGENTS_URL") {
            self.agents_url = url;
        }
        if let Some(dir) = get("STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
        if let Some(secs) = get("UPSTREAM_TIMEOUT_SECS") {
            self.upstream_timeout_secs = parse_env("UPSTREAM_TIMEOUT_SECS", secs)?;
        }
        Ok(self)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
}

fn parse_env<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}

/// Replace `${VAR}` with its value; unknown variables are left as-is.
fn substitute_env<F>(content: &str, lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}
