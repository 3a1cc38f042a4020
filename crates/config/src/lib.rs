//! Layered configuration for shelf.
//!
//! Values are merged from (later wins):
//! 1. built-in defaults,
//! 2. a config file (`shelf.toml` in the platform config directory, or an
//!    explicit path which may also be YAML or JSON),
//! 3. environment variables prefixed `SHELF_`, with `__` separating nested
//!    keys (`SHELF_LIBRARY__READ_ONLY=true`).
//!
//! ```toml
//! [library]
//! path = "~/books/library.json"
//! read_only = false
//!
//! [decoration]
//! enabled = true
//! timeout_secs = 5
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "SHELF_";
pub const CONFIG_FILE_NAME: &str = "shelf.toml";
pub const LIBRARY_FILE_NAME: &str = "library.json";
pub const DEFAULT_DECORATION_URL: &str = "https://assets.lottielibrary.com/l/book.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library: LibraryConfig,
    pub decoration: DecorationConfig,
    pub render: RenderConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// The library file. Relative paths are resolved against the working
    /// directory.
    pub path: PathBuf,
    /// Never write to the library file; changes last for the session only.
    pub read_only: bool,
}
impl Default for LibraryConfig {
    fn default() -> Self {
        Self { path: default_library_path(), read_only: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    pub enabled: bool,
    pub url: String,
    pub timeout_secs: u64,
}
impl Default for DecorationConfig {
    fn default() -> Self {
        Self { enabled: true, url: DEFAULT_DECORATION_URL.to_string(), timeout_secs: 10 }
    }
}
impl DecorationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory of `*.txt` templates overriding the built-in ones by name.
    pub templates_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "shelf")
}

fn default_library_path() -> PathBuf {
    project_dirs().map_or_else(|| PathBuf::from(LIBRARY_FILE_NAME), |dirs| dirs.data_dir().join(LIBRARY_FILE_NAME))
}

impl Config {
    /// `shelf.toml` in the platform config directory, if there is a home
    /// directory to put it in.
    pub fn default_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads and validates configuration.
    ///
    /// An explicit `file` must exist. The default file is optional.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(file)?)
    }

    /// The merged provider chain, before extraction.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let figment = match file {
            Some(path) => {
                if !path.exists() {
                    exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
                }
                merge_file(figment, path)?
            },
            None => match Self::default_file() {
                Some(path) if path.exists() => merge_file(figment, &path)?,
                _ => figment,
            },
        };
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Parse)?;
        config.validate()?;
        tracing::debug!(
            library = %config.library.path.display(),
            read_only = config.library.read_only,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.decoration.timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid("decoration.timeout_secs must be greater than zero".to_string()));
        }
        if self.decoration.enabled && self.decoration.url.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("decoration.url must be set when decoration is enabled".to_string()));
        }
        if self.library.path.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("library.path must not be empty".to_string()));
        }
        Ok(())
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    })
}
