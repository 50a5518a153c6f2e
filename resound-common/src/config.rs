//! Configuration loading and root folder resolution
//!
//! Resolution order for every setting a binary exposes:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the services log a warning and start
//! with compiled defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "RESOUND_ROOT_FOLDER";

/// Environment variable overriding the config file location
pub const CONFIG_FILE_ENV: &str = "RESOUND_CONFIG";

/// Compiled defaults for the current platform
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        let root_folder = dirs::data_local_dir()
            .map(|d| d.join("resound"))
            .unwrap_or_else(|| PathBuf::from("./resound_data"));

        Self { root_folder }
    }
}

/// Logging section of the TOML file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// `[resource_service]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourceServiceConfig {
    pub bind_address: String,
    pub port: u16,
    /// Base URL of the song service, without trailing `/songs`
    pub catalog_url: String,
    /// Upper bound for a single catalog request, including connect
    pub catalog_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Default for ResourceServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            catalog_url: "http://127.0.0.1:8081".to_string(),
            catalog_timeout_secs: 5,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

/// `[song_service]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SongServiceConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for SongServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8081,
        }
    }
}

/// Contents of `config.toml`; every field is optional in the file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub resource_service: ResourceServiceConfig,
    pub song_service: SongServiceConfig,
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a file
    ///
    /// A missing file yields defaults with a warning. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Config file not found at {}, using compiled defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, the `RESOUND_CONFIG` variable, or the
    /// platform default location, in that order
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match std::env::var(CONFIG_FILE_ENV) {
                Ok(path) => PathBuf::from(path),
                Err(_) => match default_config_path() {
                    Some(path) => path,
                    None => return Ok(Self::default()),
                },
            },
        };
        Self::load(&path)
    }
}

/// `<config_dir>/resound/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("resound").join("config.toml"))
}

/// Root folder resolution (CLI → ENV → TOML → compiled default)
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            toml_root: None,
        }
    }

    /// Use the `root_folder` from a loaded TOML file as the third tier
    pub fn with_toml(mut self, config: &TomlConfig) -> Self {
        self.toml_root = config.root_folder.clone();
        self
    }

    pub fn resolve(&self, cli_arg: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_arg {
            info!(module = %self.module_name, "Root folder from command line: {}", path.display());
            return path.to_path_buf();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                info!(module = %self.module_name, "Root folder from {}: {}", ROOT_FOLDER_ENV, path);
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_root {
            info!(module = %self.module_name, "Root folder from config file: {}", path.display());
            return path.clone();
        }

        let path = CompiledDefaults::for_current_platform().root_folder;
        info!(module = %self.module_name, "Root folder (default): {}", path.display());
        path
    }
}

/// Creates the root folder and derives database paths inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    /// Path of a service database file within the root folder
    pub fn database_path(&self, file_name: &str) -> PathBuf {
        self.root_folder.join(file_name)
    }
}
