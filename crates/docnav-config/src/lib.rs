//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `tree.data`
//! - `tree.fallback`
//! - `tree.relpath`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override tree data file.
    pub data: Option<PathBuf>,
    /// Override fallback page.
    pub fallback: Option<String>,
    /// Override link prefix.
    pub relpath: Option<String>,
    /// Override window height.
    pub window_height: Option<u32>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Default tree data filename, relative to the config directory.
const DEFAULT_DATA_FILE: &str = "navtree.js";

/// Default fallback page.
const DEFAULT_FALLBACK: &str = "index.html";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tree configuration (paths are relative strings from TOML).
    tree: TreeConfigRaw,
    /// Viewport metrics used to simulate the host load signal.
    pub viewport: ViewportConfig,

    /// Resolved tree configuration (set after loading).
    #[serde(skip)]
    pub tree_resolved: TreeConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw tree configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TreeConfigRaw {
    data: Option<String>,
    fallback: Option<String>,
    relpath: Option<String>,
}

/// Resolved tree configuration with absolute paths.
#[derive(Debug)]
pub struct TreeConfig {
    /// Tree data file (`.js` script or JSON).
    pub data: PathBuf,
    /// Page selected when the current page is not in the tree.
    pub fallback: String,
    /// Prefix prepended to every link in rendered markup.
    pub relpath: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from(DEFAULT_DATA_FILE),
            fallback: DEFAULT_FALLBACK.to_owned(),
            relpath: String::new(),
        }
    }
}

/// Viewport configuration, in pixels.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Total window height.
    pub window_height: u32,
    /// Fixed header height above the tree.
    pub header_height: u32,
    /// Fixed footer height below the tree.
    pub footer_height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            window_height: 768,
            header_height: 0,
            footer_height: 0,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`tree.relpath`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(data) = &settings.data {
            self.tree_resolved.data.clone_from(data);
        }
        if let Some(fallback) = &settings.fallback {
            self.tree_resolved.fallback.clone_from(fallback);
        }
        if let Some(relpath) = &settings.relpath {
            self.tree_resolved.relpath.clone_from(relpath);
        }
        if let Some(window_height) = settings.window_height {
            self.viewport.window_height = window_height;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(current)
    }

    /// Search for config file starting at `start` and walking up.
    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            tree: TreeConfigRaw::default(),
            viewport: ViewportConfig::default(),
            tree_resolved: TreeConfig {
                data: base.join(DEFAULT_DATA_FILE),
                ..TreeConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_tree()?;
        self.validate_viewport()?;
        Ok(())
    }

    /// Validate tree configuration.
    fn validate_tree(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.tree_resolved.fallback, "tree.fallback")?;
        if self.tree_resolved.data.as_os_str().is_empty() {
            return Err(ConfigError::Validation("tree.data cannot be empty".to_owned()));
        }
        Ok(())
    }

    /// Validate viewport configuration.
    fn validate_viewport(&self) -> Result<(), ConfigError> {
        let viewport = &self.viewport;
        if viewport.window_height == 0 {
            return Err(ConfigError::Validation(
                "viewport.window_height must be greater than 0".to_owned(),
            ));
        }
        // Chrome taller than the window leaves no room for the tree
        if u64::from(viewport.header_height) + u64::from(viewport.footer_height)
            > u64::from(viewport.window_height)
        {
            return Err(ConfigError::Validation(
                "viewport.header_height + viewport.footer_height cannot exceed viewport.window_height"
                    .to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref data) = self.tree.data {
            self.tree.data = Some(expand::expand_env(data, "tree.data")?);
        }
        if let Some(ref fallback) = self.tree.fallback {
            self.tree.fallback = Some(expand::expand_env(fallback, "tree.fallback")?);
        }
        if let Some(ref relpath) = self.tree.relpath {
            self.tree.relpath = Some(expand::expand_env(relpath, "tree.relpath")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.tree_resolved = TreeConfig {
            data: config_dir.join(self.tree.data.as_deref().unwrap_or(DEFAULT_DATA_FILE)),
            fallback: self
                .tree
                .fallback
                .clone()
                .unwrap_or_else(|| DEFAULT_FALLBACK.to_owned()),
            relpath: self.tree.relpath.clone().unwrap_or_default(),
        };
    }
}
