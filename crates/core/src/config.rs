//! porter configuration file parsing (.porter.toml)

use std::path::{Path, PathBuf};

/// porter project configuration
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PorterConfig {
    /// Default source project root (CLI --source overrides)
    pub source: Option<PathBuf>,

    /// Default staging root (CLI --temp overrides)
    pub staging: Option<PathBuf>,

    /// Destination subdirectory name (default: source root's directory name)
    pub project: Option<String>,

    /// Extra directory names excluded from directory migration
    pub exclude: Vec<String>,
}

/// Config file name
pub const CONFIG_FILE: &str = ".porter.toml";

/// Staging root used when neither the CLI nor the config names one
pub const DEFAULT_STAGING_DIR: &str = "temp";

impl PorterConfig {
    /// Load config from `dir`.
    ///
    /// Returns default config if .porter.toml doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(dir: &Path) -> color_eyre::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}
