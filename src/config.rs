//! Configuration for the book catalog tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (catalog.toml)
//! - Environment variables (CATALOG__*)
//!
//! ## Example config file (catalog.toml):
//! ```toml
//! [input]
//! path = "./data.json"
//!
//! [validation]
//! normalize_case = false
//! error_policy = "fail_fast"
//!
//! [output]
//! format = "pretty"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Input settings
    #[serde(default)]
    pub input: InputConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// JSON file holding the array of book records
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

/// Validation configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Lower-case every text field before validating it
    #[serde(default)]
    pub normalize_case: bool,

    /// What to do with invalid records
    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

/// How a batch run treats invalid records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort on the first invalid record
    #[default]
    FailFast,
    /// Validate everything and report each failure
    Collect,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    /// Serialize `value` in this format
    pub fn to_json<T: Serialize>(&self, value: &T) -> serde_json::Result<String> {
        match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from("./data.json")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration, adding a specific file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["catalog.toml", ".catalog.toml", "config/catalog.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "book-catalog") {
            let xdg_config = config_dir.config_dir().join("catalog.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Environment variables (CATALOG__VALIDATION__NORMALIZE_CASE=true)
        builder = builder.add_source(
            Environment::with_prefix("CATALOG")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Input path, resolved against the working directory when relative
    pub fn input_path(&self) -> std::io::Result<PathBuf> {
        if self.input.path.is_absolute() {
            Ok(self.input.path.clone())
        } else {
            Ok(std::env::current_dir()?.join(&self.input.path))
        }
    }
}
