//! TOML configuration.
//!
//! ```toml
//! [glossary]
//! path = "my-glossary.json"
//! replace_default = false
//!
//! [provider]
//! kind = "lexicon"
//! lexicon = "lexicon.tsv"
//! url = "http://localhost:8080/annotate"
//! timeout_secs = 10
//!
//! [output]
//! format = "interlinear"
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GlossaryError};
use crate::glossary::{GlossaryBuilder, GlossaryTable};
use crate::provider::ProviderConfig;
use crate::render::OutputFormat;

/// Configuration file name inside the user config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossConfig {
    pub glossary: GlossaryConfig,
    pub provider: ProviderConfig,
    pub output: OutputConfig,
}

/// Where glossary entries come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryConfig {
    /// Extra glossary file (`.json` or `.tsv`)
    pub path: Option<PathBuf>,

    /// Use only `path`, dropping the embedded entries
    pub replace_default: bool,
}

impl GlossaryConfig {
    /// Build the glossary this configuration describes
    pub fn build(&self) -> Result<GlossaryTable, GlossaryError> {
        let Some(ref path) = self.path else {
            return Ok((*GlossaryTable::embedded()).clone());
        };

        let mut builder = if self.replace_default {
            GlossaryBuilder::new()
        } else {
            GlossaryBuilder::from_table(&GlossaryTable::embedded())
        };
        builder.load_file(path)?;
        debug!("glossary has {} entries", builder.len());
        Ok(builder.build())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl GlossConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file. Relative paths inside it are resolved
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content, path)?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, else the user config file if it exists, else
    /// the defaults
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(path) = p.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        };
        resolve(&mut self.glossary.path);
        resolve(&mut self.provider.lexicon);
    }
}

/// `<config dir>/gloss-rs/config.toml`, when the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gloss-rs").join(CONFIG_FILE_NAME))
}
