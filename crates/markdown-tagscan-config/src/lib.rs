use markdown_tagscan_engine::ScanOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid input pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to read a match of input pattern {pattern:?}: {source}")]
    PatternIo {
        pattern: String,
        source: glob::GlobError,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanOptions,
    /// Files to scan when none are named on the command line. Entries may
    /// use `~`, `$VAR` and glob patterns.
    pub inputs: Vec<String>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-tagscan");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `inputs` into concrete file paths, in pattern order.
    ///
    /// A pattern without glob characters that matches nothing is kept as a
    /// literal path so the caller can report the missing file.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let mut paths = Vec::new();
        for pattern in &self.inputs {
            let expanded =
                shellexpand::full(pattern).map_err(|err| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: err.to_string(),
                })?;
            let matches = glob::glob(&expanded).map_err(|err| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                reason: err.to_string(),
            })?;

            let before = paths.len();
            for entry in matches {
                paths.push(entry.map_err(|source| ConfigError::PatternIo {
                    pattern: pattern.clone(),
                    source,
                })?);
            }
            if paths.len() == before && !Self::is_glob(&expanded) {
                paths.push(PathBuf::from(expanded.as_ref()));
            }
        }
        Ok(paths)
    }

    fn is_glob(pattern: &str) -> bool {
        pattern.contains(['*', '?', '['])
    }
}
