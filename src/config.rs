use crate::analysis::{FrequencyOptions, KwicOptions, ProcessTable, ProcessType};
use crate::nlp::Pos;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILENAME: &str = "config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Analysis defaults. Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pos: Pos,
    pub top_n: usize,
    pub kwic_window: usize,
    pub max_rows: usize,
    pub min_len: usize,
    pub remove_stopwords: bool,
    pub model_path: Option<PathBuf>,
    pub process_overrides: BTreeMap<String, ProcessType>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pos: Pos::Verb,
            top_n: 30,
            kwic_window: 4,
            max_rows: 50,
            min_len: 2,
            remove_stopwords: true,
            model_path: None,
            process_overrides: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid {
                field: "top_n",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_rows == 0 {
            return Err(ConfigError::Invalid {
                field: "max_rows",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn frequency_options(&self) -> FrequencyOptions {
        FrequencyOptions {
            min_len: self.min_len,
            remove_stopwords: self.remove_stopwords,
        }
    }

    pub fn kwic_options(&self) -> KwicOptions {
        KwicOptions {
            window: self.kwic_window,
            max_rows: self.max_rows,
        }
    }

    pub fn process_table(&self) -> ProcessTable {
        ProcessTable::standard().with_overrides(self.process_overrides.iter().map(|(l, p)| (l.as_str(), *p)))
    }
}

/// Default config location: `<config dir>/sflizer/config.yaml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sflizer")
        .join(CONFIG_FILENAME)
}

pub fn parse(content: &str, origin: &Path) -> Result<Settings, ConfigError> {
    // An empty file deserializes to unit, not a map
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_string_lossy().to_string(),
        source,
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings from `path`, or the default location when `None`.
/// A missing file at the default location yields defaults; an explicitly
/// requested file must exist.
pub fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path(), false),
    };

    if !explicit && !path.exists() {
        debug!("No config at {:?}, using defaults", path);
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    debug!("Loaded config from {:?}", path);
    parse(&content, &path)
}
