use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logger::Logger;
use crate::output::{FileOutput, StreamOutput};
use crate::tag::Tag;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Declarative logger setup loaded from a TOML file.
///
/// ```toml
/// console = true
///
/// [file]
/// path = "logs/application.log"
///
/// [[default_tag]]
/// key = "log_level"
/// value = "info"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggerConfig {
    /// Register a stdout stream sink.
    pub console: bool,
    /// Register a file sink. `None` disables file logging.
    pub file: Option<FileSinkConfig>,
    #[serde(rename = "default_tag")]
    pub default_tags: Vec<DefaultTagConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    pub path: String,
    /// Reserved for rotation support; accepted and ignored.
    pub max_size: Option<u64>,
    /// Reserved for rotation support; accepted and ignored.
    pub rollover_count: u32,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            path: "application.log".to_string(),
            max_size: None,
            rollover_count: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultTagConfig {
    pub key: String,
    pub value: TagValueConfig,
}

/// Tag value as written in the config file. Untagged so plain TOML
/// scalars map onto the tag value kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValueConfig {
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
}

impl DefaultTagConfig {
    fn to_tag(&self) -> Tag {
        match &self.value {
            TagValueConfig::Bool(value) => Tag::bool(self.key.clone(), *value),
            TagValueConfig::Int(value) => Tag::int64(self.key.clone(), *value),
            TagValueConfig::Double(value) => Tag::double(self.key.clone(), *value),
            TagValueConfig::Str(value) => Tag::str(self.key.clone(), value.clone()),
        }
    }
}

impl LoggerConfig {
    /// Construct a logger with the configured sinks and default tags.
    /// File sinks open lazily, so a bad path surfaces as silently
    /// dropped lines rather than a build failure.
    pub fn build(&self) -> Logger {
        let logger = Logger::new();
        if let Some(file) = &self.file {
            let mut sink = FileOutput::new(file.path.clone());
            sink.max_size = file.max_size;
            sink.rollover_count = file.rollover_count;
            logger.add_output(sink);
        }
        if self.console {
            logger.add_output(StreamOutput::stdout());
        }
        for tag in &self.default_tags {
            logger.add_default_tag(tag.to_tag());
        }
        logger
    }
}

/// Load a [`LoggerConfig`] from a TOML file.
pub fn load_config(path: &Path) -> Result<LoggerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}
