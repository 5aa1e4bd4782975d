use crate::duration::{DurationError, parse_duration};
use crate::options::ScanOptions;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// JSON config file. Keys left out keep whatever the flags produced.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    #[serde(rename = "reversegrep")]
    pub reverse_grep: Option<Vec<String>>,
    pub grep: Option<Vec<String>>,
    pub output: Option<String>,
    pub silent: Option<bool>,
    pub interval: Option<IntervalValue>,
}

/// `"5s"` style strings, or a raw nanosecond count.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IntervalValue {
    Nanos(u64),
    Text(String),
}

impl IntervalValue {
    fn to_duration(&self) -> Result<Duration, DurationError> {
        match self {
            IntervalValue::Nanos(n) => Ok(Duration::from_nanos(*n)),
            IntervalValue::Text(s) => parse_duration(s),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error parsing the configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid interval in config file {path}: {source}")]
    Interval {
        path: PathBuf,
        source: DurationError,
    },
}

impl Config {
    /// Overlays every key present in the file onto `base`.
    pub fn apply(self, mut base: ScanOptions) -> Result<ScanOptions, DurationError> {
        if let Some(command) = self.command {
            base.command = command;
        }
        if let Some(args) = self.args {
            base.args = args;
        }
        if let Some(reverse_grep) = self.reverse_grep {
            base.reverse_grep_regex = reverse_grep;
        }
        if let Some(grep) = self.grep {
            base.grep_regex = grep;
        }
        if let Some(output) = self.output {
            base.output_file = (!output.is_empty()).then(|| PathBuf::from(output));
        }
        if let Some(silent) = self.silent {
            base.silent = silent;
        }
        if let Some(interval) = &self.interval {
            base.interval = interval.to_duration()?;
        }
        Ok(base)
    }
}

/// Drops every line containing `#` and joins the rest without separators.
///
/// A `#` anywhere on a line discards the whole line, including `#` inside
/// string values.
pub fn strip_comments(content: &str) -> String {
    content.lines().filter(|line| !line.contains('#')).collect()
}

/// Parses the stripped content. Object keys are matched case-insensitively,
/// so `"Command"` and `"COMMAND"` both set `command`.
pub fn parse_config(content: &str) -> Result<Config, serde_json::Error> {
    let value = match serde_json::from_str::<Value>(&strip_comments(content))? {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect(),
        ),
        other => other,
    };
    serde_json::from_value(value)
}

pub fn load_config(base: ScanOptions, path: &Path) -> Result<ScanOptions, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse_config(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    config.apply(base).map_err(|e| ConfigError::Interval {
        path: path.to_path_buf(),
        source: e,
    })
}
