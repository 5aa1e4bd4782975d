use crate::args::Args;
use crate::config::{ConfigError, load_config};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

/// Everything the runner needs for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub command: String,
    pub args: Vec<String>,
    pub reverse_grep_regex: Vec<String>,
    pub grep_regex: Vec<String>,
    pub config_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub silent: bool,
    pub interval: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            command: String::new(),
            args: Vec::new(),
            reverse_grep_regex: Vec::new(),
            grep_regex: Vec::new(),
            config_file: None,
            output_file: None,
            silent: false,
            interval: DEFAULT_INTERVAL,
        }
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("command not found")]
    MissingCommand,

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<Args> for ScanOptions {
    /// The `-g` and `-r` values are always pushed, so an unset flag leaves an
    /// empty pattern at index 0.
    fn from(args: Args) -> Self {
        let mut positional = args.command.into_iter();
        Self {
            command: positional.next().unwrap_or_default(),
            args: positional.collect(),
            reverse_grep_regex: vec![args.reverse_grep],
            grep_regex: vec![args.grep],
            config_file: non_empty_path(args.config),
            output_file: non_empty_path(args.output),
            silent: args.silent,
            interval: args.interval,
        }
    }
}

fn non_empty_path(value: Option<String>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

pub fn parse_options<I, T>(argv: I) -> Result<ScanOptions, OptionsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(argv)?;
    resolve_options(args)
}

/// Turns parsed flags into the final options, merging the config file when
/// one was given. The command may come from either source but must be set
/// by the end: a config file that leaves it empty is rejected here rather
/// than handed to the runner.
pub fn resolve_options(args: Args) -> Result<ScanOptions, OptionsError> {
    let options = ScanOptions::from(args);

    let options = match options.config_file.clone() {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load_config(options, &path)?
        }
        None => options,
    };

    if options.command.is_empty() {
        return Err(OptionsError::MissingCommand);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_become_command_and_args() {
        let options = parse_options(["watchgrep", "ls", "-la", "/tmp"]).unwrap();
        assert_eq!(options.command, "ls");
        assert_eq!(options.args, vec!["-la".to_string(), "/tmp".to_string()]);
    }

    #[test]
    fn command_without_arguments_has_empty_args() {
        let options = parse_options(["watchgrep", "date"]).unwrap();
        assert_eq!(options.command, "date");
        assert!(options.args.is_empty());
    }

    #[test]
    fn grep_flags_fill_single_pattern() {
        let options = parse_options(["watchgrep", "-g", "foo", "-r", "bar", "echo"]).unwrap();
        assert_eq!(options.grep_regex, vec!["foo".to_string()]);
        assert_eq!(options.reverse_grep_regex, vec!["bar".to_string()]);
    }

    #[test]
    fn unset_grep_flags_leave_empty_sentinel() {
        let options = parse_options(["watchgrep", "echo"]).unwrap();
        assert_eq!(options.grep_regex, vec![String::new()]);
        assert_eq!(options.reverse_grep_regex, vec![String::new()]);
    }

    #[test]
    fn defaults_without_flags() {
        let options = parse_options(["watchgrep", "echo"]).unwrap();
        assert_eq!(options.interval, DEFAULT_INTERVAL);
        assert!(!options.silent);
        assert_eq!(options.output_file, None);
        assert_eq!(options.config_file, None);
    }

    #[test]
    fn parses_silent_interval_and_output() {
        let options =
            parse_options(["watchgrep", "-s", "-i", "500ms", "-o", "out.log", "uptime"]).unwrap();
        assert!(options.silent);
        assert_eq!(options.interval, Duration::from_millis(500));
        assert_eq!(options.output_file, Some(PathBuf::from("out.log")));
    }

    #[test]
    fn flags_after_command_belong_to_command() {
        let options = parse_options(["watchgrep", "grep", "-s", "-i", "x"]).unwrap();
        assert_eq!(options.command, "grep");
        assert_eq!(options.args, vec!["-s", "-i", "x"]);
        assert!(!options.silent);
        assert_eq!(options.interval, DEFAULT_INTERVAL);
    }

    #[test]
    fn unknown_flag_before_command_is_rejected() {
        let err = parse_options(["watchgrep", "-x", "echo"]).unwrap_err();
        assert!(matches!(err, OptionsError::Cli(_)));

        let err = parse_options(["watchgrep", "-x"]).unwrap_err();
        assert!(matches!(err, OptionsError::Cli(_)));
    }

    #[test]
    fn repeated_flags_keep_last_value() {
        let options = parse_options([
            "watchgrep", "-s", "-s", "-g", "a", "-g", "b", "-r", "x", "-r", "y", "-i", "1s", "-i",
            "2s", "-o", "first.log", "-o", "second.log", "echo",
        ])
        .unwrap();
        assert_eq!(options.grep_regex, vec!["b"]);
        assert_eq!(options.reverse_grep_regex, vec!["y"]);
        assert_eq!(options.interval, Duration::from_secs(2));
        assert_eq!(options.output_file, Some(PathBuf::from("second.log")));
        assert!(options.silent);
    }

    #[test]
    fn missing_command_is_an_error() {
        let err = parse_options(["watchgrep", "-s"]).unwrap_err();
        assert!(matches!(err, OptionsError::MissingCommand));
    }

    #[test]
    fn command_is_required_after_config_merge() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("watchgrep.json");
        std::fs::write(&path, r#"{"grep": ["x"]}"#).unwrap();

        let err = parse_options(["watchgrep", "-c", path.to_str().unwrap()]).unwrap_err();
        assert!(matches!(err, OptionsError::MissingCommand));
    }

    #[test]
    fn empty_output_means_stdout() {
        let options = parse_options(["watchgrep", "-o", "", "echo"]).unwrap();
        assert_eq!(options.output_file, None);
    }

    #[test]
    fn invalid_interval_is_a_cli_error() {
        let err = parse_options(["watchgrep", "-i", "soon", "echo"]).unwrap_err();
        assert!(matches!(err, OptionsError::Cli(_)));
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let err = parse_options(["watchgrep", "-c", "/nonexistent/watchgrep.json"]).unwrap_err();
        assert!(matches!(err, OptionsError::Config(ConfigError::Read { .. })));
    }
}
