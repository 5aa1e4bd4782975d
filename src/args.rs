use crate::duration::parse_duration;
use clap::{ArgAction, Parser};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    args_override_self = true,
    about = "Run a command periodically and filter its output with regular expressions"
)]
pub struct Args {
    #[arg(short = 'o', value_name = "FILE", help = "Output file name, default: stdout")]
    pub output: Option<String>,

    #[arg(short = 'c', value_name = "FILE", help = "Config file name")]
    pub config: Option<String>,

    #[arg(
        short = 'g',
        value_name = "PATTERN",
        default_value = "",
        hide_default_value = true,
        help = "Grep filter, skip everything except regex matches. For more than one regex use the config file"
    )]
    pub grep: String,

    #[arg(
        short = 'r',
        value_name = "PATTERN",
        default_value = "",
        hide_default_value = true,
        help = "Reverse grep filter, print everything except regex matches. For more than one regex use the config file"
    )]
    pub reverse_grep: String,

    #[arg(short = 's', help = "Silent mode")]
    pub silent: bool,

    #[arg(
        short = 'i',
        value_name = "DURATION",
        default_value = "3s",
        value_parser = parse_duration,
        help = "Execute time interval, e.g. 5s"
    )]
    pub interval: Duration,

    #[arg(short = 'v', action = ArgAction::Count, help = "Increase log verbosity (repeatable)")]
    pub verbose: u8,

    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        help = "Command to run, followed by its arguments"
    )]
    pub command: Vec<String>,
}
