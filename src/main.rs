use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing::Level;

use watchgrep::args::Args;
use watchgrep::error::WatchgrepError;
use watchgrep::options::{OptionsError, resolve_options};
use watchgrep::runner::Runner;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(WatchgrepError::Options(OptionsError::MissingCommand)) => {
            eprintln!("Command not found\n");
            eprintln!("{}", Args::command().render_help());
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), WatchgrepError> {
    let options = resolve_options(args)?;
    let mut runner = Runner::new(options)?;
    runner.run()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
