mod error;

pub use error::RunError;

use crate::filter::LineFilter;
use crate::options::ScanOptions;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::Command;
use std::thread;
use tracing::{debug, info, warn};

/// Runs the configured command on a fixed interval and forwards the lines
/// that pass the filter.
pub struct Runner {
    options: ScanOptions,
    filter: LineFilter,
    output: Option<BufWriter<File>>,
}

impl Runner {
    /// Compiles the patterns and truncates the output file, if any.
    pub fn new(options: ScanOptions) -> Result<Self, RunError> {
        let filter = LineFilter::new(&options.grep_regex, &options.reverse_grep_regex)?;
        if filter.is_passthrough() {
            debug!("no patterns set, forwarding every line");
        }

        let output = match &options.output_file {
            Some(path) => {
                let file = File::create(path).map_err(|e| RunError::OpenOutput {
                    path: path.clone(),
                    source: e,
                })?;
                Some(BufWriter::new(file))
            }
            None => None,
        };

        Ok(Self {
            options,
            filter,
            output,
        })
    }

    /// Runs the command once and returns the lines that were kept.
    pub fn run_once(&mut self) -> Result<Vec<String>, RunError> {
        let command = &self.options.command;
        debug!(command = %command, args = ?self.options.args, "running command");

        let output = Command::new(command)
            .args(&self.options.args)
            .output()
            .map_err(|e| RunError::Spawn {
                command: command.clone(),
                source: e,
            })?;

        if !output.status.success() {
            warn!(command = %command, status = %output.status, "command exited unsuccessfully");
        }
        if !output.stderr.is_empty() {
            debug!(stderr = %String::from_utf8_lossy(&output.stderr).trim_end(), "command stderr");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let kept: Vec<String> = self
            .filter
            .apply(&stdout)
            .into_iter()
            .map(str::to_string)
            .collect();

        if !self.options.silent {
            let mut out = io::stdout().lock();
            for line in &kept {
                writeln!(out, "{line}")?;
            }
            out.flush()?;
        }

        if let Some(file) = &mut self.output {
            for line in &kept {
                writeln!(file, "{line}")?;
            }
            file.flush()?;
        }

        Ok(kept)
    }

    /// Runs forever, sleeping `interval` between runs. Only returns on error.
    pub fn run(&mut self) -> Result<(), RunError> {
        info!(
            command = %self.options.command,
            interval = ?self.options.interval,
            "starting"
        );
        loop {
            let kept = self.run_once()?;
            debug!(lines = kept.len(), "run finished");
            thread::sleep(self.options.interval);
        }
    }
}
