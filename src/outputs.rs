#![allow(clippy::module_name_repetitions)]
//! Rendered file writer, named outputs and failure reporting.
//!
//! Workflow command policy:
//! - Named outputs go to the `GITHUB_OUTPUT` command file when configured;
//!   otherwise the legacy `::set-output` command is printed to stdout.
//! - Failures are printed as `::error::` commands to stdout.
//! - Command data is escaped so a multi-line message stays one command.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::errors::RenderError;

pub const OUTPUT_PREFIX: &str = "task-definition-";
pub const OUTPUT_SUFFIX: &str = ".json";

/// Create a new, uniquely named file under `dir`, write `contents` and keep it.
pub fn write_rendered(dir: &Path, contents: &str) -> Result<PathBuf, RenderError> {
    let mut file = tempfile::Builder::new()
        .prefix(OUTPUT_PREFIX)
        .suffix(OUTPUT_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| RenderError::io(dir, e))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| RenderError::io(file.path(), e))?;
    let (_, path) = file.keep().map_err(|e| RenderError::io(dir, e.error))?;
    Ok(path)
}

/// Receiver of the run's named outputs and terminal failure.
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), RenderError>;
    fn set_failed(&mut self, message: &str);
}

pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

fn random_delimiter() -> String {
    let mut buf = [0u8; 16];
    // Fall back to a fixed suffix only if the OS RNG is unavailable.
    if getrandom::getrandom(&mut buf).is_err() {
        return "ghadelimiter_taskdef_render".to_string();
    }
    let hex: String = buf.iter().map(|b| format!("{b:02x}")).collect();
    format!("ghadelimiter_{hex}")
}

/// Format one entry for the output command file.
pub fn command_file_entry(name: &str, value: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        let delim = random_delimiter();
        format!("{name}<<{delim}\n{value}\n{delim}\n")
    } else {
        format!("{name}={value}\n")
    }
}

/// Sink that speaks the runner's workflow command protocol.
#[derive(Debug)]
pub struct CommandFileSink<W: Write> {
    output_file: Option<PathBuf>,
    stdout: W,
}

impl CommandFileSink<io::Stdout> {
    pub fn stdout(output_file: Option<PathBuf>) -> Self {
        Self::new(output_file, io::stdout())
    }
}

impl<W: Write> CommandFileSink<W> {
    pub fn new(output_file: Option<PathBuf>, stdout: W) -> Self {
        Self {
            output_file,
            stdout,
        }
    }

    pub fn into_inner(self) -> W {
        self.stdout
    }
}

impl<W: Write> OutputSink for CommandFileSink<W> {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), RenderError> {
        match &self.output_file {
            Some(path) => {
                let mut f = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| RenderError::io(path, e))?;
                f.write_all(command_file_entry(name, value).as_bytes())
                    .map_err(|e| RenderError::io(path, e))
            }
            None => writeln!(
                self.stdout,
                "::set-output name={}::{}",
                escape_property(name),
                escape_data(value)
            )
            .map_err(|e| RenderError::io("<stdout>", e)),
        }
    }

    fn set_failed(&mut self, message: &str) {
        // Nothing left to report to if stdout itself is gone.
        let _ = writeln!(self.stdout, "::error::{}", escape_data(message));
    }
}

/// Sink that records everything in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySink {
    pub outputs: Vec<(String, String)>,
    pub failure: Option<String>,
}

impl OutputSink for MemorySink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), RenderError> {
        self.outputs.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn set_failed(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }
}
