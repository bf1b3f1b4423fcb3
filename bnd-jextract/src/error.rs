//! Error taxonomy for a generation run.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A library definition that cannot be turned into a command line.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("library definition #{index}: required field `{field}` is not set")]
    MissingRequiredField { index: usize, field: &'static str },

    #[error("library definition #{index}: `libraries` is present but empty; at least one library has to be specified")]
    EmptyLibraries { index: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{executable} could not be found (checked {})", format_checked(.checked))]
    ExecutableNotFound {
        executable: String,
        checked: Vec<PathBuf>,
    },

    #[error("{} exists but is not executable", .0.display())]
    NotExecutable(PathBuf),

    #[error("{} is a directory, expected an executable", .0.display())]
    IsDirectory(PathBuf),

    #[error("failed to launch {}: {source}", .program.display())]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for {} to exit: {source}", .program.display())]
    WaitFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to capture {stream} of {}: {reason}", .program.display())]
    StreamCapture {
        program: PathBuf,
        stream: &'static str,
        reason: String,
    },

    #[error(
        "invoking jextract failed for library definition #{index} ({}), exit code {}\n\n command: {command}\n args: {args:?}\n stdout: {stdout}\n stderr: {stderr}",
        .header.display(),
        format_code(.code)
    )]
    GeneratorFailed {
        index: usize,
        header: PathBuf,
        code: Option<i32>,
        /// Display form of the command line.
        command: String,
        /// The exact argument vector passed to the executable.
        args: Vec<OsString>,
        stdout: String,
        stderr: String,
    },
}

impl Error {
    /// True for errors caused by an incomplete library definition.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

fn format_checked(checked: &[PathBuf]) -> String {
    if checked.is_empty() {
        return "no locations".to_string();
    }
    checked
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}
