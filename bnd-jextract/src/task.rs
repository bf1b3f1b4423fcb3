//! The generation task: one jextract invocation per library definition.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::args::{build_arguments, display_command};
use crate::error::{Error, Result};
use crate::model::{LibraryDefinition, TaskSettings};
use crate::resolve;
use crate::runner::{CommandRunner, ProcessOutput};

/// Progress of a task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Resolving,
    /// Working on the definition at this index.
    Invoking(usize),
    Succeeded,
    Failed,
}

/// A finished jextract invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub index: usize,
    pub header: PathBuf,
    /// Command line for display only; `args` is the exact vector.
    pub command: String,
    pub args: Vec<OsString>,
    pub output: ProcessOutput,
}

/// Settings plus the fully constructed, ordered list of definitions.
#[derive(Debug)]
pub struct GenerationTask {
    settings: TaskSettings,
    definitions: Vec<LibraryDefinition>,
    state: TaskState,
}

impl GenerationTask {
    pub fn new(settings: TaskSettings, definitions: Vec<LibraryDefinition>) -> Self {
        Self {
            settings,
            definitions,
            state: TaskState::Idle,
        }
    }

    pub fn settings(&self) -> &TaskSettings {
        &self.settings
    }

    pub fn definitions(&self) -> &[LibraryDefinition] {
        &self.definitions
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Resolve the executable and invoke it for every definition.
    ///
    /// `host_toolchain` is consulted when the settings name no toolchain,
    /// before falling back to `JAVA_HOME` and `PATH`.
    pub fn run(
        &mut self,
        host_toolchain: Option<PathBuf>,
        runner: &mut dyn CommandRunner,
    ) -> Result<Vec<Invocation>> {
        self.state = TaskState::Resolving;
        let toolchain = resolve::select_toolchain(
            self.settings.toolchain.as_deref(),
            host_toolchain,
            std::env::var_os("JAVA_HOME"),
        );
        let executable = match resolve::resolve_from_env(toolchain.as_deref()) {
            Ok(exe) => exe,
            Err(e) => {
                self.state = TaskState::Failed;
                return Err(e);
            }
        };
        info!(executable = %executable.display(), "resolved jextract");
        self.run_with_executable(&executable, runner)
    }

    /// Invoke `executable` for every definition in order, stopping at the
    /// first failure. Output of earlier definitions stays on disk.
    ///
    /// Every definition is checked before the first launch, so an
    /// incomplete definition anywhere in the list launches nothing.
    pub fn run_with_executable(
        &mut self,
        executable: &Path,
        runner: &mut dyn CommandRunner,
    ) -> Result<Vec<Invocation>> {
        let prepared = match self.prepare() {
            Ok(prepared) => prepared,
            Err(e) => {
                self.state = TaskState::Failed;
                return Err(e);
            }
        };

        let mut invocations = Vec::with_capacity(prepared.len());
        for (index, (header, args)) in prepared.into_iter().enumerate() {
            self.state = TaskState::Invoking(index);
            match invoke(index, header, args, executable, runner) {
                Ok(inv) => invocations.push(inv),
                Err(e) => {
                    self.state = TaskState::Failed;
                    return Err(e);
                }
            }
        }
        self.state = TaskState::Succeeded;
        info!(
            definitions = invocations.len(),
            output = %self.settings.output_dir.display(),
            "jextract finished"
        );
        Ok(invocations)
    }

    /// Header and argument vector of every definition, in order.
    fn prepare(&self) -> Result<Vec<(PathBuf, Vec<OsString>)>> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| -> Result<(PathBuf, Vec<OsString>)> {
                let args = build_arguments(index, definition, &self.settings)?;
                // build_arguments has already checked that the header is set.
                let header = definition.header.clone().unwrap_or_default();
                Ok((header, args))
            })
            .collect()
    }
}

fn invoke(
    index: usize,
    header: PathBuf,
    args: Vec<OsString>,
    executable: &Path,
    runner: &mut dyn CommandRunner,
) -> Result<Invocation> {
    let command = display_command(executable, &args);

    info!(index, %command, "executing jextract");
    let output = runner.run(executable, &args)?;
    debug!(index, stdout = %output.stdout, stderr = %output.stderr, "jextract output");

    if !output.success() {
        warn!(index, code = ?output.code, stderr = %output.stderr, "jextract failed");
        return Err(Error::GeneratorFailed {
            index,
            header,
            code: output.code,
            command,
            args,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }

    Ok(Invocation {
        index,
        header,
        command,
        args,
        output,
    })
}
