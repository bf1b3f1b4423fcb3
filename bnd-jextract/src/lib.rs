//! bnd-jextract — drive `jextract` from a declarative C header config.
//!
//! Each `[[library]]` entry of a `bnd-jextract.toml` file names one C header
//! and the symbols to bind from it. The entries are turned into jextract
//! command lines and executed one after another; the first failure stops the
//! run.
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use bnd_jextract::Overrides;
//! use bnd_jextract::host::StandaloneHost;
//!
//! // Reads bnd-jextract.toml and invokes jextract once per [[library]].
//! let mut host = StandaloneHost::default();
//! bnd_jextract::run(Path::new("bnd-jextract.toml"), &mut host, &Overrides::default()).unwrap();
//! ```
//!
//! Or build the task in code:
//!
//! ```no_run
//! use bnd_jextract::model::{LibraryDefinition, TaskSettings};
//! use bnd_jextract::runner::ProcessRunner;
//! use bnd_jextract::task::GenerationTask;
//!
//! let defs = vec![
//!     LibraryDefinition::from_header("/usr/include/zlib.h")
//!         .target_package("org.zlib")
//!         .functions(["zlibVersion"])
//!         .libraries(["z"]),
//! ];
//! let mut task = GenerationTask::new(TaskSettings::default(), defs);
//! task.run(None, &mut ProcessRunner).unwrap();
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

pub mod args;
pub mod config;
pub mod error;
pub mod host;
pub mod model;
pub mod resolve;
pub mod runner;
pub mod task;

use host::{BuildHost, HostWiring};
use runner::{CommandRunner, ProcessRunner};
use task::{GenerationTask, Invocation};

/// Command-line level overrides of the configuration file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub toolchain: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Run the full pipeline: load config, invoke jextract for every library
/// definition, then hand the resulting wiring to `host`.
///
/// Returns the wiring that was handed to the host.
pub fn run(
    config_path: &Path,
    host: &mut dyn BuildHost,
    overrides: &Overrides,
) -> Result<HostWiring> {
    let task = load_task(config_path, overrides)?;
    run_task(task, host, &mut ProcessRunner).map(|(wiring, _)| wiring)
}

/// Load a config file into a ready-to-run [`GenerationTask`].
pub fn load_task(config_path: &Path, overrides: &Overrides) -> Result<GenerationTask> {
    let cfg = config::load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let (mut settings, definitions) = cfg.into_task_parts(base_dir);
    if let Some(toolchain) = &overrides.toolchain {
        settings.toolchain = Some(toolchain.clone());
    }
    if let Some(output_dir) = &overrides.output_dir {
        settings.output_dir = output_dir.clone();
    }

    info!(
        definitions = definitions.len(),
        source_mode = settings.source_mode,
        output = %settings.output_dir.display(),
        "loaded configuration"
    );
    Ok(GenerationTask::new(settings, definitions))
}

/// Execute `task` with `runner` and wire the output into `host` once every
/// definition succeeded.
pub fn run_task(
    mut task: GenerationTask,
    host: &mut dyn BuildHost,
    runner: &mut dyn CommandRunner,
) -> Result<(HostWiring, Vec<Invocation>)> {
    let invocations = task
        .run(host.toolchain(), runner)
        .context("jextract task failed")?;

    let wiring = HostWiring::new(task.settings());
    host.wire(&wiring).context("wiring generated output into the host")?;
    Ok((wiring, invocations))
}
