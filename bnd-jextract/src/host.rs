//! Boundary to the build system hosting the generation task.
//!
//! The task never inspects the host. It asks the host for a toolchain and
//! hands back a [`HostWiring`] describing what downstream compile, run and
//! archive steps must add so the generated code is visible.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::model::TaskSettings;

/// Module the generated bindings depend on.
pub const FOREIGN_MODULE: &str = "jdk.incubator.foreign";

/// What the host must add to its build once generation succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostWiring {
    /// Directories to add as source roots.
    pub source_dirs: Vec<PathBuf>,
    /// Compile and runtime classpath entries.
    pub classpath: Vec<PathBuf>,
    /// Patterns under the output directory to bundle into archives. Empty in
    /// source mode, where the compiler produces the classes itself.
    pub archive_includes: Vec<String>,
    /// Extra arguments for the Java compiler.
    pub compiler_args: Vec<String>,
    /// Extra arguments for test and application JVMs.
    pub jvm_args: Vec<String>,
    /// `java` and `javadoc` of an explicitly configured toolchain, for hosts
    /// that must compile and run with the same JDK.
    pub toolchain_executables: Vec<PathBuf>,
}

impl HostWiring {
    pub fn new(settings: &TaskSettings) -> Self {
        let out = settings.output_dir.clone();
        let archive_includes = if settings.source_mode {
            Vec::new()
        } else {
            vec!["**/*.class".to_string()]
        };
        let toolchain_executables = settings
            .toolchain
            .as_deref()
            .map(|home| {
                ["java", "javadoc"]
                    .iter()
                    .map(|exe| home.join("bin").join(exe))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            source_dirs: vec![out.clone()],
            classpath: vec![out],
            archive_includes,
            compiler_args: vec!["--add-modules".into(), FOREIGN_MODULE.into()],
            jvm_args: vec![
                "--enable-native-access=ALL-UNNAMED".into(),
                "--add-modules".into(),
                FOREIGN_MODULE.into(),
            ],
            toolchain_executables,
        }
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.classpath.first().map(PathBuf::as_path)
    }
}

/// A build system that hosts the generation task.
pub trait BuildHost {
    /// Toolchain discovered by the host, consulted when none is configured.
    fn toolchain(&self) -> Option<PathBuf> {
        None
    }

    /// Called once after every definition was generated successfully.
    fn wire(&mut self, wiring: &HostWiring) -> anyhow::Result<()>;
}

/// Host that only records the wiring. Used when the task runs standalone.
#[derive(Debug, Default)]
pub struct StandaloneHost {
    pub wiring: Option<HostWiring>,
}

impl BuildHost for StandaloneHost {
    fn wire(&mut self, wiring: &HostWiring) -> anyhow::Result<()> {
        self.wiring = Some(wiring.clone());
        Ok(())
    }
}
