//! Configuration types for `bnd-jextract.toml`.
//!
//! ```toml
//! toolchain = "/opt/jdk-17-panama"
//! source_mode = true
//! output_dir = "generated"
//!
//! [[library]]
//! header = "include/foo.h"
//! target_package = "com.example.foo"
//! functions = ["foo_init", "foo_close"]
//! libraries = ["foo"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::model::{DEFAULT_OUTPUT_DIR, LibraryDefinition, OutputFlag, TaskSettings};

/// Root configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// JDK home containing `bin/jextract`.
    #[serde(default)]
    pub toolchain: Option<PathBuf>,
    /// Arguments passed through to clang as one string.
    #[serde(default)]
    pub clang_args: Option<String>,
    #[serde(default)]
    pub source_mode: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub output_flag: OutputFlag,
    /// Generation units, invoked in the order listed.
    #[serde(default)]
    pub library: Vec<LibraryDefinition>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Config {
    /// Split into task settings and definitions, resolving relative
    /// `toolchain`, `output_dir` and `header` paths against `base_dir`.
    pub fn into_task_parts(self, base_dir: &Path) -> (TaskSettings, Vec<LibraryDefinition>) {
        let resolve = |p: PathBuf| {
            if p.is_relative() {
                base_dir.join(p)
            } else {
                p
            }
        };

        let settings = TaskSettings {
            toolchain: self.toolchain.map(resolve),
            clang_args: self.clang_args,
            source_mode: self.source_mode,
            output_dir: resolve(self.output_dir),
            output_flag: self.output_flag,
        };
        let definitions = self
            .library
            .into_iter()
            .map(|mut def| {
                def.resolve_header(base_dir);
                def
            })
            .collect();
        (settings, definitions)
    }
}

/// Load and parse a `bnd-jextract.toml` configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;
    parse_config(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))
}

pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}
