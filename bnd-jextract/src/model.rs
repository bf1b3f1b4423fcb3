//! Library definitions and task-level settings.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// One generation unit: a single C header translated into one set of
/// bindings.
///
/// List fields are `Option<Vec<_>>`: `None` means "do not pass this flag
/// category at all", which is not the same as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryDefinition {
    /// The header file parsed by jextract.
    pub header: Option<PathBuf>,
    /// The package under which all bindings are generated.
    pub target_package: Option<String>,
    /// Name of the generated header class.
    pub class_name: Option<String>,
    /// Native libraries the bindings load (`-l`).
    pub libraries: Option<Vec<String>>,
    /// Header search directories (`-I`).
    pub includes: Option<Vec<String>>,
    pub functions: Option<Vec<String>>,
    pub macros: Option<Vec<String>>,
    pub structs: Option<Vec<String>>,
    pub typedefs: Option<Vec<String>>,
    pub unions: Option<Vec<String>>,
    pub variables: Option<Vec<String>>,
    /// Additional C preprocessor definitions (`-D`).
    pub defined_macros: Option<Vec<String>>,
}

fn to_vec<I, S>(items: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Some(items.into_iter().map(Into::into).collect())
}

impl LibraryDefinition {
    /// Start a definition for `header`. The remaining fields are filled in
    /// with the chained setters below.
    pub fn from_header(header: impl Into<PathBuf>) -> Self {
        Self {
            header: Some(header.into()),
            ..Self::default()
        }
    }

    pub fn target_package(mut self, package: impl Into<String>) -> Self {
        self.target_package = Some(package.into());
        self
    }

    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    pub fn libraries<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.libraries = to_vec(items);
        self
    }

    pub fn includes<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.includes = to_vec(items);
        self
    }

    pub fn functions<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.functions = to_vec(items);
        self
    }

    pub fn macros<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.macros = to_vec(items);
        self
    }

    pub fn structs<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.structs = to_vec(items);
        self
    }

    pub fn typedefs<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.typedefs = to_vec(items);
        self
    }

    pub fn unions<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.unions = to_vec(items);
        self
    }

    pub fn variables<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.variables = to_vec(items);
        self
    }

    pub fn defined_macros<I: IntoIterator<Item = S>, S: Into<String>>(mut self, items: I) -> Self {
        self.defined_macros = to_vec(items);
        self
    }

    /// Resolve a relative `header` against `base_dir`. Absolute paths are
    /// kept as-is.
    pub(crate) fn resolve_header(&mut self, base_dir: &Path) {
        if let Some(header) = self.header.as_mut().filter(|h| h.is_relative()) {
            *header = base_dir.join(&*header);
        }
    }
}

/// Which output-directory flag the target jextract understands.
///
/// The incubator-era jextract (the one accepting `--source`, `-C` and the
/// `--include-*` filters) takes `-d`; later releases renamed it to
/// `--output`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFlag {
    #[default]
    D,
    Output,
}

impl OutputFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFlag::D => "-d",
            OutputFlag::Output => "--output",
        }
    }
}

/// Settings shared by every definition of one task run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSettings {
    /// JDK home containing `bin/jextract`. `None` defers to the host and the
    /// process environment.
    pub toolchain: Option<PathBuf>,
    /// Single pass-through string for clang (`-C`).
    pub clang_args: Option<String>,
    /// Generate sources instead of precompiled class files.
    pub source_mode: bool,
    /// Where jextract writes its output.
    pub output_dir: PathBuf,
    pub output_flag: OutputFlag,
}

/// Output location used when the configuration does not name one.
pub const DEFAULT_OUTPUT_DIR: &str = "build/generated/sources/jextract/main/java";

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            toolchain: None,
            clang_args: None,
            source_mode: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_flag: OutputFlag::default(),
        }
    }
}
