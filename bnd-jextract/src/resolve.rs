//! Locate the jextract executable.
//!
//! The toolchain directory is chosen in this order: the explicit setting,
//! then the host's toolchain service, then `JAVA_HOME`. The executable is
//! looked up as `<toolchain>/bin/<name>` first and then in every entry of
//! the executable search path.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Operating-system family, which decides the executable name and the
/// search-path separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn executable_name(self) -> &'static str {
        match self {
            Platform::Unix => "jextract",
            Platform::Windows => "jextract.bat",
        }
    }

    fn path_separator(self) -> char {
        match self {
            Platform::Unix => ':',
            Platform::Windows => ';',
        }
    }
}

/// Pick the toolchain directory: explicit setting, then the host-provided
/// one, then `java_home` (normally the `JAVA_HOME` environment variable).
pub fn select_toolchain(
    explicit: Option<&Path>,
    host: Option<PathBuf>,
    java_home: Option<OsString>,
) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or(host)
        .or_else(|| java_home.filter(|h| !h.is_empty()).map(PathBuf::from))
}

/// Resolve the executable from an explicit search path value.
///
/// This does not read the process environment; see [`resolve_from_env`].
pub fn resolve_executable(
    toolchain: Option<&Path>,
    search_path: Option<&OsStr>,
    platform: Platform,
) -> Result<PathBuf> {
    let name = platform.executable_name();
    let mut checked = Vec::new();

    if let Some(toolchain) = toolchain {
        let candidate = toolchain.join("bin").join(name);
        if let Some(found) = check_candidate(&candidate)? {
            return Ok(found);
        }
        checked.push(candidate);
    }

    for entry in search_entries(search_path, platform) {
        let candidate = entry.join(name);
        if let Some(found) = check_candidate(&candidate)? {
            return Ok(found);
        }
        checked.push(candidate);
    }

    Err(Error::ExecutableNotFound {
        executable: name.to_string(),
        checked,
    })
}

/// Split a search path into directories.
///
/// On Unix an empty entry means the current directory; Windows skips it.
/// Entries stay `OsStr` on the running platform, so non-UTF-8 directories
/// are searched as-is.
fn search_entries(search_path: Option<&OsStr>, platform: Platform) -> Vec<PathBuf> {
    let Some(search_path) = search_path else {
        return Vec::new();
    };
    let entries: Vec<PathBuf> = if platform == Platform::current() {
        std::env::split_paths(search_path).collect()
    } else {
        search_path
            .to_string_lossy()
            .split(platform.path_separator())
            .map(PathBuf::from)
            .collect()
    };
    entries
        .into_iter()
        .filter_map(|entry| match platform {
            _ if !entry.as_os_str().is_empty() => Some(entry),
            Platform::Unix => Some(PathBuf::from(".")),
            Platform::Windows => None,
        })
        .collect()
}

/// Resolve using `PATH` from the current process environment.
pub fn resolve_from_env(toolchain: Option<&Path>) -> Result<PathBuf> {
    let path = std::env::var_os("PATH");
    resolve_executable(toolchain, path.as_deref(), Platform::current())
}

/// `Ok(None)` when nothing exists at `candidate`.
fn check_candidate(candidate: &Path) -> Result<Option<PathBuf>> {
    let Ok(meta) = std::fs::metadata(candidate) else {
        debug!(path = %candidate.display(), "no executable here");
        return Ok(None);
    };
    if meta.is_dir() {
        return Err(Error::IsDirectory(candidate.to_path_buf()));
    }
    if !is_executable(&meta) {
        return Err(Error::NotExecutable(candidate.to_path_buf()));
    }
    let absolute = std::path::absolute(candidate).unwrap_or_else(|_| candidate.to_path_buf());
    debug!(path = %absolute.display(), "found executable");
    Ok(Some(absolute))
}

#[cfg(unix)]
fn is_executable(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &std::fs::Metadata) -> bool {
    true
}
