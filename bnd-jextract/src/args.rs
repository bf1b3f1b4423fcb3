//! Translate a [`LibraryDefinition`] into a jextract command line.

use std::ffi::OsString;

use crate::error::ConfigError;
use crate::model::{LibraryDefinition, TaskSettings};

fn push_pair(args: &mut Vec<OsString>, flag: &str, value: &str) {
    args.push(flag.into());
    args.push(value.into());
}

/// Build the argument vector for one definition.
///
/// `index` is the definition's position in the task and is only used for
/// error reporting. The order of flags is fixed and repeated flags keep the
/// order of their source list. Absent fields contribute nothing.
pub fn build_arguments(
    index: usize,
    definition: &LibraryDefinition,
    settings: &TaskSettings,
) -> Result<Vec<OsString>, ConfigError> {
    let header = definition
        .header
        .as_ref()
        .ok_or(ConfigError::MissingRequiredField {
            index,
            field: "header",
        })?;
    let target_package =
        definition
            .target_package
            .as_ref()
            .ok_or(ConfigError::MissingRequiredField {
                index,
                field: "target_package",
            })?;

    let mut args: Vec<OsString> = Vec::new();

    if settings.source_mode {
        args.push("--source".into());
    }
    if let Some(clang) = &settings.clang_args {
        push_pair(&mut args, "-C", clang);
    }

    let repeated = [
        ("--include-function", &definition.functions),
        ("--include-macro", &definition.macros),
        ("--include-struct", &definition.structs),
        ("--include-typedef", &definition.typedefs),
        ("--include-union", &definition.unions),
        ("--include-var", &definition.variables),
        ("-D", &definition.defined_macros),
        ("-I", &definition.includes),
    ];
    for (flag, entries) in repeated {
        for entry in entries.iter().flatten() {
            push_pair(&mut args, flag, entry);
        }
    }

    if let Some(libraries) = &definition.libraries {
        if libraries.is_empty() {
            return Err(ConfigError::EmptyLibraries { index });
        }
        for library in libraries {
            push_pair(&mut args, "-l", library);
        }
    }

    push_pair(&mut args, "--target-package", target_package);
    if let Some(class_name) = &definition.class_name {
        push_pair(&mut args, "--header-class-name", class_name);
    }

    args.push(settings.output_flag.as_str().into());
    args.push(settings.output_dir.clone().into_os_string());
    args.push(header.clone().into_os_string());

    Ok(args)
}

/// Render a command line for logs and error messages. Never executed.
pub fn display_command(program: &std::path::Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
