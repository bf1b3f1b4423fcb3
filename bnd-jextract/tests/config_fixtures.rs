//! Load the checked-in fixture configs and check the command lines they
//! produce, without running jextract.

use std::path::{Path, PathBuf};

use bnd_jextract::Overrides;
use bnd_jextract::args::build_arguments;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/fixtures")
        .join(name)
        .join("bnd-jextract.toml")
}

#[test]
fn simple_fixture_builds_expected_commands() {
    let path = fixture("simple");
    let task = bnd_jextract::load_task(&path, &Overrides::default()).unwrap();
    let base = path.parent().unwrap();

    assert_eq!(task.definitions().len(), 2);
    assert!(task.settings().source_mode);
    assert_eq!(task.settings().output_dir, base.join("generated"));

    let args = build_arguments(0, &task.definitions()[0], task.settings()).unwrap();
    let args: Vec<String> = args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let header = base.join("simple.h").display().to_string();
    let out = base.join("generated").display().to_string();
    assert_eq!(
        args,
        [
            "--source",
            "-C",
            "-std=c11",
            "--include-function",
            "simple_add",
            "--include-function",
            "simple_version",
            "--include-struct",
            "SimplePoint",
            "-D",
            "SIMPLE_API=",
            "-I",
            ".",
            "-l",
            "simple",
            "--target-package",
            "org.example.simple",
            "--header-class-name",
            "Simple",
            "-d",
            out.as_str(),
            header.as_str(),
        ]
    );

    let second = build_arguments(1, &task.definitions()[1], task.settings()).unwrap();
    assert!(!second.iter().any(|a| a == "-l"));
    assert!(!second.iter().any(|a| a == "--header-class-name"));
}

#[test]
fn overrides_replace_config_values() {
    let overrides = Overrides {
        toolchain: Some(PathBuf::from("/opt/jdk")),
        output_dir: Some(PathBuf::from("/tmp/out")),
    };
    let task = bnd_jextract::load_task(&fixture("simple"), &overrides).unwrap();
    assert_eq!(task.settings().toolchain, Some(PathBuf::from("/opt/jdk")));
    assert_eq!(task.settings().output_dir, PathBuf::from("/tmp/out"));
}

#[test]
fn missing_target_package_is_a_configuration_error() {
    let task = bnd_jextract::load_task(&fixture("invalid"), &Overrides::default()).unwrap();
    let err = build_arguments(0, &task.definitions()[0], task.settings()).unwrap_err();
    assert!(
        err.to_string().contains("target_package"),
        "error should name the missing field, got: {err}"
    );
}

#[test]
fn missing_config_file_names_the_path() {
    let path = Path::new("/nonexistent/bnd-jextract.toml");
    let err = bnd_jextract::load_task(path, &Overrides::default()).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("/nonexistent/bnd-jextract.toml"), "{msg}");
}
