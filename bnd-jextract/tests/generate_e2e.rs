//! End-to-end runs against a stand-in jextract shell script.
//!
//! The script logs every invocation, writes one file per header into the
//! output directory and fails for any header named `bad.h`.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use bnd_jextract::error::Error;
use bnd_jextract::host::StandaloneHost;
use bnd_jextract::model::{LibraryDefinition, TaskSettings};
use bnd_jextract::resolve::{Platform, resolve_executable};
use bnd_jextract::runner::ProcessRunner;
use bnd_jextract::task::{GenerationTask, TaskState};
use bnd_jextract::{Overrides, run, run_task};

struct FakeJdk {
    _dir: tempfile::TempDir,
    home: PathBuf,
    log: PathBuf,
    root: PathBuf,
}

fn fake_jdk() -> FakeJdk {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let home = root.join("jdk");
    let bin = home.join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let log = root.join("invocations.log");

    let script = format!(
        r#"#!/bin/sh
echo "$@" >> '{log}'
out=""
prev=""
header=""
for a in "$@"; do
  if [ "$prev" = "-d" ]; then out="$a"; fi
  prev="$a"
  header="$a"
done
case "$header" in
  *bad.h) echo "$header:1:1: error: unknown type name" >&2; exit 3 ;;
esac
mkdir -p "$out"
name=$(basename "$header" .h)
echo "class $name {{}}" > "$out/$name.java"
echo "generated $name"
"#,
        log = log.display()
    );
    let exe = bin.join("jextract");
    std::fs::write(&exe, script).unwrap();
    std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

    FakeJdk {
        _dir: dir,
        home,
        log,
        root,
    }
}

fn logged(log: &Path) -> Vec<String> {
    std::fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn def(root: &Path, header: &str) -> LibraryDefinition {
    LibraryDefinition::from_header(root.join(header)).target_package("org.example")
}

#[test]
fn second_failure_stops_the_run() {
    let jdk = fake_jdk();
    let out = jdk.root.join("out");
    let settings = TaskSettings {
        toolchain: Some(jdk.home.clone()),
        output_dir: out.clone(),
        ..TaskSettings::default()
    };
    let defs = vec![
        def(&jdk.root, "first.h"),
        def(&jdk.root, "bad.h"),
        def(&jdk.root, "third.h"),
    ];
    let mut task = GenerationTask::new(settings, defs);

    let err = task.run(None, &mut ProcessRunner).unwrap_err();

    assert_eq!(task.state(), TaskState::Failed);
    match &err {
        Error::GeneratorFailed {
            index,
            code,
            stderr,
            command,
            ..
        } => {
            assert_eq!(*index, 1);
            assert_eq!(*code, Some(3));
            assert!(stderr.contains("unknown type name"), "{stderr}");
            assert!(command.contains("bad.h"), "{command}");
        }
        other => panic!("expected GeneratorFailed, got {other}"),
    }

    // First output stays on disk, third definition never ran.
    assert!(out.join("first.java").exists());
    assert!(!out.join("third.java").exists());
    let calls = logged(&jdk.log);
    assert_eq!(calls.len(), 2, "{calls:?}");
    assert!(calls.iter().all(|c| !c.contains("third.h")));
}

#[test]
fn successful_run_wires_host() {
    let jdk = fake_jdk();
    let out = jdk.root.join("out");
    let settings = TaskSettings {
        toolchain: Some(jdk.home.clone()),
        output_dir: out.clone(),
        source_mode: true,
        ..TaskSettings::default()
    };
    let task = GenerationTask::new(settings, vec![def(&jdk.root, "a.h"), def(&jdk.root, "b.h")]);
    let mut host = StandaloneHost::default();

    let (wiring, invocations) = run_task(task, &mut host, &mut ProcessRunner).unwrap();

    assert_eq!(invocations.len(), 2);
    assert_eq!(invocations[0].output.stdout, "generated a\n");
    assert!(out.join("a.java").exists());
    assert!(out.join("b.java").exists());
    assert_eq!(host.wiring.as_ref(), Some(&wiring));
    assert_eq!(wiring.source_dirs, [out]);
    assert!(wiring.archive_includes.is_empty());

    let calls = logged(&jdk.log);
    assert!(calls[0].starts_with("--source --target-package org.example -d "), "{}", calls[0]);
}

#[test]
fn failed_run_does_not_wire_host() {
    let jdk = fake_jdk();
    let settings = TaskSettings {
        toolchain: Some(jdk.home.clone()),
        output_dir: jdk.root.join("out"),
        ..TaskSettings::default()
    };
    let task = GenerationTask::new(settings, vec![def(&jdk.root, "bad.h")]);
    let mut host = StandaloneHost::default();

    let err = run_task(task, &mut host, &mut ProcessRunner).unwrap_err();

    assert!(host.wiring.is_none());
    let msg = format!("{err:#}");
    assert!(msg.contains("stderr:"), "{msg}");
    assert!(msg.contains("unknown type name"), "{msg}");
}

#[test]
fn runs_from_config_file() {
    let jdk = fake_jdk();
    let config = jdk.root.join("bnd-jextract.toml");
    std::fs::write(
        &config,
        format!(
            r#"
toolchain = "{}"
output_dir = "gen"

[[library]]
header = "include/zlib.h"
target_package = "org.zlib"
functions = ["zlibVersion"]
libraries = ["z"]
"#,
            jdk.home.display()
        ),
    )
    .unwrap();
    let mut host = StandaloneHost::default();

    let wiring = run(&config, &mut host, &Overrides::default()).unwrap();

    assert!(jdk.root.join("gen/zlib.java").exists());
    assert_eq!(wiring.archive_includes, ["**/*.class"]);
    let calls = logged(&jdk.log);
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("--include-function zlibVersion -l z --target-package org.zlib"));
    assert!(calls[0].ends_with("include/zlib.h"));
}

#[test]
fn unusable_toolchain_fails_before_any_definition() {
    // bin/jextract is a directory, so resolution stops there whatever PATH
    // holds.
    let tmp = tempfile::tempdir().unwrap();
    let jdk = tmp.path().join("jdk");
    std::fs::create_dir_all(jdk.join("bin/jextract")).unwrap();
    let settings = TaskSettings {
        toolchain: Some(jdk.clone()),
        output_dir: tmp.path().join("out"),
        ..TaskSettings::default()
    };
    let mut task = GenerationTask::new(settings, vec![def(tmp.path(), "a.h")]);

    let err = task.run(None, &mut ProcessRunner).unwrap_err();

    assert!(
        matches!(err, Error::IsDirectory(ref p) if *p == jdk.join("bin/jextract")),
        "got {err}"
    );
    assert_eq!(task.state(), TaskState::Failed);
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn missing_toolchain_binary_names_checked_locations() {
    let tmp = tempfile::tempdir().unwrap();
    let jdk = tmp.path().join("no-jdk");

    let err = resolve_executable(Some(&jdk), None, Platform::current()).unwrap_err();

    assert!(matches!(err, Error::ExecutableNotFound { .. }), "got {err}");
    assert!(err.to_string().contains("no-jdk/bin/jextract"), "{err}");
}
