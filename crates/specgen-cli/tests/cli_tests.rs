//! End-to-end tests that invoke the compiled `specgen` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MINIMAL_SPEC: &str = "Name: foo
Version: 1.0
Release: 1%{?dist}
BuildRoot: %(mktemp -ud %{_tmppath}/%{SOURCE0}-%{version}-%{release}-XXXXXX)

%prep
rm -rf %{buildroot}/*

%clean
rm -rf %{buildroot}
";

fn specgen() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_specgen"));
    for var in ["SPECGEN_CORE_RELEASE", "SPECGEN_CORE_SUMMARY", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_config(dir: &TempDir, file: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, content).unwrap();
    path
}

fn minimal_config(dir: &TempDir) -> PathBuf {
    write_config(dir, "rpm.toml", "[core]\nname = \"foo\"\nversion = \"1.0\"\n")
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_help_lists_commands() {
    specgen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate").and(predicate::str::contains("diff")));
}

#[test]
fn test_generate_minimal() {
    let dir = TempDir::new().unwrap();
    let config = minimal_config(&dir);

    specgen()
        .args(["generate", arg(&config)])
        .assert()
        .success()
        .stdout(MINIMAL_SPEC);
}

#[test]
fn test_generate_from_yaml_and_json() {
    let dir = TempDir::new().unwrap();
    let yaml = write_config(&dir, "rpm.yaml", "core:\n  name: foo\n  version: \"1.0\"\n");
    let json = write_config(&dir, "rpm.json", r#"{"core": {"name": "foo", "version": "1.0"}}"#);

    for config in [yaml, json] {
        specgen()
            .args(["generate", arg(&config)])
            .assert()
            .success()
            .stdout(MINIMAL_SPEC);
    }
}

#[test]
fn test_override_beats_environment() {
    let dir = TempDir::new().unwrap();
    let config = minimal_config(&dir);

    specgen()
        .env("SPECGEN_CORE_RELEASE", "7")
        .env("specgen_core_summary", "From the environment")
        .args(["generate", arg(&config)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Release: 7%{?dist}"))
        .stdout(predicate::str::contains("Summary: From the environment"));

    specgen()
        .env("SPECGEN_CORE_RELEASE", "7")
        .args(["generate", arg(&config), "--set", "core.release=3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Release: 3%{?dist}"));
}

#[cfg(unix)]
#[test]
fn test_non_unicode_environment_is_ignored() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    let config = minimal_config(&dir);

    specgen()
        .env("UNRELATED", OsStr::from_bytes(b"\xff\xfe"))
        .env(OsStr::from_bytes(b"SPECGEN_\xff"), "x")
        .args(["generate", arg(&config)])
        .assert()
        .success()
        .stdout(MINIMAL_SPEC);
}

#[test]
fn test_generate_to_file() {
    let dir = TempDir::new().unwrap();
    let config = minimal_config(&dir);
    let out = dir.path().join("foo.spec");

    specgen()
        .args(["generate", arg(&config), "-o", arg(&out)])
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&out).unwrap(), MINIMAL_SPEC);
}

#[test]
fn test_generate_json() {
    let dir = TempDir::new().unwrap();
    let config = minimal_config(&dir);

    let output = specgen()
        .args(["generate", arg(&config), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["tags"]["Name"], "foo");
    assert_eq!(doc["tags"]["Release"], "1%{?dist}");
    assert_eq!(doc["blocks"]["clean"], serde_json::json!(["rm -rf %{buildroot}"]));
}

#[test]
fn test_missing_required_option_exits_2() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "rpm.toml", "[core]\nname = \"foo\"\n");

    specgen()
        .args(["generate", arg(&config)])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("error[validation]"))
        .stderr(predicate::str::contains("core.version"));
}

#[test]
fn test_wrong_type_exits_2() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        "rpm.toml",
        "[core]\nname = \"foo\"\nversion = \"1.0\"\nrelease = \"soon\"\n",
    );

    specgen()
        .args(["generate", arg(&config)])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("core.release"));
}

#[test]
fn test_unknown_option_exits_2() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        "rpm.toml",
        "[core]\nname = \"foo\"\nversion = \"1.0\"\nlicence = \"MIT\"\n",
    );

    specgen()
        .args(["generate", arg(&config)])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("core.licence"));
}

#[test]
fn test_bad_override_and_format_exit_2() {
    let dir = TempDir::new().unwrap();
    let config = minimal_config(&dir);
    let ini = write_config(&dir, "rpm.ini", "[core]\n");

    specgen()
        .args(["generate", arg(&config), "--set", "release=3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[config-input]"));

    specgen()
        .args(["generate", arg(&ini)])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported configuration format"));
}

#[test]
fn test_missing_config_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");

    specgen()
        .args(["generate", arg(&missing)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[io]"));
}

#[test]
fn test_diff_up_to_date() {
    let dir = TempDir::new().unwrap();
    let config = minimal_config(&dir);
    let spec = dir.path().join("foo.spec");
    fs::write(&spec, MINIMAL_SPEC).unwrap();

    specgen()
        .args(["diff", arg(&config), arg(&spec)])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("is up to date"));
}

#[test]
fn test_diff_reports_changes() {
    let dir = TempDir::new().unwrap();
    let config = minimal_config(&dir);
    let spec = dir.path().join("foo.spec");
    fs::write(&spec, MINIMAL_SPEC).unwrap();

    specgen()
        .args(["diff", arg(&config), arg(&spec), "--set", "core.release=2"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("-Release: 1%{?dist}"))
        .stdout(predicate::str::contains("+Release: 2%{?dist}"))
        .stdout(predicate::str::contains("+++ generated"));
}

#[test]
fn test_extensions_lists_core() {
    specgen()
        .arg("extensions")
        .assert()
        .success()
        .stdout(predicate::str::contains("core"))
        .stdout(predicate::str::contains("v1.0.0"));

    let output = specgen().args(["extensions", "--json"]).output().unwrap();
    assert!(output.status.success());
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(list[0]["name"], "core");
    assert_eq!(list[0]["version"], "1.0.0");
    assert_eq!(list[0]["requires"], serde_json::json!([]));
}

#[test]
fn test_options_lists_core_namespace() {
    specgen()
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("[core]"))
        .stdout(predicate::str::contains("required"))
        .stdout(predicate::str::contains("buildroot"));

    let output = specgen().args(["options", "--json"]).output().unwrap();
    let namespaces: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(namespaces[0]["name"], "core");
    assert_eq!(namespaces[0]["options"][0]["name"], "name");
    assert_eq!(namespaces[0]["options"][0]["required"], true);
    assert_eq!(namespaces[0]["options"][2]["default"], 1);
}
