use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

const MATRIX_WORKFLOW: &str = r#"
name: build
on:
  workflow_call:
    inputs:
      configuration:
        default: Release
jobs:
  build:
    runs-on: ubuntu-latest
    strategy:
      matrix:
        os: [linux, mac]
        arch: [x64, arm64]
    steps:
      - uses: actions/checkout@v4
      - run: echo ${{ inputs.configuration }} ${{ matrix.os }} ${{ matrix.arch }}
"#;

fn workspace_with(name: &str, content: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let workflows = dir.path().join(".github/workflows");
    std::fs::create_dir_all(&workflows).unwrap();
    std::fs::write(workflows.join(name), content).unwrap();
    dir
}

#[test]
fn test_dry_prints_script() {
    let dir = workspace_with("build.yml", MATRIX_WORKFLOW);

    cargo_bin_cmd!("ghx")
        .current_dir(dir.path())
        .args(["dry", "build", "--wsl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("echo job 'build': matrix count=4"))
        .stdout(predicate::str::contains("echo   configuration=Release"))
        .stdout(predicate::str::contains("echo Release linux x64"))
        .stdout(predicate::str::contains("echo Release mac arm64"));
}

#[test]
fn test_dry_once_keeps_first_combination() {
    let dir = workspace_with("build.yaml", MATRIX_WORKFLOW);

    cargo_bin_cmd!("ghx")
        .current_dir(dir.path())
        .args(["dry", "build.yaml", "--wsl", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("matrix count=4"))
        .stdout(predicate::str::contains("echo Release linux x64"))
        .stdout(predicate::str::contains("echo Release mac").not());
}

#[test]
fn test_dry_reports_compile_error() {
    let dir = workspace_with(
        "bad.yml",
        "jobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - shell: pwsh\n        run: Write-Host hi\n",
    );

    cargo_bin_cmd!("ghx")
        .current_dir(dir.path())
        .args(["dry", "bad", "--wsl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Job 'build' step '#1' specifies shell; custom shells are not supported.",
        ));
}

#[test]
fn test_dry_missing_workflow_declined() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("ghx")
        .current_dir(dir.path())
        .args(["dry", "missing", "--wsl"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Workflow 'missing.yml' not found. Create new? [y/N]: ",
        ));

    assert!(!dir.path().join(".github/workflows/missing.yml").exists());
}

#[test]
fn test_dry_missing_workflow_accepted() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("ghx")
        .current_dir(dir.path())
        .args(["dry", "fresh", "--wsl"])
        .write_stdin("Yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("echo Hello from fresh"));

    assert!(dir.path().join(".github/workflows/fresh.yml").exists());
}

#[test]
fn test_new_scaffolds_workflow() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("ghx")
        .current_dir(dir.path())
        .args(["new", "release"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created workflow template at"));

    let content =
        std::fs::read_to_string(dir.path().join(".github/workflows/release.yml")).unwrap();
    assert!(content.contains("  release:\n"));
    assert!(content.contains("runs-on: ubuntu-latest"));

    cargo_bin_cmd!("ghx")
        .current_dir(dir.path())
        .args(["new", "release"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_new_rejects_bad_name() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("ghx")
        .current_dir(dir.path())
        .args(["new", "nested/ci"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path separators"));

    cargo_bin_cmd!("ghx")
        .current_dir(dir.path())
        .args(["new", "ci.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("use .yml or .yaml"));
}

#[test]
fn test_sleep_zero() {
    cargo_bin_cmd!("ghx").args(["sleep", "0"]).assert().success();
}

#[test]
fn test_cmd_conflicts_with_wsl() {
    cargo_bin_cmd!("ghx")
        .args(["dry", "build", "--cmd", "--wsl"])
        .assert()
        .failure();
}

#[cfg(not(windows))]
#[test]
fn test_run_rejects_cmd_off_windows() {
    let dir = workspace_with("build.yml", MATRIX_WORKFLOW);

    cargo_bin_cmd!("ghx")
        .current_dir(dir.path())
        .args(["run", "build", "--cmd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--cmd is only supported on Windows."));
}
