use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("tmdb2folder").unwrap();
    // Keep tests offline and deterministic
    cmd.env_remove("TMDB_API_KEY");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_flag() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Match media directories"));
}

#[test]
fn test_version_flag() {
    bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_roots() {
    bin()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_missing_root_is_not_an_error() {
    let dir = tempdir().unwrap();

    bin()
        .current_dir(dir.path())
        .arg("/nonexistent/media/root")
        .assert()
        .success()
        .stderr(predicate::str::contains("All folders have been processed"));
}

#[test]
fn test_empty_root_completes_without_api_key() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("movies");
    std::fs::create_dir(&root).unwrap();

    bin()
        .current_dir(dir.path())
        .arg(root.to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("All folders have been processed"));
}

#[test]
fn test_default_ledger_created_in_working_directory() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("movies");
    std::fs::create_dir(&root).unwrap();

    bin()
        .current_dir(dir.path())
        .arg(root.to_str().unwrap())
        .assert()
        .success();

    assert!(dir.path().join("already_processed.log").exists());
}

#[test]
fn test_pending_folder_without_api_key_fails() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("movies");
    std::fs::create_dir(&root).unwrap();
    std::fs::create_dir(root.join("Heat")).unwrap();

    bin()
        .current_dir(dir.path())
        .arg(root.to_str().unwrap())
        .assert()
        .code(3) // ExitCode::ApiError
        .stderr(predicate::str::contains("TMDB_API_KEY"));
}

#[test]
fn test_ledgered_folders_are_excluded() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("movies");
    std::fs::create_dir(&root).unwrap();
    let folder = root.join("Heat (1995) [id-949]");
    std::fs::create_dir(&folder).unwrap();

    let ledger = dir.path().join("ledger.log");
    std::fs::write(&ledger, format!("{}\n", folder.display())).unwrap();

    // Everything is already finalized, so the run completes without
    // needing an API key.
    bin()
        .current_dir(dir.path())
        .args(["--ledger", ledger.to_str().unwrap(), root.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("All folders have been processed"));
}

#[test]
fn test_ledger_is_not_rewritten() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("movies");
    std::fs::create_dir(&root).unwrap();
    let folder = root.join("Heat (1995) [id-949]");
    std::fs::create_dir(&folder).unwrap();

    let ledger = dir.path().join("ledger.log");
    let content = format!("{}\n", folder.display());
    std::fs::write(&ledger, &content).unwrap();

    bin()
        .current_dir(dir.path())
        .args(["--ledger", ledger.to_str().unwrap(), root.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&ledger).unwrap(), content);
}

#[test]
fn test_verbose_flag() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("movies");
    std::fs::create_dir(&root).unwrap();

    bin()
        .current_dir(dir.path())
        .args(["-v", root.to_str().unwrap()])
        .assert()
        .success();
}
