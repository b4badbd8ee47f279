//! CLI integration tests
//!
//! These tests verify exit codes and output of the resguard binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn library() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "res/values/colors.xml",
        r#"<resources><color name="car_ui_color_accent">#fff</color></resources>"#,
    );
    write(temp.path(), "res/drawable/car_ui_icon_close.xml", "<vector/>");
    write(temp.path(), "res/layout/car_ui_toolbar.xml", "<FrameLayout/>");
    temp
}

fn resguard() -> Command {
    let mut cmd = Command::cargo_bin("resguard").unwrap();
    cmd.env_remove("ANDROID_BUILD_TOP");
    cmd
}

/// Run git in `repo`, returning trimmed stdout, or None when git is unavailable or fails
fn git(repo: &Path, args: &[&str]) -> Option<String> {
    let output = std::process::Command::new("git")
        .args(["-c", "user.name=resguard", "-c", "user.email=resguard@example.com"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(repo)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// A git repository with an initial commit, then a second commit adding `changed`
///
/// Returns the repository and the hash of the second commit.
fn repo_with_commit(changed: &str) -> Option<(TempDir, String)> {
    let temp = TempDir::new().unwrap();
    let repo = temp.path();

    git(repo, &["init", "--quiet"])?;
    write(repo, "README", "initial");
    git(repo, &["add", "."])?;
    git(repo, &["commit", "--quiet", "-m", "initial"])?;

    write(repo, changed, r#"<resources><color name="a">#000</color></resources>"#);
    git(repo, &["add", "."])?;
    git(repo, &["commit", "--quiet", "-m", "change"])?;

    let sha = git(repo, &["rev-parse", "HEAD"])?;
    Some((temp, sha))
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    resguard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("verify-rro"));
}

#[test]
fn test_cli_version() {
    resguard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("resguard"));
}

// ============================================================================
// Generate / Compare
// ============================================================================

#[test]
fn test_generate_then_compare_succeeds_silently() {
    let temp = library();

    resguard()
        .args(["--root", temp.path().to_str().unwrap(), "generate"])
        .assert()
        .success();
    assert!(temp.path().join("tests/apitest/current.xml").exists());
    assert!(temp.path().join("res/values/overlayable.xml").exists());

    resguard()
        .args(["--root", temp.path().to_str().unwrap(), "compare"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_compare_reports_added_and_removed() {
    let temp = library();
    let root = temp.path().to_str().unwrap();

    resguard().args(["--root", root, "generate"]).assert().success();
    fs::remove_file(temp.path().join("res/drawable/car_ui_icon_close.xml")).unwrap();
    write(temp.path(), "res/drawable/car_ui_icon_back.xml", "<vector/>");

    resguard()
        .args(["--root", root, "compare"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Resources removed:"))
        .stdout(predicate::str::contains("<drawable name=\"car_ui_icon_close\">"))
        .stdout(predicate::str::contains("Resources added:"))
        .stdout(predicate::str::contains("<drawable name=\"car_ui_icon_back\">"))
        .stdout(predicate::str::contains("current.xml"));
}

#[test]
fn test_compare_excluding_layouts() {
    let temp = library();
    let root = temp.path().to_str().unwrap();

    resguard().args(["--root", root, "generate"]).assert().success();
    write(temp.path(), "res/layout/car_ui_new_layout.xml", "<FrameLayout/>");

    resguard().args(["--root", root, "compare"]).assert().code(1);
    resguard()
        .args(["--root", root, "compare", "--exclude-layouts"])
        .assert()
        .success();
}

#[test]
fn test_compare_json_output() {
    let temp = library();
    let root = temp.path().to_str().unwrap();

    resguard().args(["--root", root, "generate"]).assert().success();
    write(
        temp.path(),
        "res/values/strings.xml",
        r#"<resources><string name="car_ui_new_string">x</string></resources>"#,
    );

    let output = resguard()
        .args(["--root", root, "compare", "--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["changed"], true);
    assert_eq!(value["added"][0]["name"], "car_ui_new_string");
}

#[test]
fn test_compare_without_manifest_fails() {
    let temp = library();

    resguard()
        .args(["--root", temp.path().to_str().unwrap(), "compare"])
        .assert()
        .failure();
}

#[test]
fn test_malformed_resource_xml_fails() {
    let temp = library();
    write(temp.path(), "res/values/broken.xml", "<resources><string name=\"a\">");

    resguard()
        .args(["--root", temp.path().to_str().unwrap(), "generate"])
        .assert()
        .failure();
}

#[test]
fn test_missing_build_top_is_fatal() {
    resguard()
        .arg("generate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ANDROID_BUILD_TOP"));
}

#[test]
fn test_root_from_build_top() {
    let top = TempDir::new().unwrap();
    let lib = top.path().join("packages/apps/Car/libs/car-ui-lib");
    write(&lib, "res/values/colors.xml", r#"<resources><color name="a">#000</color></resources>"#);

    resguard()
        .env("ANDROID_BUILD_TOP", top.path())
        .arg("generate")
        .assert()
        .success();

    assert!(lib.join("tests/apitest/current.xml").exists());
}

#[test]
fn test_config_file_overrides_layout() {
    let temp = library();
    write(
        temp.path(),
        ".resguard.yml",
        "manifest_dir: api\nmanifest_file: public.xml\noverlayable:\n  enabled: false\n",
    );

    resguard()
        .args(["--root", temp.path().to_str().unwrap(), "generate"])
        .assert()
        .success();

    assert!(temp.path().join("api/public.xml").exists());
    assert!(!temp.path().join("res/values/overlayable.xml").exists());
}

// ============================================================================
// Git change gate
// ============================================================================

#[test]
fn test_sha_outside_library_skips_silently() {
    let Some((repo, sha)) = repo_with_commit("other/notes.xml") else {
        return;
    };

    resguard()
        .current_dir(repo.path())
        .args(["--sha", &sha, "compare"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_sha_outside_library_skips_generate() {
    let Some((repo, sha)) = repo_with_commit("other/notes.xml") else {
        return;
    };

    resguard()
        .current_dir(repo.path())
        .args(["--sha", &sha, "generate"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!repo.path().join("tests/apitest/current.xml").exists());
}

#[test]
fn test_sha_touching_library_runs() {
    let Some((repo, sha)) = repo_with_commit("car-ui-lib/res/values/colors.xml") else {
        return;
    };
    let lib = repo.path().join("car-ui-lib");

    resguard()
        .current_dir(repo.path())
        .args(["--root", lib.to_str().unwrap(), "--sha", &sha, "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    assert!(lib.join("tests/apitest/current.xml").exists());
}

#[test]
fn test_sha_touching_library_needs_a_root() {
    let Some((repo, sha)) = repo_with_commit("car-ui-lib/res/values/colors.xml") else {
        return;
    };

    resguard()
        .current_dir(repo.path())
        .args(["--sha", &sha, "compare"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ANDROID_BUILD_TOP"));
}

// ============================================================================
// RRO verification
// ============================================================================

#[test]
fn test_verify_rro_reports_extras() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("base/res");
    let rro = temp.path().join("rro/res");
    write(&base, "values/dimens.xml", r#"<resources><dimen name="bar">1dp</dimen></resources>"#);
    write(&rro, "values/dimens.xml", r#"<resources><dimen name="foo">1dp</dimen></resources>"#);

    resguard()
        .args(["verify-rro", "-r", rro.to_str().unwrap(), "-b", base.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "RRO attempting to override resources that don't exist:",
        ))
        .stdout(predicate::str::contains("<dimen name=\"foo\">"));
}

#[test]
fn test_verify_rro_passes_against_multiple_bases() {
    let temp = TempDir::new().unwrap();
    let base_one = temp.path().join("base1/res");
    let base_two = temp.path().join("base2/res");
    let rro = temp.path().join("rro/res");
    write(
        &base_one,
        "values/dimens.xml",
        r#"<resources><dimen name="foo">1dp</dimen></resources>"#,
    );
    write(&base_two, "drawable/bg.xml", "<shape/>");
    write(&rro, "values/dimens.xml", r#"<resources><dimen name="foo">2dp</dimen></resources>"#);
    write(&rro, "drawable/bg.xml", "<shape/>");

    resguard()
        .args([
            "verify-rro",
            "--rro",
            rro.to_str().unwrap(),
            "--base",
            base_one.to_str().unwrap(),
            "--base",
            base_two.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verify_rro_requires_both_sides() {
    let temp = TempDir::new().unwrap();

    resguard()
        .args(["verify-rro", "-r", temp.path().to_str().unwrap()])
        .assert()
        .failure();
}
