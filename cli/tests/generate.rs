//! Integration tests for `doxgen generate`, `doxgen log` and `doxgen browse`,
//! driving shell scripts that stand in for Doxygen.
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Echoes its Doxyfile argument and a warning, writes an entry page, exits with `code`.
fn doxygen_body(code: i32) -> String {
    format!(
        r#"echo "Doxyfile: $1"
echo "warning: undocumented member" >&2
out=$(dirname "$1")
mkdir -p "$out/html"
echo "<html></html>" > "$out/html/annotated.html"
exit {}"#,
        code
    )
}

struct Project {
    env: TestEnv,
    doxygen: PathBuf,
    output: PathBuf,
}

fn project_with_doxygen(body: &str) -> Project {
    let env = TestEnv::new();
    let src = env.mkdir("src");
    let output = env.mkdir("docs/api");
    let doxygen = env.fake_doxygen("doxygen", body);
    env.write_config(&format!(
        "[doxygen]\npath = {:?}\n\n{}project = \"My Library\"\nversion = \"1.4.0\"\n",
        doxygen.display().to_string(),
        TestEnv::profile_toml("api", &src, &output)
    ));
    let output = output.canonicalize().unwrap();
    Project {
        env,
        doxygen,
        output,
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

#[test]
fn test_generate_writes_log_and_doxyfile() {
    let p = project_with_doxygen(&doxygen_body(0));
    p.env
        .cmd()
        .args(["generate", "api", "--poll-interval-ms", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ api").and(predicate::str::contains("Generated 1 of 1")));

    let doxyfile = p.output.join("Doxyfile");
    let log = read(&p.output.join("Log.txt"));
    assert!(log.contains(&format!("Doxyfile: {}", doxyfile.display())));
    assert!(log.contains("warning: undocumented member"));
    assert_eq!(log.lines().count(), 2);

    let rendered = read(&doxyfile);
    assert!(rendered.contains("PROJECT_NAME           = \"My Library\""));
    assert!(rendered.contains("PROJECT_NUMBER         = 1.4.0"));
    assert!(rendered.contains(&format!("OUTPUT_DIRECTORY       = \"{}\"", p.output.display())));
}

#[test]
fn test_tool_error_fails_command_but_keeps_log() {
    let p = project_with_doxygen(&doxygen_body(3));
    p.env
        .cmd()
        .args(["generate", "--poll-interval-ms", "10"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Doxygen returned code 3"))
        .stderr(predicate::str::contains("1 of 1 generation run(s) did not succeed"));
    assert!(read(&p.output.join("Log.txt")).contains("warning: undocumented member"));
}

#[test]
fn test_missing_doxygen_fails_before_any_run() {
    let p = project_with_doxygen(&doxygen_body(0));
    p.env
        .cmd()
        .args(["generate", "api", "--doxygen"])
        .arg(p.env.root().join("bin/not-doxygen"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Executable not found"));
    assert!(!p.output.join("Log.txt").exists());
    assert!(!p.output.join("Doxyfile").exists());
}

#[test]
fn test_second_run_replaces_log() {
    let p = project_with_doxygen(&doxygen_body(0));
    p.env.cmd().args(["generate", "api"]).assert().success();
    fs::write(
        &p.doxygen,
        "#!/bin/sh\necho \"second run\"\n",
    )
    .unwrap();
    p.env.cmd().args(["generate", "api"]).assert().success();
    assert_eq!(read(&p.output.join("Log.txt")), "second run\n");
}

#[test]
fn test_profiles_run_independently() {
    let env = TestEnv::new();
    let src = env.mkdir("src");
    let fast_out = env.mkdir("docs/fast");
    let slow_out = env.mkdir("docs/slow");
    let doxygen = env.fake_doxygen(
        "doxygen",
        r#"case "$1" in
  */slow/Doxyfile) sleep 1; echo "slow output" ;;
  *) echo "fast output" ;;
esac"#,
    );
    env.write_config(&format!(
        "[doxygen]\npath = {:?}\n\n{}\n{}",
        doxygen.display().to_string(),
        TestEnv::profile_toml("fast", &src, &fast_out),
        TestEnv::profile_toml("slow", &src, &slow_out)
    ));

    env.cmd()
        .args(["generate", "--poll-interval-ms", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 of 2"));
    assert_eq!(read(&fast_out.join("Log.txt")), "fast output\n");
    assert_eq!(read(&slow_out.join("Log.txt")), "slow output\n");
}

#[test]
fn test_shared_output_directory_is_rejected() {
    let env = TestEnv::new();
    let src = env.mkdir("src");
    let out = env.mkdir("docs");
    let doxygen = env.fake_doxygen("doxygen", "exit 0");
    env.write_config(&format!(
        "[doxygen]\npath = {:?}\n\n{}\n{}",
        doxygen.display().to_string(),
        TestEnv::profile_toml("a", &src, &out),
        TestEnv::profile_toml("b", &src, &out)
    ));
    env.cmd()
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("both write to"));
}

#[test]
fn test_stylesheets_are_staged_and_restored() {
    let p = project_with_doxygen(r#"rm -rf "$(dirname "$1")/html"; echo cleaned"#);
    let assets = p.env.mkdir("assets/stylesheets");
    fs::write(assets.join("theme.css"), "body { color: black; }").unwrap();
    p.env
        .cmd()
        .args(["config", "set", "assets.directory"])
        .arg(p.env.root().join("assets"))
        .assert()
        .success();

    p.env.cmd().args(["generate", "api"]).assert().success();

    let staged = p.output.join("html/theme.css");
    assert_eq!(read(&staged), "body { color: black; }");
    assert!(read(&p.output.join("Doxyfile"))
        .contains(&format!("HTML_EXTRA_STYLESHEET  = \"{}\"", staged.display())));
}

#[test]
fn test_log_and_browse_after_generate() {
    let p = project_with_doxygen(&doxygen_body(0));
    p.env.cmd().args(["generate", "api"]).assert().success();

    p.env
        .cmd()
        .args(["log", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: undocumented member"));
    p.env
        .cmd()
        .args(["browse", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("html/annotated.html"));
}

#[test]
fn test_log_before_generate_fails() {
    let p = project_with_doxygen(&doxygen_body(0));
    p.env
        .cmd()
        .args(["log", "api"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No log for 'api'"));
}
