//! Integration tests for the command line (-s/-l/-x/-w flags)

use std::fs;
use std::path::PathBuf;
use std::process::Command;

struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("gridlink-cli-{}-{}", std::process::id(), name));
        fs::create_dir_all(&dir).expect("Failed to create temp dir");
        // Tests must not depend on a user's ~/.config/gridlink/gridlink.toml.
        fs::write(dir.join("gridlink.toml"), "").expect("Failed to write config");
        TempDir(dir)
    }

    fn file(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    fn sheet_arg(&self, id: &str) -> String {
        format!("{}={}", id, self.file(&format!("{}.grd", id)).display())
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn run_command(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        .arg("-c")
        .arg(dir.file("gridlink.toml"))
        .args(args)
        .env_remove("GRIDLINK_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_copy_prints_worksheets() {
    let dir = TempDir::new("copy");
    fs::write(dir.file("raw.grd"), "C3: \"foofoo\"\nD4: ok\n").unwrap();
    let raw = dir.sheet_arg("raw");
    let report = dir.sheet_arg("report");

    let (stdout, _, code) = run_command(
        &dir,
        &["-s", &raw, "-s", &report, "-x", "raw!C3:D4", "report!A1", "replace(foo:bar)"],
    );

    assert_eq!(code, 0);
    assert!(stdout.contains("# report\n"));
    assert!(stdout.contains("A1: \"barbar\"\nB2: \"ok\"\n"));
    // Nothing is written without --write.
    assert!(!dir.file("report.grd").exists());
}

#[test]
fn test_write_saves_cells_and_links() {
    let dir = TempDir::new("write");
    fs::write(dir.file("a.grd"), "A1: \"x\"\n").unwrap();
    let a = dir.sheet_arg("a");
    let b = dir.sheet_arg("b");

    let (_, _, code) = run_command(
        &dir,
        &["-s", &a, "-s", &b, "-l", "a", "b", "-x", "a!A1", "b!B2", "copy()", "-w"],
    );
    assert_eq!(code, 0);

    let saved_b = fs::read_to_string(dir.file("b.grd")).unwrap();
    assert!(saved_b.contains("#! sources: a\n"));
    assert!(saved_b.contains("B2: \"x\"\n"));
    let saved_a = fs::read_to_string(dir.file("a.grd")).unwrap();
    assert!(saved_a.contains("#! targets: b\n"));

    // Links come back from the files; linking again only reports duplicates.
    let (_, stderr, code) = run_command(&dir, &["-s", &a, "-s", &b, "-l", "a", "b"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("a already added to b"));
}

#[test]
fn test_parse_failure_exit_code() {
    let dir = TempDir::new("parse");
    let a = dir.sheet_arg("a");

    let (stdout, stderr, code) = run_command(&dir, &["-s", &a, "-x", "a!c3", "a!A1", "copy()"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("I cannot parse a!c3"));
}

#[test]
fn test_unknown_command_abandons_batch() {
    let dir = TempDir::new("unknown");
    fs::write(dir.file("a.grd"), "A1: 1\n").unwrap();
    let a = dir.sheet_arg("a");

    let (_, stderr, code) = run_command(
        &dir,
        &["-s", &a, "-x", "a!A1", "a!B1", "copy()", "-x", "a!A1", "a!C1", "frobnicate()", "-w"],
    );

    assert_eq!(code, 1);
    assert!(stderr.contains("unknown command frobnicate"));
    assert_eq!(fs::read_to_string(dir.file("a.grd")).unwrap(), "A1: 1\n");
}

#[test]
fn test_missing_endpoint_exit_code() {
    let dir = TempDir::new("missing");
    let a = dir.sheet_arg("a");

    let (_, stderr, code) = run_command(&dir, &["-s", &a, "-x", "a!A1", "nowhere!A1", "copy()"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("no worksheet with id nowhere"));
}

#[test]
fn test_bad_option() {
    let dir = TempDir::new("option");
    let (_, stderr, code) = run_command(&dir, &["--frobnicate"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown option: --frobnicate"));
}
