// e2e/cli.rs: black-box tests of the `sdflate` binary.
//
// Runs the binary through std::process::Command against files in a temporary
// directory and through stdin/stdout pipes. Covers round trips, container
// selection, exit codes and verbosity.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn sdflate() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sdflate"))
}

fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "Streaming over fixed buffers.\n".repeat(400)).unwrap();
    (dir, input)
}

fn run(args: &[&str], cwd: &Path) -> std::process::Output {
    Command::new(sdflate())
        .args(args)
        .current_dir(cwd)
        .env_remove("SDFLATE_CLEVEL")
        .env_remove("SDFLATE_BUFFER_SIZE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run sdflate")
}

// ── 1. File round trip per container ─────────────────────────────────────────

#[test]
fn test_cli_round_trip_every_container() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    for container in ["deflate", "gzip", "gzip-no-header", "zlib"] {
        let packed = dir.path().join(format!("packed.{container}"));
        let unpacked = dir.path().join(format!("unpacked.{container}"));

        let out = run(
            &[
                "--container",
                container,
                "-l",
                "max",
                input.to_str().unwrap(),
                packed.to_str().unwrap(),
            ],
            dir.path(),
        );
        assert!(out.status.success(), "{container}: compress should exit 0");
        assert!(fs::metadata(&packed).unwrap().len() < original.len() as u64);

        let out = run(
            &[
                "-d",
                "--container",
                container,
                packed.to_str().unwrap(),
                unpacked.to_str().unwrap(),
            ],
            dir.path(),
        );
        assert!(out.status.success(), "{container}: decompress should exit 0");
        assert_eq!(fs::read(&unpacked).unwrap(), original, "{container}");
    }
}

// ── 2. Gzip output is readable by flate2 ─────────────────────────────────────

#[test]
fn test_cli_gzip_output_is_standard() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("input.txt.gz");
    let out = run(
        &[
            "-C",
            "compress.container=gzip",
            input.to_str().unwrap(),
            packed.to_str().unwrap(),
        ],
        dir.path(),
    );
    assert!(out.status.success());

    let z = fs::read(&packed).unwrap();
    let mut plain = Vec::new();
    std::io::Read::read_to_end(&mut flate2::read::GzDecoder::new(&z[..]), &mut plain).unwrap();
    assert_eq!(plain, fs::read(&input).unwrap());
}

// ── 3. stdin / stdout pipes ──────────────────────────────────────────────────

#[test]
fn test_cli_pipes() {
    let payload = b"piped through sdflate and back again ".repeat(50);
    let mut child = Command::new(sdflate())
        .args(["-q", "--container", "zlib"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&payload).unwrap();
    let packed = child.wait_with_output().unwrap();
    assert!(packed.status.success());

    let mut child = Command::new(sdflate())
        .args(["-q", "-d", "--container", "zlib", "-", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&packed.stdout).unwrap();
    let unpacked = child.wait_with_output().unwrap();
    assert!(unpacked.status.success());
    assert_eq!(unpacked.stdout, payload);
}

// ── 4. Failures exit non-zero ────────────────────────────────────────────────

#[test]
fn test_cli_corrupt_input_fails() {
    let (dir, input) = make_temp_input();
    let out = run(
        &["-d", "--container", "gzip", input.to_str().unwrap(), "-"],
        dir.path(),
    );
    assert!(!out.status.success(), "plain text is not a gzip stream");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error"), "stderr: {stderr}");
}

#[test]
fn test_cli_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let out = run(&["does-not-exist.bin", "out.bin"], dir.path());
    assert!(!out.status.success());
}

#[test]
fn test_cli_bad_setting_fails() {
    let (dir, input) = make_temp_input();
    let out = run(
        &["-C", "compress.level=11", input.to_str().unwrap(), "-"],
        dir.path(),
    );
    assert!(!out.status.success());
    let out = run(&["-C", "nonsense", input.to_str().unwrap(), "-"], dir.path());
    assert!(!out.status.success());
}

#[test]
fn test_cli_rejects_unknown_level() {
    let (dir, input) = make_temp_input();
    let out = run(&["-l", "9", input.to_str().unwrap(), "-"], dir.path());
    assert!(!out.status.success());
}

// ── 5. Version and quiet mode ────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let out = run(&["--version"], Path::new("."));
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "stdout: {stdout}");
}

#[test]
fn test_cli_quiet_suppresses_summary() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("quiet.z");
    let out = run(
        &["-qq", input.to_str().unwrap(), packed.to_str().unwrap()],
        dir.path(),
    );
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}
