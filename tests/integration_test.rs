use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";
const FOX_DIGEST: &str = "3:FJKKIUKact:FHIGi";

fn spamsum_exe() -> &'static str {
    env!("CARGO_BIN_EXE_spamsum")
}

fn run(args: &[&str]) -> Output {
    Command::new(spamsum_exe())
        .args(args)
        .output()
        .expect("Failed to run spamsum")
}

fn stdout_line(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "spamsum failed:\nstdout: {}\nstderr: {}",
        stdout,
        stderr
    );
    stdout.trim_end().to_string()
}

fn lcg_bytes(seed: u32, len: usize) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect()
}

fn write_file(dir: &Path, name: &str, data: &[u8]) -> String {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_hash_file_with_name() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_file(temp.path(), "fox.txt", FOX);

    let line = stdout_line(&run(&[&path]));
    assert_eq!(line, format!("{},\"{}\"", FOX_DIGEST, path));
}

#[test]
fn test_bare_output() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_file(temp.path(), "fox.txt", FOX);

    assert_eq!(stdout_line(&run(&["--bare", &path])), FOX_DIGEST);
}

#[test]
fn test_mmap_and_streaming_agree() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_file(temp.path(), "random.bin", &lcg_bytes(7, 100_000));

    let streamed = stdout_line(&run(&["--bare", "--buffer-size", "1000", &path]));
    let mapped = stdout_line(&run(&["--bare", "--mmap", &path]));
    assert_eq!(streamed, "12288:bJLKvWqv:bJgBv");
    assert_eq!(streamed, mapped);
}

#[test]
fn test_empty_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_file(temp.path(), "empty", b"");

    assert_eq!(stdout_line(&run(&["--bare", &path])), "3::");
    assert_eq!(stdout_line(&run(&["--bare", "--mmap", &path])), "3::");
}

#[test]
fn test_stdin_input() {
    let mut child = Command::new(spamsum_exe())
        .args(["--bare", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(FOX).unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(stdout_line(&output), FOX_DIGEST);
}

#[test]
fn test_missing_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("does-not-exist.bin");

    let output = run(&[missing.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does-not-exist.bin"), "stderr: {}", stderr);
}

#[test]
fn test_rejects_mmap_with_stdin() {
    let output = run(&["--mmap", "-"]);
    assert!(!output.status.success());
}
