use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn rkdump(dir: &TempDir, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_rkdump"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.bin"), [0xDE, 0xAD]).unwrap();
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn single_file_succeeds() {
    let dir = workspace();
    let output = rkdump(&dir, &["a.bin"], "");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "files['a.bin'] = {\nstart: 0x0000,\nend: 0x0002,\nentry: 0x0000,\nimage:\n\"\\xDE\\xAD\"\n};\n\n"
    );
}

#[test]
fn missing_file_fails() {
    let dir = workspace();
    let output = rkdump(&dir, &["nope.bin"], "");
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("unable to open file [nope.bin]"));
}

#[test]
fn name_without_extension_fails() {
    let dir = workspace();
    let output = rkdump(&dir, &["noext"], "");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("has no extension"));
}

#[test]
fn batch_succeeds() {
    let dir = workspace();
    let output = rkdump(&dir, &[], "a.bin\n");
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("function preloaded_files() {\n"));
    assert!(text.contains("files['a.bin'] = {\n"));
    assert!(text.ends_with("return files;\n}\n"));
}

#[test]
fn batch_aborts_on_missing_name() {
    let dir = workspace();
    let output = rkdump(&dir, &[], "a.bin\nx.bin\n");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unable to open file [x.bin]"));
    assert!(!stdout(&output).contains("return files;"));
}

#[test]
fn keep_going_finishes_but_fails() {
    let dir = workspace();
    let output = rkdump(&dir, &["--keep-going"], "x.bin\na.bin\n");
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("function preloaded_files() {\n"));
    assert!(text.contains("files['a.bin'] = {\n"));
    assert!(!text.contains("x.bin"));
    assert!(text.ends_with("return files;\n}\n"));
}

#[test]
fn output_flag_writes_the_file() {
    let dir = workspace();
    let output = rkdump(&dir, &["-o", "out.js"], "a.bin\n");
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    let written = fs::read_to_string(dir.path().join("out.js")).unwrap();
    assert!(written.starts_with("function preloaded_files() {\n"));
    assert!(written.contains("files['a.bin'] = {\n"));
    assert!(written.ends_with("return files;\n}\n"));
}
