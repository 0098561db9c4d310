use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

fn run_with_args<C: AsRef<[u8]>>(args: &[&str], code: C) -> Output {
    // Spawn the mua binary and feed code to stdin
    let mut child = Command::new(env!("CARGO_BIN_EXE_mua"))
        .args(args)
        .env_remove("MUA_LOG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(code.as_ref()).unwrap();
        // dropping stdin sends EOF
    }
    child.wait_with_output().unwrap()
}

fn run(code: &str) -> (String, Option<i32>) {
    let out = run_with_args(&[], code);
    (
        String::from_utf8_lossy(&out.stdout).to_string(),
        out.status.code(),
    )
}

#[test]
fn prints_arithmetic() {
    let (stdout, status) = run("make \"x 5\nprint add :x 3\n");
    assert_eq!(stdout, "8.0\n");
    assert_eq!(status, Some(0));
}

#[test]
fn invalid_utf8_on_stdin_is_replaced() {
    let out = run_with_args(&[], &b"print 1\nprint \"caf\xe9\nprint 2\n"[..]);
    assert_eq!(String::from_utf8_lossy(&out.stdout), "1\ncaf\u{FFFD}\n2\n");
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn list_literal_spans_lines() {
    let (stdout, status) = run("print [a b\n [c d]\n e]\n");
    assert_eq!(stdout, "a b [c d] e\n");
    assert_eq!(status, Some(0));
}

#[test]
fn exit_is_a_clean_stop() {
    let (stdout, status) = run("print 1 exit print 2");
    assert_eq!(stdout, "1\n");
    assert_eq!(status, Some(0));
}

#[test]
fn errors_are_fatal() {
    let (stdout, status) = run("print 1\nprint div 1 0\nprint 2\n");
    assert_eq!(stdout, "1\n[ERROR] : The division cannot be 0.\n");
    assert_eq!(status, Some(1));
}

#[test]
fn unknown_instruction() {
    let (stdout, status) = run("frobnicate");
    assert_eq!(stdout, "[ERROR] : Unknown instruction: frobnicate\n");
    assert_eq!(status, Some(1));
}

#[test]
fn unterminated_list_is_end_of_input() {
    let (stdout, status) = run("print [a [b c]");
    assert_eq!(stdout, "[ERROR] : Unexpected end of input.\n");
    assert_eq!(status, Some(1));
}

#[test]
fn runs_script_file() {
    let tmp = tempfile::tempdir().unwrap();
    let helper = tmp.path().join("helper.mua");
    std::fs::write(&helper, "make \"greeting \"hello\n").unwrap();

    let main = tmp.path().join("main.mua");
    let script = format!(
        "load {}\nprint :greeting\nif gt 9 10 [print \"lexicographic] [print \"numeric]\n",
        helper.display()
    );
    std::fs::write(&main, script).unwrap();

    let out = run_with_args(&[main.to_str().unwrap()], "");
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "hello\nlexicographic\n"
    );
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn missing_script_file() {
    let out = run_with_args(&["/no/such/script.mua"], "");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    assert!(stdout.starts_with("[ERROR] : /no/such/script.mua ("), "{}", stdout);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn seeded_random_is_repeatable() {
    let first = run_with_args(&["--seed", "11"], "print random 1000");
    let second = run_with_args(&["--seed", "11"], "print random 1000");
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), Some(0));
}

#[test]
fn bad_arguments_print_usage() {
    let out = run_with_args(&["--bogus"], "");
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(stderr.contains("Usage:"), "{}", stderr);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn version_flag() {
    let out = run_with_args(&["--version"], "");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    assert!(stdout.starts_with("mua "), "{}", stdout);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn debug_logging_goes_to_stderr() {
    let out = run_with_args(&["--log", "mua_interpreter=debug"], "make \"x 1 print :x");
    assert_eq!(String::from_utf8_lossy(&out.stdout), "1\n");
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(stderr.contains("binding variable"), "{}", stderr);
}
