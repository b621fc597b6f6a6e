use pipesh::config::Limits;
use pipesh::{Console, Interpreter};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Run `line` on a fresh interpreter, returning (status, stdout, stderr).
fn run_line(line: &str) -> (i32, String, String) {
    let (console, captured) = Console::capture("");
    let mut sh = Interpreter::new(console, Limits::default());
    let status = sh.execute_line(line).unwrap();
    (status, captured.output(), captured.error())
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pipesh_it_{tag}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

macro_rules! output_test {
    ($name:ident, $line:expr, $stdout:expr) => {
        #[test]
        fn $name() {
            let (_, out, err) = run_line($line);
            assert_eq!(out, $stdout, "line: {}", $line);
            assert_eq!(err, "", "line: {}", $line);
        }
    };
}

// ── echo and tokenization ──

output_test!(echo_words, "echo hello world", "hello world\n");
output_test!(echo_collapses_spaces, "echo   a    b", "a b\n");
output_test!(echo_double_quotes, "echo \"a  b\" c", "a  b c\n");
output_test!(echo_single_quotes, "echo 'x y'", "x y\n");
output_test!(echo_unterminated_quote, "echo \"open ended", "open ended\n");
output_test!(echo_no_args, "echo", "\n");
output_test!(echo_quoted_marker, "echo \">\" x", "> x\n");

// ── segments ──

output_test!(segments_in_order, "echo 1 | echo 2 | echo 3", "1\n2\n3\n");
output_test!(segment_separator_needs_no_spaces, "echo a|echo b", "a\nb\n");
output_test!(empty_segments_skipped, "| echo a || echo b |", "a\nb\n");
output_test!(
    eleventh_segment_dropped,
    "echo 1|echo 2|echo 3|echo 4|echo 5|echo 6|echo 7|echo 8|echo 9|echo 10|echo 11",
    "1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n"
);

#[test]
fn unknown_command() {
    let (status, out, err) = run_line("frobnicate now");
    assert_eq!(status, 127);
    assert_eq!(out, "");
    assert_eq!(err, "unknown command: frobnicate\n");
}

#[test]
fn exit_stops_line() {
    let (status, out, _) = run_line("exit | echo never");
    assert_eq!(status, 0);
    assert_eq!(out, "Exiting the terminal\n");
}

#[test]
fn redirected_segments() {
    let dir = temp_dir("redirect");
    let a = dir.join("a.txt");
    let b = dir.join("b.txt");

    let (_, out, err) = run_line(&format!(
        "echo first > {} | echo second > {} | echo third",
        a.display(),
        b.display()
    ));

    assert_eq!(err, "");
    assert_eq!(out, "third\n");
    assert_eq!(fs::read_to_string(&a).unwrap(), "first\n");
    assert_eq!(fs::read_to_string(&b).unwrap(), "second\n");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn operands_that_look_like_flags_are_names() {
    let start = std::env::current_dir().unwrap();
    let dir = temp_dir("flag_names");

    let (_, out, err) = run_line(&format!("cd {} | touch -x | mkdir help | cd -", dir.display()));
    std::env::set_current_dir(&start).unwrap();

    assert_eq!(out, "");
    assert_eq!(err, "invalid directory\n");
    assert!(dir.join("-x").is_file());
    assert!(dir.join("help").is_dir());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn touch_mkdir_rm_with_absolute_paths() {
    let dir = temp_dir("files");
    let file = dir.join("note.txt");
    let sub = dir.join("sub");

    let (console, captured) = Console::capture("yes\nn\n");
    let mut sh = Interpreter::new(console, Limits::default());
    sh.execute_line(&format!("touch {} | mkdir {}", file.display(), sub.display()))
        .unwrap();
    assert!(file.is_file());
    assert!(sub.is_dir());

    sh.execute_line(&format!("rm {} | rm {}", file.display(), sub.display()))
        .unwrap();
    assert!(!file.exists(), "confirmed with `yes`");
    assert!(sub.exists(), "declined with `n`");
    assert_eq!(captured.error(), "");
    let _ = fs::remove_dir_all(dir);
}

// ── the binary ──

fn shell() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pipesh"));
    cmd.env("HOME", std::env::temp_dir());
    cmd
}

#[test]
fn binary_runs_command_line() {
    let output = shell().args(["-c", "echo hi | echo there"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hi\nthere\n");
}

#[test]
fn binary_reports_unknown_command_status() {
    let output = shell().args(["-c", "nope"]).output().unwrap();
    assert_eq!(output.status.code(), Some(127));
    assert_eq!(String::from_utf8_lossy(&output.stderr), "unknown command: nope\n");
}

#[test]
fn binary_dumps_default_config() {
    let output = shell().arg("--dump-config").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("max_args = 128"));
    assert!(text.contains("max_segments = 10"));
}

#[test]
fn binary_fails_on_end_of_input() {
    let mut child = shell()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"echo hi\n").unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("end of input"), "stderr: {stderr}");
    assert!(String::from_utf8_lossy(&output.stdout).contains("hi\n"));
}
