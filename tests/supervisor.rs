// tests/supervisor.rs
#![cfg(unix)]

mod common;
use crate::common::builders::RequestBuilder;
use crate::common::{init_tracing, with_timeout};

use std::io;
use std::path::Path;
use std::time::Duration;

use tokio::process::{Child, Command};

use croncape::exec::terminate::TerminateFuture;
use croncape::exec::{Terminate, execute, execute_with};

fn cwd() -> &'static Path {
    Path::new(".")
}

#[tokio::test]
async fn successful_command_reports_zero() {
    init_tracing();

    let result = with_timeout(execute(cwd(), RequestBuilder::new(["true"]).build())).await;

    assert_eq!(result.code, 0);
    assert!(!result.killed);
    assert!(result.stopped >= result.started);
    assert!(!result.should_report());
}

#[tokio::test]
async fn failing_command_reports_its_exit_code() {
    init_tracing();

    let result = with_timeout(execute(cwd(), RequestBuilder::new(["false"]).build())).await;
    assert_eq!(result.code, 1);
    assert!(!result.killed);

    let result = with_timeout(execute(cwd(), RequestBuilder::shell("exit 42").build())).await;
    assert_eq!(result.code, 42);
    assert!(result.should_report());
}

#[tokio::test]
async fn missing_executable_reports_127_with_reason() {
    init_tracing();

    let request = RequestBuilder::new(["croncape-definitely-not-installed", "--flag"]).build();
    let result = with_timeout(execute(cwd(), request)).await;

    assert_eq!(result.code, 127);
    assert!(!result.killed);
    assert!(!result.stderr.is_empty());
    assert!(result.stdout.is_empty());
}

#[tokio::test]
async fn captures_stdout_and_stderr_separately() {
    init_tracing();

    let request = RequestBuilder::shell("echo out; echo err >&2; echo more out").build();
    let result = with_timeout(execute(cwd(), request)).await;

    assert_eq!(result.code, 0);
    assert_eq!(result.stdout_lossy(), "out\nmore out\n");
    assert_eq!(result.stderr_lossy(), "err\n");
}

#[tokio::test]
async fn captures_large_output_completely() {
    init_tracing();

    // Several times larger than a pipe buffer.
    let request = RequestBuilder::shell("head -c 1048576 /dev/zero").build();
    let result = with_timeout(execute(cwd(), request)).await;

    assert_eq!(result.code, 0);
    assert_eq!(result.stdout.len(), 1_048_576);
}

#[tokio::test]
async fn runs_in_the_given_directory() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let result = with_timeout(execute(dir.path(), RequestBuilder::new(["pwd"]).build())).await;

    let printed = result.stdout_lossy().trim().to_string();
    let expected = dir.path().canonicalize().unwrap();
    assert_eq!(Path::new(&printed).canonicalize().unwrap(), expected);
}

#[tokio::test]
async fn fast_command_is_not_killed_by_armed_watchdog() {
    init_tracing();

    let request = RequestBuilder::shell("exit 3")
        .timeout(Duration::from_secs(5))
        .build();
    let result = with_timeout(execute(cwd(), request)).await;

    assert!(!result.killed);
    assert_eq!(result.code, 3);
    assert!(result.elapsed < Duration::from_secs(5));
}

#[tokio::test]
async fn slow_command_is_killed_after_timeout() {
    init_tracing();

    let timeout = Duration::from_millis(300);
    let request = RequestBuilder::new(["sleep", "30"]).timeout(timeout).build();
    let result = with_timeout(execute(cwd(), request)).await;

    assert!(result.killed);
    // SIGKILL leaves no exit code to decode.
    assert_eq!(result.code, -1);
    assert!(result.elapsed >= timeout);
    assert!(result.stopped.duration_since(result.started).unwrap() >= timeout);
    assert!(result.elapsed < Duration::from_secs(10));
    assert!(result.should_report());
}

#[tokio::test]
async fn output_written_before_the_kill_is_kept() {
    init_tracing();

    let request = RequestBuilder::shell("echo started; echo warming up >&2; sleep 30")
        .timeout(Duration::from_millis(300))
        .build();
    let result = with_timeout(execute(cwd(), request)).await;

    assert!(result.killed);
    assert_eq!(result.stdout_lossy(), "started\n");
    assert_eq!(result.stderr_lossy(), "warming up\n");
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn timeout_kills_the_whole_process_tree() {
    use crate::common::is_running;

    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let pid_file = dir.path().join("grandchild.pid");
    let script = format!("sleep 30 & echo $! > {}; wait", pid_file.display());

    let request = RequestBuilder::shell(&script)
        .timeout(Duration::from_millis(500))
        .build();
    let result = with_timeout(execute(cwd(), request)).await;
    assert!(result.killed);

    let pid: i32 = std::fs::read_to_string(&pid_file)
        .unwrap()
        .trim()
        .parse()
        .unwrap();

    // The grandchild may linger as a zombie until its new parent reaps it.
    let mut alive = true;
    for _ in 0..50 {
        alive = is_running(pid);
        if !alive {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(!alive, "grandchild {pid} survived the timeout");
}

#[tokio::test]
async fn timeout_still_applies_when_a_background_job_holds_the_pipes() {
    init_tracing();

    // The shell exits at once, but `sleep` inherits stdout and keeps it open.
    let request = RequestBuilder::shell("sleep 30 & echo $!; echo hi")
        .timeout(Duration::from_millis(500))
        .build();
    let result = with_timeout(execute(cwd(), request)).await;

    assert!(result.killed);
    assert!(result.elapsed >= Duration::from_millis(500));
    assert!(result.elapsed < Duration::from_secs(5));
    // The direct child exited normally before the deadline.
    assert_eq!(result.code, 0);
    assert!(result.should_report());

    let stdout = result.stdout_lossy();
    let mut lines = stdout.lines();
    let background: i32 = lines.next().unwrap().trim().parse().unwrap();
    assert_eq!(lines.next(), Some("hi"));

    #[cfg(target_os = "linux")]
    {
        use crate::common::is_running;

        let mut alive = true;
        for _ in 0..50 {
            alive = is_running(background);
            if !alive {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(!alive, "background job {background} survived the timeout");
    }
    #[cfg(not(target_os = "linux"))]
    let _ = background;
}

/// Terminator that refuses to kill anything.
struct BrokenTerminator;

impl Terminate for BrokenTerminator {
    fn prepare(&self, _cmd: &mut Command) {}

    fn terminate<'a>(&'a self, _pid: Option<u32>, _child: &'a mut Child) -> TerminateFuture<'a> {
        Box::pin(async { Err::<(), _>(io::Error::other("permission denied")) })
    }
}

#[tokio::test]
async fn failed_kill_is_recorded_and_run_still_counts_as_killed() {
    init_tracing();

    let request = RequestBuilder::new(["sleep", "1"])
        .timeout(Duration::from_millis(100))
        .build();
    let result = with_timeout(execute_with(cwd(), request, &BrokenTerminator)).await;

    assert!(result.killed);
    // The child was left alone and finished on its own.
    assert_eq!(result.code, 0);
    assert!(
        result
            .stderr_lossy()
            .contains("Unable to kill the process: permission denied")
    );
}
