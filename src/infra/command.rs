//! # Command Execution Module / 命令执行模块
//!
//! Spawns one external command with both output streams redirected into a
//! single log file and waits for it to exit.
//!
//! 派生一个外部命令，将其两个输出流重定向到同一个日志文件，并等待其退出。

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Child;

use crate::core::command::StageCommand;
use crate::infra::t;

/// Exit code reported when the program could not be started at all,
/// matching what a POSIX shell reports for "command not found".
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Exit code reported when a stage was killed for exceeding its timeout.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Runs `command` with stdout and stderr both written to `log_path`.
///
/// The log is created (or truncated) first and starts with a `$ <command>`
/// header. Both streams share one file handle, so the child's output lands in
/// the order it was produced.
///
/// Returns the child's raw exit code. A program that cannot be started yields
/// [`SPAWN_FAILURE_EXIT_CODE`] with the reason appended to the log; a child
/// killed by a signal yields the negated signal number. With a `timeout`, a
/// child still running when it elapses is killed and [`TIMEOUT_EXIT_CODE`] is
/// returned.
///
/// Only failing to create or write the log file itself is an error.
///
/// 以 stdout 和 stderr 同时写入 `log_path` 的方式运行 `command`，并返回子进程的原始退出码。
/// 仅当日志文件本身无法创建或写入时才返回错误。
pub async fn spawn_to_log(
    command: &StageCommand,
    log_path: &Path,
    timeout: Option<Duration>,
) -> Result<i32> {
    let mut log = File::create(log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;
    writeln!(log, "$ {command}")?;
    log.flush()?;

    let stdout = log
        .try_clone()
        .context("Failed to duplicate log handle for stdout")?;
    let stderr = log
        .try_clone()
        .context("Failed to duplicate log handle for stderr")?;

    let mut cmd = tokio::process::Command::new(&command.program);
    cmd.args(&command.args)
        .current_dir(&command.cwd)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        .kill_on_drop(true);
    // Own process group, so a timeout can take down everything the stage started.
    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            writeln!(
                log,
                "{}",
                t!("run.spawn_failed", program = &command.program, error = e)
            )?;
            return Ok(SPAWN_FAILURE_EXIT_CODE);
        }
    };
    // Release the parent's copies of the redirected handles.
    drop(cmd);

    let status = match timeout {
        None => child.wait().await,
        Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
            Ok(status) => status,
            Err(_) => {
                kill_stage(&mut child).await;
                writeln!(
                    log,
                    "\n{}",
                    t!("run.stage_timeout", timeout = limit.as_secs())
                )?;
                return Ok(TIMEOUT_EXIT_CODE);
            }
        },
    }
    .with_context(|| format!("Failed to wait for `{}`", command.program))?;

    Ok(exit_code(status))
}

/// Kills the stage's whole process group, then reaps the direct child.
///
/// Build tools fork compilers and shells fork subshells; those share the log
/// handle and the build tree, so none of them may outlive the stage.
#[cfg(unix)]
async fn kill_stage(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    if let Some(pgid) = child.id().and_then(|pid| i32::try_from(pid).ok()) {
        // ESRCH here just means the group already exited at the deadline.
        let _ = killpg(Pid::from_raw(pgid), Signal::SIGKILL);
    }
    let _ = child.kill().await;
}

#[cfg(not(unix))]
async fn kill_stage(child: &mut Child) {
    let _ = child.kill().await;
}

/// Maps an exit status to a plain integer code.
#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .unwrap_or_else(|| status.signal().map_or(-1, |signal| -signal))
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
