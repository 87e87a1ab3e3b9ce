use crate::env::Environment;
use crate::error::{TaskError, TaskResult};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Build a command for `program` running in `cwd` with `env` applied.
pub fn program_command(program: &str, args: &[String], cwd: &Path, env: &Environment) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(cwd);
    env.apply(&mut cmd);
    cmd
}

/// Build a command that hands `script` to the platform shell.
pub fn shell_command(script: &str, cwd: &Path, env: &Environment) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", script]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", script]);
        cmd
    };
    cmd.current_dir(cwd);
    env.apply(&mut cmd);
    cmd
}

/// Run `cmd` to completion with inherited stdio.
///
/// `display` is the command line used in logs and errors.
pub async fn run_command(task: &str, mut cmd: Command, display: &str) -> TaskResult<()> {
    let line = display;
    info!("[{}] $ {}", task, line);

    let status = cmd.status().await.map_err(|source| TaskError::Spawn {
        command: display.to_string(),
        source,
    })?;
    debug!("[{}] `{}` finished with {}", task, line, status);

    if status.success() {
        return Ok(());
    }

    match status.code() {
        Some(code) => Err(TaskError::CommandFailed {
            task: task.to_string(),
            command: display.to_string(),
            code,
        }),
        None => Err(TaskError::CommandTerminated {
            task: task.to_string(),
            command: display.to_string(),
        }),
    }
}
