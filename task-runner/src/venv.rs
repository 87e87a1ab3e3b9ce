use crate::config::VenvConfig;
use crate::env::Environment;
use crate::error::{TaskError, TaskResult};
use crate::exec::{program_command, run_command};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenvStatus {
    Created,
    AlreadyPresent,
}

/// Directory holding the environment's executables.
pub fn bin_dir(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_dir.join("Scripts")
    } else {
        venv_dir.join("bin")
    }
}

pub fn activation_script(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        bin_dir(venv_dir).join("activate.bat")
    } else {
        bin_dir(venv_dir).join("activate")
    }
}

/// Create the environment with `<python> -m venv <dir>` unless the
/// directory already exists.
pub async fn ensure_venv(
    config: &VenvConfig,
    root: &Path,
    env: &Environment,
) -> TaskResult<VenvStatus> {
    let venv_dir = root.join(&config.dir);
    if venv_dir.exists() {
        info!(
            "Virtual environment already present at {}",
            venv_dir.display()
        );
        return Ok(VenvStatus::AlreadyPresent);
    }

    let args = vec![
        "-m".to_string(),
        "venv".to_string(),
        config.dir.to_string_lossy().into_owned(),
    ];
    let display = format!("{} {}", config.python, args.join(" "));
    let cmd = program_command(&config.python, &args, root, env);
    run_command("venv", cmd, &display).await?;

    info!("Created virtual environment at {}", venv_dir.display());
    Ok(VenvStatus::Created)
}

/// Activate the environment at `venv_dir` for every later command run
/// with `env`.
pub fn activate(env: &mut Environment, venv_dir: &Path) -> TaskResult<()> {
    let script = activation_script(venv_dir);
    if !script.is_file() {
        return Err(TaskError::ActivationScriptMissing { path: script });
    }

    env.activate(venv_dir, &bin_dir(venv_dir))?;
    info!("Activated virtual environment {}", venv_dir.display());
    Ok(())
}
