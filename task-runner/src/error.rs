use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, planning or running tasks
#[derive(Error, Debug)]
pub enum TaskError {
    /// A requested task or dependency is not defined
    #[error("Unknown task '{name}'. Run the default task to list available tasks.")]
    UnknownTask { name: String },

    /// Task dependencies loop back on themselves
    #[error("Dependency cycle detected: {}", .chain.join(" -> "))]
    DependencyCycle { chain: Vec<String> },

    /// An external command exited with a non-zero code
    #[error("Task '{task}' failed: `{command}` exited with code {code}")]
    CommandFailed {
        task: String,
        command: String,
        code: i32,
    },

    /// An external command was killed before it could exit
    #[error("Task '{task}' failed: `{command}` was terminated by a signal")]
    CommandTerminated { task: String, command: String },

    /// An external command could not be started at all
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The virtual environment has no activation script
    #[error("Activation script not found at {}. Run the venv task first.", .path.display())]
    ActivationScriptMissing { path: PathBuf },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The task file is not valid TOML or has the wrong shape
    #[error("Failed to parse task file {}: {source}", .path.display())]
    TaskFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The environment file could not be parsed
    #[error("Failed to load environment file {}: {source}", .path.display())]
    Dotenv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// A line-count glob pattern is malformed
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    /// Exit code a process should report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskError::CommandFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}
