//! Project task runner.
//!
//! Tasks are named recipes with optional dependencies. Built-in tasks cover
//! the usual Python project chores (list tasks, create and activate a
//! virtual environment, launch the app, count lines of code) and a
//! `Tasks.toml` in the project root can override or extend them.
//!
//! Variables from a `.env` file are passed to every process a task starts.

pub mod config;
pub mod env;
pub mod error;
pub mod exec;
pub mod plan;
pub mod runner;
pub mod sloc;
pub mod task;
pub mod venv;

pub use config::{RunnerConfig, VenvConfig, DEFAULT_DOTENV, TASK_FILE};
pub use env::{load_dotenv, Environment};
pub use error::{TaskError, TaskResult};
pub use plan::{resolve, resolve_many};
pub use runner::{write_task_list, TaskRunner};
pub use sloc::{count_lines, FileLines, SlocReport};
pub use task::{Task, TaskAction, TaskSet};
pub use venv::{activation_script, ensure_venv, VenvStatus};
