use crate::error::{TaskError, TaskResult};
use crate::task::{Task, TaskSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Task file looked up in the project root
pub const TASK_FILE: &str = "Tasks.toml";

/// Environment file loaded before any task runs
pub const DEFAULT_DOTENV: &str = ".env";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenvConfig {
    /// Environment directory, relative to the project root
    pub dir: PathBuf,
    /// Interpreter used to create the environment
    pub python: String,
}

impl Default for VenvConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".venv"),
            python: "python3".to_string(),
        }
    }
}

/// On-disk shape of `Tasks.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskFile {
    dotenv: Option<PathBuf>,
    default: Option<String>,
    venv: Option<VenvConfig>,
    #[serde(default, rename = "task")]
    tasks: Vec<Task>,
}

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub root: PathBuf,
    pub dotenv_file: PathBuf,
    pub venv: VenvConfig,
    pub tasks: TaskSet,
}

impl RunnerConfig {
    /// Built-in tasks rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dotenv_file: PathBuf::from(DEFAULT_DOTENV),
            venv: VenvConfig::default(),
            tasks: TaskSet::builtin(),
        }
    }

    /// Built-in tasks merged with `<root>/Tasks.toml` when that file exists.
    pub fn load(root: impl Into<PathBuf>) -> TaskResult<Self> {
        let root = root.into();
        let path = root.join(TASK_FILE);
        if !path.is_file() {
            debug!("No {} in {}, using built-in tasks", TASK_FILE, root.display());
            return Ok(Self::new(root));
        }
        Self::load_from(root, &path)
    }

    /// Built-in tasks merged with an explicit task file, which must exist.
    pub fn load_from(root: impl Into<PathBuf>, path: &Path) -> TaskResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(root, &contents, path)
    }

    /// `origin` is only used to name the file in parse errors.
    pub fn from_toml_str(
        root: impl Into<PathBuf>,
        contents: &str,
        origin: &Path,
    ) -> TaskResult<Self> {
        let file: TaskFile = toml::from_str(contents).map_err(|source| TaskError::TaskFile {
            path: origin.to_path_buf(),
            source,
        })?;

        let mut config = Self::new(root);
        if let Some(dotenv) = file.dotenv {
            config.dotenv_file = dotenv;
        }
        if let Some(venv) = file.venv {
            config.venv = venv;
        }
        debug!(
            "Loaded {} task(s) from {}",
            file.tasks.len(),
            origin.display()
        );
        for task in file.tasks {
            config.tasks.insert(task);
        }
        if let Some(default) = file.default {
            config.tasks.set_default_task(default);
        }

        Ok(config)
    }

    pub fn with_dotenv_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_file = path.into();
        self
    }

    pub fn with_venv(mut self, venv: VenvConfig) -> Self {
        self.venv = venv;
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.insert(task);
        self
    }

    pub fn dotenv_path(&self) -> PathBuf {
        self.root.join(&self.dotenv_file)
    }

    pub fn venv_path(&self) -> PathBuf {
        self.root.join(&self.venv.dir)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.venv.dir.as_os_str().is_empty() {
            return Err("Virtual environment directory cannot be empty".to_string());
        }

        if self.venv.python.trim().is_empty() {
            return Err("Python interpreter cannot be empty".to_string());
        }

        if !self.tasks.contains(self.tasks.default_task()) {
            return Err(format!(
                "Default task '{}' is not defined",
                self.tasks.default_task()
            ));
        }

        for task in self.tasks.tasks() {
            if task.name.trim().is_empty() {
                return Err("Task names cannot be empty".to_string());
            }

            if let Some(missing) = task.deps.iter().find(|dep| !self.tasks.contains(dep)) {
                return Err(format!(
                    "Task '{}' depends on unknown task '{}'",
                    task.name, missing
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskAction;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::new("/project");
        assert_eq!(config.dotenv_path(), PathBuf::from("/project/.env"));
        assert_eq!(config.venv_path(), PathBuf::from("/project/.venv"));
        assert_eq!(config.venv.python, "python3");
        assert_eq!(config.tasks.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = RunnerConfig::new("/project")
            .with_dotenv_file("config/dev.env")
            .with_venv(VenvConfig {
                dir: PathBuf::from("env"),
                python: "python3.12".to_string(),
            })
            .with_task(Task::new("test", TaskAction::Shell {
                script: "pytest".to_string(),
            }));

        assert_eq!(config.dotenv_path(), PathBuf::from("/project/config/dev.env"));
        assert_eq!(config.venv_path(), PathBuf::from("/project/env"));
        assert!(config.tasks.contains("test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            dotenv = "local.env"
            default = "run"

            [venv]
            dir = "venv"

            [[task]]
            name = "run"
            description = "Serve the app on a fixed port"
            deps = ["venv", "activate"]
            action = { type = "exec", program = "streamlit", args = ["run", "main.py", "--server.port", "8600"] }

            [[task]]
            name = "fmt"
            action = { type = "shell", script = "black ." }
        "#;

        let config =
            RunnerConfig::from_toml_str("/project", toml, Path::new("Tasks.toml")).unwrap();
        assert_eq!(config.dotenv_file, PathBuf::from("local.env"));
        assert_eq!(config.venv.dir, PathBuf::from("venv"));
        assert_eq!(config.venv.python, "python3");
        assert_eq!(config.tasks.default_task(), "run");
        assert_eq!(config.tasks.len(), 6);
        assert_eq!(
            config.tasks.get("run").unwrap().action.to_string(),
            "streamlit run main.py --server.port 8600"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_invalid_toml() {
        let result = RunnerConfig::from_toml_str(
            "/project",
            "[[task]]\nname = \"broken\"\n",
            Path::new("Tasks.toml"),
        );
        assert!(matches!(result, Err(TaskError::TaskFile { .. })));

        let result =
            RunnerConfig::from_toml_str("/project", "colour = \"blue\"\n", Path::new("Tasks.toml"));
        assert!(matches!(result, Err(TaskError::TaskFile { .. })));
    }

    #[test]
    fn test_config_validation() {
        let mut config = RunnerConfig::new("/project");

        config.venv.dir = PathBuf::new();
        assert!(config.validate().is_err());

        config.venv.dir = PathBuf::from(".venv");
        config.venv.python = " ".to_string();
        assert!(config.validate().is_err());

        config.venv.python = "python3".to_string();
        config.tasks.set_default_task("missing");
        assert!(config.validate().is_err());

        config.tasks.set_default_task("default");
        config.tasks.insert(
            Task::new("deploy", TaskAction::Shell {
                script: "./deploy.sh".to_string(),
            })
            .with_dep("build"),
        );
        let err = config.validate().unwrap_err();
        assert!(err.contains("unknown task 'build'"));
    }

    #[test]
    fn test_load_without_task_file_uses_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunnerConfig::load(dir.path()).unwrap();
        assert_eq!(config.tasks, TaskSet::builtin());
        assert_eq!(config.root, dir.path());
    }

    #[test]
    fn test_load_reads_task_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(TASK_FILE),
            "[[task]]\nname = \"hello\"\naction = { type = \"shell\", script = \"echo hello\" }\n",
        )
        .unwrap();

        let config = RunnerConfig::load(dir.path()).unwrap();
        assert!(config.tasks.contains("hello"));
        assert!(config.tasks.contains("run"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = RunnerConfig::load_from("/project", Path::new("/nonexistent/Tasks.toml"));
        assert!(matches!(result, Err(TaskError::Io(_))));
    }
}
