use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SLOC_PATTERN: &str = "**/*.py";

fn default_sloc_pattern() -> String {
    DEFAULT_SLOC_PATTERN.to_string()
}

/// What a task does when it runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskAction {
    /// Print every task with its description
    List,
    /// Create the virtual environment unless it already exists
    Venv,
    /// Put the virtual environment in front of every later task's environment
    Activate,
    /// Run one executable with arguments
    Exec {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// Run a command line through the platform shell
    Shell { script: String },
    /// Count lines across files matching a glob pattern
    Sloc {
        #[serde(default = "default_sloc_pattern")]
        pattern: String,
    },
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskAction::List => write!(f, "list tasks"),
            TaskAction::Venv => write!(f, "create virtual environment"),
            TaskAction::Activate => write!(f, "activate virtual environment"),
            TaskAction::Exec { program, args } => {
                write!(f, "{}", program)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
            TaskAction::Shell { script } => write!(f, "{}", script),
            TaskAction::Sloc { pattern } => write!(f, "count lines in {}", pattern),
        }
    }
}

/// A named recipe and the tasks that must run before it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deps: Vec<String>,
    pub action: TaskAction,
}

impl Task {
    pub fn new(name: impl Into<String>, action: TaskAction) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            deps: Vec::new(),
            action,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_dep(mut self, dep: impl Into<String>) -> Self {
        self.deps.push(dep.into());
        self
    }
}

/// Tasks in declaration order, plus the one to run when none is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSet {
    tasks: Vec<Task>,
    default_task: String,
}

impl TaskSet {
    pub fn new(default_task: impl Into<String>) -> Self {
        Self {
            tasks: Vec::new(),
            default_task: default_task.into(),
        }
    }

    /// The stock project tasks: `default`, `venv`, `activate`, `run`, `sloc`.
    pub fn builtin() -> Self {
        let mut set = Self::new("default");
        set.insert(Task::new("default", TaskAction::List).with_description("List available tasks"));
        set.insert(
            Task::new("venv", TaskAction::Venv)
                .with_description("Create the virtual environment if it does not exist"),
        );
        set.insert(
            Task::new("activate", TaskAction::Activate)
                .with_description("Activate the virtual environment for the following tasks"),
        );
        set.insert(
            Task::new(
                "run",
                TaskAction::Exec {
                    program: "streamlit".to_string(),
                    args: vec!["run".to_string(), "main.py".to_string()],
                },
            )
            .with_description("Launch the app")
            .with_dep("venv")
            .with_dep("activate"),
        );
        set.insert(
            Task::new("sloc", TaskAction::Sloc {
                pattern: default_sloc_pattern(),
            })
            .with_description("Count lines of source code"),
        );
        set
    }

    /// Add `task`, replacing any task with the same name in place.
    pub fn insert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.name == task.name) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn default_task(&self) -> &str {
        &self.default_task
    }

    pub fn set_default_task(&mut self, name: impl Into<String>) {
        self.default_task = name.into();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for TaskSet {
    fn default() -> Self {
        Self::builtin()
    }
}
