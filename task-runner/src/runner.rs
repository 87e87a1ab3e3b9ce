use crate::config::RunnerConfig;
use crate::env::Environment;
use crate::error::{TaskError, TaskResult};
use crate::exec::{program_command, run_command, shell_command};
use crate::plan::resolve_many;
use crate::sloc::count_lines;
use crate::task::{Task, TaskAction, TaskSet};
use crate::venv::{activate, ensure_venv};
use std::io::{self, Write};
use tracing::info;

/// Runs tasks one at a time, in dependency order.
///
/// Output produced by the runner itself (task listings, line counts, dry
/// runs) goes to the writer `W`; spawned commands inherit stdio.
pub struct TaskRunner<W: Write = io::Stdout> {
    config: RunnerConfig,
    env: Environment,
    out: W,
    dry_run: bool,
}

impl TaskRunner<io::Stdout> {
    pub fn new(config: RunnerConfig) -> TaskResult<Self> {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write> TaskRunner<W> {
    /// Validate `config` and load its environment file.
    pub fn with_writer(config: RunnerConfig, out: W) -> TaskResult<Self> {
        config.validate().map_err(TaskError::InvalidConfig)?;
        let env = Environment::from_dotenv(&config.dotenv_path())?;

        Ok(Self {
            config,
            env,
            out,
            dry_run: false,
        })
    }

    /// Print the plan instead of executing it.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Execution order for `targets`; the default task when empty.
    pub fn plan<S: AsRef<str>>(&self, targets: &[S]) -> TaskResult<Vec<String>> {
        if targets.is_empty() {
            return resolve_many(&self.config.tasks, &[self.config.tasks.default_task()]);
        }
        resolve_many(&self.config.tasks, targets)
    }

    /// Run `targets` and their dependencies. Returns the tasks executed, in
    /// order. Stops at the first failure.
    pub async fn run<S: AsRef<str>>(&mut self, targets: &[S]) -> TaskResult<Vec<String>> {
        let plan = self.plan(targets)?;

        if self.dry_run {
            for name in &plan {
                if let Some(task) = self.config.tasks.get(name) {
                    writeln!(self.out, "{}: {}", task.name, task.action)?;
                }
            }
            return Ok(plan);
        }

        for name in &plan {
            let task = self
                .config
                .tasks
                .get(name)
                .cloned()
                .ok_or_else(|| TaskError::UnknownTask { name: name.clone() })?;

            info!("Running task '{}'", task.name);
            self.execute(&task).await?;
        }

        Ok(plan)
    }

    async fn execute(&mut self, task: &Task) -> TaskResult<()> {
        let root = self.config.root.clone();

        match &task.action {
            TaskAction::List => write_task_list(&self.config.tasks, &mut self.out)?,
            TaskAction::Venv => {
                ensure_venv(&self.config.venv, &root, &self.env).await?;
            }
            TaskAction::Activate => activate(&mut self.env, &self.config.venv_path())?,
            TaskAction::Exec { program, args } => {
                let cmd = program_command(program, args, &root, &self.env);
                run_command(&task.name, cmd, &task.action.to_string()).await?;
            }
            TaskAction::Shell { script } => {
                let cmd = shell_command(script, &root, &self.env);
                run_command(&task.name, cmd, script).await?;
            }
            TaskAction::Sloc { pattern } => {
                let report = count_lines(&root, pattern, &[self.config.venv.dir.clone()])?;
                writeln!(self.out, "{}", report)?;
            }
        }

        Ok(())
    }
}

/// `Available tasks:` followed by each task and its description.
pub fn write_task_list<W: Write>(tasks: &TaskSet, out: &mut W) -> io::Result<()> {
    let width = tasks.tasks().iter().map(|t| t.name.chars().count()).max().unwrap_or(0);

    writeln!(out, "Available tasks:")?;
    for task in tasks.tasks() {
        if task.description.is_empty() {
            writeln!(out, "    {}", task.name)?;
        } else {
            writeln!(
                out,
                "    {:<width$} # {}",
                task.name,
                task.description,
                width = width
            )?;
        }
    }
    Ok(())
}
