//! The work behind each CLI subcommand, kept out of `main` so it can be
//! driven from tests with in-memory writers.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use task_runner::{RunnerConfig, TaskError, TaskResult, TaskRunner};
use thiserror::Error;
use timeline::{render_timeline, TimelineError, SAMPLE_INPUT, TITLE, USAGE};
use tracing::debug;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status; a failed task command passes its own code through.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Task(e) => u8::try_from(e.exit_code()).unwrap_or(1).max(1),
            _ => 1,
        }
    }
}

/// Where timeline text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Sample,
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` or no file means stdin; `--sample` wins over both.
    pub fn from_args(file: Option<PathBuf>, sample: bool) -> Self {
        if sample {
            return InputSource::Sample;
        }
        match file {
            Some(path) if path == Path::new("-") => InputSource::Stdin,
            Some(path) => InputSource::File(path),
            None => InputSource::Stdin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn read_input(source: &InputSource) -> io::Result<String> {
    match source {
        InputSource::Sample => Ok(SAMPLE_INPUT.to_string()),
        InputSource::Stdin => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        InputSource::File(path) => std::fs::read_to_string(path),
    }
}

/// Render `text` as a table, or as the parsed activities in JSON.
pub fn render<W: Write>(text: &str, format: OutputFormat, out: &mut W) -> Result<(), CliError> {
    let rendered = render_timeline(text)?;
    debug!(
        "Rendered {} activities over {} time points",
        rendered.activities.len(),
        rendered.time_points.len()
    );

    match format {
        OutputFormat::Table => write!(out, "{}", rendered.table)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &rendered.activities)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", TITLE)?;
    writeln!(out)?;
    write!(out, "{}", USAGE)
}

/// Task configuration for `root`, from an explicit task file when given.
pub fn load_config(root: &Path, tasks_file: Option<&Path>) -> TaskResult<RunnerConfig> {
    match tasks_file {
        Some(path) => RunnerConfig::load_from(root, path),
        None => RunnerConfig::load(root),
    }
}

/// Run `names` (the default task when empty), writing runner output to `out`.
pub async fn run_tasks<W: Write>(
    config: RunnerConfig,
    names: &[String],
    dry_run: bool,
    out: W,
) -> Result<Vec<String>, CliError> {
    let mut runner = TaskRunner::with_writer(config, out)?.with_dry_run(dry_run);
    Ok(runner.run(names).await?)
}
