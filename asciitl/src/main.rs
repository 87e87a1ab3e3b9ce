use asciitl::{
    load_config, read_input, render, run_tasks, write_usage, CliError, InputSource, OutputFormat,
};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use task_runner::write_task_list;
use tracing::info;

#[derive(Parser)]
#[command(name = "asciitl")]
#[command(about = "ASCII timeline table generator with project tasks")]
struct Cli {
    /// Project root for tasks
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,
    /// Task file to use instead of Tasks.toml in the project root
    #[arg(long, global = true)]
    tasks: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run tasks and their dependencies (the default task if none given)
    Task {
        /// Tasks to run, in order
        names: Vec<String>,
        /// Print the execution plan without running anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List available tasks
    List,
    /// Render a timeline as an ASCII table
    Render {
        /// Input file with one `HH:MM - HH:MM Activity` per line; `-` for stdin
        file: Option<PathBuf>,
        /// Render the built-in sample day
        #[arg(long)]
        sample: bool,
        /// Print the parsed activities as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Explain the timeline input format
    Usage,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Task { names, dry_run } => {
            let root = std::fs::canonicalize(&cli.root)?;
            let config = load_config(&root, cli.tasks.as_deref())?;
            let executed = run_tasks(config, &names, dry_run, io::stdout()).await?;
            info!("Completed {} task(s): {}", executed.len(), executed.join(", "));
        }
        Commands::List => {
            let root = std::fs::canonicalize(&cli.root)?;
            let config = load_config(&root, cli.tasks.as_deref())?;
            write_task_list(&config.tasks, &mut io::stdout().lock())?;
        }
        Commands::Render { file, sample, json } => {
            let source = InputSource::from_args(file, sample);
            let text = read_input(&source)?;
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Table
            };
            render(&text, format, &mut io::stdout().lock())?;
        }
        Commands::Usage => {
            write_usage(&mut io::stdout().lock())?;
        }
    }

    Ok(())
}
