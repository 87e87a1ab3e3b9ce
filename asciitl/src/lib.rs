pub mod commands;

pub use commands::{
    load_config, read_input, render, run_tasks, write_usage, CliError, InputSource, OutputFormat,
};
