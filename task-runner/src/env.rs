//! Environment passed to task processes.
//!
//! Variables from the project's `.env` file are collected into an
//! [`Environment`] instead of being written into this process's own
//! environment; every spawned command gets them applied explicitly.

use crate::error::{TaskError, TaskResult};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Read `KEY=VALUE` pairs from a dotenv file. A missing file yields no pairs.
pub fn load_dotenv(path: &Path) -> TaskResult<BTreeMap<String, String>> {
    if !path.is_file() {
        debug!("No environment file at {}", path.display());
        return Ok(BTreeMap::new());
    }

    let to_error = |source: dotenvy::Error| TaskError::Dotenv {
        path: path.to_path_buf(),
        source,
    };

    let mut vars = BTreeMap::new();
    for item in dotenvy::from_path_iter(path).map_err(to_error)? {
        let (key, value) = item.map_err(to_error)?;
        vars.insert(key, value);
    }

    info!("Loaded {} variable(s) from {}", vars.len(), path.display());
    Ok(vars)
}

#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
    removed: BTreeSet<String>,
    path: Option<OsString>,
    virtual_env: Option<PathBuf>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vars(vars: BTreeMap<String, String>) -> Self {
        Self {
            vars,
            ..Self::default()
        }
    }

    pub fn from_dotenv(path: &Path) -> TaskResult<Self> {
        Ok(Self::from_vars(load_dotenv(path)?))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.removed.remove(&key);
        self.vars.insert(key, value.into());
    }

    /// Unset `key` in child processes, even if this process has it.
    pub fn remove(&mut self, key: &str) {
        self.vars.remove(key);
        self.removed.insert(key.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    pub fn virtual_env(&self) -> Option<&Path> {
        self.virtual_env.as_deref()
    }

    pub fn is_activated(&self) -> bool {
        self.virtual_env.is_some()
    }

    /// `PATH` as children will see it.
    pub fn search_path(&self) -> Option<OsString> {
        self.path
            .clone()
            .or_else(|| self.vars.get("PATH").map(OsString::from))
            .or_else(|| std::env::var_os("PATH"))
    }

    /// Overlay the variables an activation script would export: the
    /// environment's executables first on `PATH`, `VIRTUAL_ENV` set and
    /// `PYTHONHOME` cleared.
    pub fn activate(&mut self, venv_dir: &Path, bin_dir: &Path) -> TaskResult<()> {
        let current = self.search_path().unwrap_or_default();
        let entries = std::iter::once(bin_dir.to_path_buf())
            .chain(std::env::split_paths(&current).filter(|p| p != bin_dir));
        let joined = std::env::join_paths(entries)
            .map_err(|e| TaskError::InvalidConfig(format!("Cannot extend PATH: {}", e)))?;

        self.path = Some(joined);
        self.vars.remove("PATH");
        self.set("VIRTUAL_ENV", venv_dir.to_string_lossy());
        self.remove("PYTHONHOME");
        self.virtual_env = Some(venv_dir.to_path_buf());
        Ok(())
    }

    pub fn apply(&self, cmd: &mut Command) {
        cmd.envs(&self.vars);
        for key in &self.removed {
            cmd.env_remove(key);
        }
        if let Some(path) = &self.path {
            cmd.env("PATH", path);
        }
    }
}
