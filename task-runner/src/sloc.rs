use crate::error::{TaskError, TaskResult};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLines {
    /// Path relative to the counted root
    pub path: PathBuf,
    pub lines: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlocReport {
    pub files: Vec<FileLines>,
    pub total: usize,
}

/// `wc -l` style listing: one line per file, then the total.
impl fmt::Display for SlocReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            writeln!(f, "{:>8} {}", file.lines, file.path.display())?;
        }
        write!(f, "{:>8} total", self.total)
    }
}

/// Count lines in every file under `root` matching `pattern`.
///
/// Files inside any of the `exclude` directories (relative to `root`) are
/// skipped, as are directories. Entries that cannot be read are logged and
/// left out of the report.
pub fn count_lines(root: &Path, pattern: &str, exclude: &[PathBuf]) -> TaskResult<SlocReport> {
    let full_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        pattern
    );
    let entries = glob::glob(&full_pattern).map_err(|source| TaskError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut report = SlocReport::default();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        if exclude.iter().any(|dir| relative.starts_with(dir)) {
            debug!("Excluding {}", relative.display());
            continue;
        }

        let Some(lines) = read_line_count(&path) else {
            continue;
        };
        report.total += lines;
        report.files.push(FileLines {
            path: relative,
            lines,
        });
    }

    report.files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(report)
}

fn read_line_count(path: &Path) -> Option<usize> {
    match std::fs::read(path) {
        Ok(bytes) => Some(count_file_lines(&bytes)),
        Err(e) => {
            warn!("Skipping unreadable file {}: {}", path.display(), e);
            None
        }
    }
}

/// Newline count, plus one for a trailing line without a newline.
fn count_file_lines(bytes: &[u8]) -> usize {
    let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
    match bytes.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}
