//! Gate that skips work for commits which did not touch the library

use crate::error::{ResourceError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Asks git whether a commit touched paths containing a marker
pub struct ChangeGate {
    /// Substring identifying the library in repository paths, e.g. `car-ui-lib`
    marker: String,
    /// Directory git runs in
    workdir: Option<PathBuf>,
}

impl ChangeGate {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            workdir: None,
        }
    }

    pub fn with_workdir(mut self, workdir: impl AsRef<Path>) -> Self {
        self.workdir = Some(workdir.as_ref().to_path_buf());
        self
    }

    /// True when there is no commit to check, or when the commit touched the library
    pub fn has_library_changes(&self, sha: Option<&str>) -> Result<bool> {
        let Some(sha) = sha else {
            return Ok(true);
        };

        let changed = self.changed_files(sha)?;
        let touched = self.touches_library(&changed);
        if !touched {
            info!("Commit {} does not touch {}, skipping", sha, self.marker);
        }
        Ok(touched)
    }

    /// Files changed by a commit, as listed by `git diff-tree`
    pub fn changed_files(&self, sha: &str) -> Result<Vec<String>> {
        let mut command = Command::new("git");
        command
            .args(["diff-tree", "--no-commit-id", "--name-only", "-r", sha])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(workdir) = &self.workdir {
            command.current_dir(workdir);
        }

        debug!("Running git diff-tree for {}", sha);
        let output = command
            .output()
            .map_err(|source| ResourceError::GitSpawn { source })?;

        if !output.status.success() {
            return Err(ResourceError::GitToolFailure {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn touches_library(&self, changed: &[String]) -> bool {
        changed.iter().any(|path| path.contains(&self.marker))
    }
}
