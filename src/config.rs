//! Run configuration: where relative inputs resolve, where the rendered file goes,
//! and where named outputs are recorded. Resolved once at the edge and passed in.

use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Root for relative `task-definition` paths.
    pub workspace: PathBuf,
    /// Directory that receives the rendered task definition.
    pub temp_dir: PathBuf,
    /// Command file for named outputs; `None` falls back to stdout workflow commands.
    pub output_file: Option<PathBuf>,
}

fn non_empty_env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

impl RunConfig {
    /// Read `GITHUB_WORKSPACE`, `RUNNER_TEMP` and `GITHUB_OUTPUT`, falling back to
    /// the current directory and the system temp dir.
    pub fn from_env() -> Self {
        let workspace = non_empty_env_path("GITHUB_WORKSPACE")
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let temp_dir = non_empty_env_path("RUNNER_TEMP").unwrap_or_else(env::temp_dir);
        Self {
            workspace,
            temp_dir,
            output_file: non_empty_env_path("GITHUB_OUTPUT"),
        }
    }

    /// Absolute paths are kept; relative ones are joined onto the workspace.
    pub fn resolve_task_definition(&self, input: &str) -> PathBuf {
        let p = Path::new(input);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.workspace.join(p)
        }
    }
}
