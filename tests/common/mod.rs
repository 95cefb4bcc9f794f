use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Variables the binary reads from its environment; cleared so the host CI cannot leak in.
const AMBIENT_VARS: &[&str] = &[
    "INPUT_TASK-DEFINITION",
    "INPUT_CONTAINER-NAME",
    "INPUT_IMAGE",
    "INPUT_ENVIRONMENT-VARIABLES",
    "INPUT_ENVIRONMENT-FILES",
    "GITHUB_WORKSPACE",
    "RUNNER_TEMP",
    "GITHUB_OUTPUT",
    "TASKDEF_RENDER_LOG",
];

/// Scratch layout: `<root>/ws` workspace, `<root>/tmp` runner temp, `<root>/github_output`.
pub struct Sandbox {
    pub dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tmpdir");
        std::fs::create_dir_all(dir.path().join("ws")).unwrap();
        std::fs::create_dir_all(dir.path().join("tmp")).unwrap();
        Sandbox { dir }
    }

    pub fn workspace(&self) -> PathBuf {
        self.dir.path().join("ws")
    }

    pub fn temp(&self) -> PathBuf {
        self.dir.path().join("tmp")
    }

    pub fn output_file(&self) -> PathBuf {
        self.dir.path().join("github_output")
    }

    pub fn write_ws(&self, rel: &str, contents: &str) -> PathBuf {
        let p = self.workspace().join(rel);
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&p, contents).unwrap();
        p
    }

    /// Command with a clean environment pointing at this sandbox.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_taskdef-render"));
        for k in AMBIENT_VARS {
            cmd.env_remove(k);
        }
        cmd.env("GITHUB_WORKSPACE", self.workspace())
            .env("RUNNER_TEMP", self.temp())
            .env("GITHUB_OUTPUT", self.output_file())
            .env("NO_COLOR", "1");
        cmd
    }

    pub fn temp_entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.temp())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    /// Path recorded for `task-definition` in the output command file.
    pub fn recorded_output(&self) -> Option<PathBuf> {
        let text = std::fs::read_to_string(self.output_file()).ok()?;
        text.lines()
            .find_map(|l| l.strip_prefix("task-definition="))
            .map(PathBuf::from)
    }
}

#[allow(dead_code)]
pub fn read_json(p: &Path) -> serde_json::Value {
    let s = std::fs::read_to_string(p).expect("read rendered file");
    serde_json::from_str(&s).expect("rendered file is JSON")
}

#[allow(dead_code)]
pub fn assert_success(out: &Output) {
    assert!(
        out.status.success(),
        "taskdef-render exited non-zero: {:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
}

#[allow(dead_code)]
pub fn assert_failed_with(out: &Output, message: &str) {
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        out.status.code(),
        Some(1),
        "expected exit 1\nstdout:\n{}\nstderr:\n{}",
        stdout,
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(
        stdout.contains(&format!("::error::{message}")),
        "expected error command with '{}', got:\n{}",
        message,
        stdout
    );
}
