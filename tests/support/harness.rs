use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// TestHarness provides isolated test environments for running the
/// labcheck binary. Each harness creates a temporary directory that acts
/// as the project root; documents and an optional .labcheck.yml are
/// written into it.
pub struct TestHarness {
    pub dir: TempDir,
    pub labcheck_binary: PathBuf,
}

impl TestHarness {
    /// Creates a new empty test harness (auto-cleaned on drop).
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        TestHarness {
            dir: temp_dir,
            labcheck_binary: PathBuf::from(env!("CARGO_BIN_EXE_labcheck")),
        }
    }

    /// Returns the base directory path (the TempDir path).
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Executes the labcheck binary with the given arguments in the
    /// harness directory. HOME points into the harness so no global
    /// config leaks in from the developer machine.
    pub fn run(&self, args: &[&str]) -> std::process::Output {
        Command::new(&self.labcheck_binary)
            .args(args)
            .current_dir(self.path())
            .env("HOME", self.path())
            .output()
            .expect("Failed to run labcheck binary")
    }

    /// Writes a document with the given relative path and content.
    pub fn write_doc(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write document");
        path
    }

    /// Writes a project-level .labcheck.yml with the given content.
    #[allow(dead_code)]
    pub fn write_config(&self, content: &str) {
        fs::write(self.path().join(".labcheck.yml"), content).expect("Failed to write config");
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
