//! Common test utilities for agentpack integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test project with its own module source tree
pub struct TestProject {
    /// Temporary directory holding both the source tree and the project
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the project root (install target)
    pub project: PathBuf,
    /// Path to the module source tree
    pub source: PathBuf,
}

impl TestProject {
    /// Create a new test project with an empty source tree
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let project = temp.path().join("project");
        let source = temp.path().join("modules");
        std::fs::create_dir_all(&project).expect("Failed to create project directory");
        std::fs::create_dir_all(&source).expect("Failed to create source directory");
        Self {
            temp,
            project,
            source,
        }
    }

    /// Create a module in the source tree with the given descriptor
    pub fn create_module(&self, name: &str, descriptor: &str) -> PathBuf {
        let module = self.source.join(name);
        std::fs::create_dir_all(&module).expect("Failed to create module directory");
        std::fs::write(module.join("module.yaml"), descriptor)
            .expect("Failed to write module descriptor");
        module
    }

    /// Write a file under the source tree
    pub fn write_source_file(&self, path: &str, content: &str) {
        let file = self.source.join(path);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file, content).expect("Failed to write source file");
    }

    /// Write a file under the project
    #[allow(dead_code)]
    pub fn write_project_file(&self, path: &str, content: &str) {
        let file = self.project.join(path);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file, content).expect("Failed to write project file");
    }

    /// Read a file from the project
    pub fn read_project_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.project.join(path)).expect("Failed to read project file")
    }

    /// Check if a file or directory exists in the project
    pub fn project_has(&self, path: &str) -> bool {
        self.project.join(path).exists()
    }

    /// An agentpack command wired to this project and source tree
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("agentpack").expect("binary exists");
        cmd.current_dir(&self.project)
            .env_remove("AGENTPACK_PROJECT")
            .env_remove("AGENTPACK_SOURCE")
            .arg("--project")
            .arg(&self.project)
            .arg("--source")
            .arg(&self.source);
        cmd
    }
}

/// A minimal module fixture with one agent, one task, and one workflow
#[allow(dead_code)]
pub fn seed_full_module(project: &TestProject, name: &str, descriptor: &str) {
    project.create_module(name, descriptor);
    project.write_source_file(
        &format!("{name}/agents/guide.md"),
        "---\nname: Guide\ndescription: Shows the way\n---\n\n# Guide\n",
    );
    project.write_source_file(
        &format!("{name}/tasks/review.md"),
        "---\ndescription: Review work\nstandalone: true\n---\n\n# Review\n",
    );
    project.write_source_file(
        &format!("{name}/workflows/plan/workflow.yaml"),
        "description: Plan a feature\nsteps: []\n",
    );
}
