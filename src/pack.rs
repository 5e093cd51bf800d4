//! Installed pack layout
//!
//! One place knows the reserved directory names: per-module content dirs at
//! the pack root, `_config/` for manifests and run metadata, `_memory/` for
//! sidecar data merged additively across installs. `_memory/` outside the
//! sidecar dirs is user territory and is never written by the installer.

use std::path::{Path, PathBuf};

/// Default installation root folder name inside a project
pub const DEFAULT_PACK_DIR: &str = "_agentpack";

/// Reserved configuration subdirectory (manifests live here)
pub const CONFIG_DIR: &str = "_config";

/// Reserved auxiliary subdirectory (sidecar data lives here)
pub const MEMORY_DIR: &str = "_memory";

/// Suffix marking an agent sidecar directory
pub const SIDECAR_SUFFIX: &str = "-sidecar";

/// Template variable rewritten to the pack dir name during install
pub const PACK_DIR_VAR: &str = "pack-dir";

/// Path assembly for an installed pack
#[derive(Debug, Clone)]
pub struct PackPaths {
    root: PathBuf,
}

impl PackPaths {
    pub fn new(project_root: &Path, pack_dir: &str) -> Self {
        Self {
            root: project_root.join(pack_dir),
        }
    }

    /// The pack root (`<project>/<pack_dir>`)
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn module_dir(&self, module_id: &str) -> PathBuf {
        self.root.join(module_id)
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    pub fn memory_dir(&self) -> PathBuf {
        self.root.join(MEMORY_DIR)
    }

    pub fn sidecar_dir(&self, agent_name: &str) -> PathBuf {
        self.memory_dir().join(format!("{agent_name}{SIDECAR_SUFFIX}"))
    }

    pub fn install_manifest(&self) -> PathBuf {
        self.config_dir().join("manifest.yaml")
    }

    pub fn agent_party(&self) -> PathBuf {
        self.config_dir().join("agent-party.xml")
    }

    pub fn is_installed(&self, module_id: &str) -> bool {
        self.module_dir(module_id).is_dir()
    }
}

/// Whether a module-relative path belongs to a sidecar directory
pub fn is_sidecar_path(relative: &str) -> bool {
    relative
        .split('/')
        .any(|segment| segment.ends_with(SIDECAR_SUFFIX))
}
