//! Project configuration (`agentpack.yaml`)
//!
//! Holds the pack dir name and an optional module source root. The pack dir
//! is the single explicit value threaded through the installer and compiler;
//! nothing else carries placeholder state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, file_read_failed};
use crate::pack::DEFAULT_PACK_DIR;

/// Config file name at the project root
pub const CONFIG_FILE: &str = "agentpack.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackConfig {
    /// Installation root folder name inside the project
    #[serde(default = "default_pack_dir")]
    pub pack_dir: String,

    /// Module source tree (overridden by --source / AGENTPACK_SOURCE)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<PathBuf>,
}

fn default_pack_dir() -> String {
    DEFAULT_PACK_DIR.to_string()
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            pack_dir: default_pack_dir(),
            source_root: None,
        }
    }
}

impl PackConfig {
    /// Load project config, falling back to defaults when the file is absent
    /// or malformed (a bad config never aborts a run)
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| file_read_failed(&path, &e))?;
        Ok(serde_yaml::from_str(&content).unwrap_or_default())
    }

    /// Apply CLI/env overrides on top of the loaded config
    pub fn with_overrides(mut self, source: Option<PathBuf>, pack_dir: Option<String>) -> Self {
        if let Some(source) = source {
            self.source_root = Some(source);
        }
        if let Some(pack_dir) = pack_dir {
            self.pack_dir = pack_dir;
        }
        self
    }
}
