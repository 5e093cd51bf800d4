//! Manifest generation and reading
//!
//! Tabular per-kind index files under `_config/` (agents, workflows, tasks,
//! tools, raw files), the aggregate agent roster, and the install manifest
//! recording what a run deployed. Regeneration fully replaces an index; the
//! merge helper preserves rows of modules outside the current run.

pub mod csv;
pub mod party;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{AgentpackError, Result, file_read_failed, file_write_failed};
use crate::hash;

pub const AGENT_MANIFEST: &str = "agent-manifest.csv";
pub const WORKFLOW_MANIFEST: &str = "workflow-manifest.csv";
pub const TASK_MANIFEST: &str = "task-manifest.csv";
pub const TOOL_MANIFEST: &str = "tool-manifest.csv";
pub const FILES_MANIFEST: &str = "files-manifest.csv";

/// One manifest row: a serializable projection of a discovered artifact
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestEntry {
    pub name: String,
    pub module: String,
    pub description: String,
    pub path: String,
    pub standalone: Option<bool>,
    pub group: Option<String>,
    pub checksum: Option<String>,
}

/// Read a manifest file into entries
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| file_read_failed(path, &e))?;

    let records = csv::parse(&content);
    Ok(records
        .into_iter()
        .map(|record| ManifestEntry {
            name: record.get("name").cloned().unwrap_or_default(),
            module: record.get("module").cloned().unwrap_or_default(),
            description: record.get("description").cloned().unwrap_or_default(),
            path: record.get("path").cloned().unwrap_or_default(),
            standalone: record
                .get("standalone")
                .filter(|v| !v.is_empty())
                .map(|v| v == "true"),
            group: record.get("group").filter(|v| !v.is_empty()).cloned(),
            checksum: record.get("checksum").filter(|v| !v.is_empty()).cloned(),
        })
        .collect())
}

/// Write a manifest file, replacing any previous content
///
/// Optional columns appear only when at least one entry carries them.
pub fn write_manifest(path: &Path, entries: &[ManifestEntry]) -> Result<()> {
    let with_standalone = entries.iter().any(|e| e.standalone.is_some());
    let with_group = entries.iter().any(|e| e.group.is_some());
    let with_checksum = entries.iter().any(|e| e.checksum.is_some());

    let mut headers = vec!["name", "module", "description", "path"];
    if with_standalone {
        headers.push("standalone");
    }
    if with_group {
        headers.push("group");
    }
    if with_checksum {
        headers.push("checksum");
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let mut row = vec![
                entry.name.clone(),
                entry.module.clone(),
                entry.description.clone(),
                entry.path.clone(),
            ];
            if with_standalone {
                row.push(entry.standalone.map(|b| b.to_string()).unwrap_or_default());
            }
            if with_group {
                row.push(entry.group.clone().unwrap_or_default());
            }
            if with_checksum {
                row.push(entry.checksum.clone().unwrap_or_default());
            }
            row
        })
        .collect();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| file_write_failed(parent, &e))?;
    }
    std::fs::write(path, csv::write_rows(&headers, &rows))
        .map_err(|e| file_write_failed(path, &e))
}

/// Scan an installed module for raw file entries with short checksums
pub fn scan_module_files(
    pack_root: &Path,
    module_id: &str,
    extensions: &[&str],
) -> Result<Vec<ManifestEntry>> {
    let module_dir = pack_root.join(module_id);
    if !module_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(&module_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    let mut entries = Vec::new();
    for file in files {
        let relative = file
            .strip_prefix(pack_root)
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        entries.push(ManifestEntry {
            name: file
                .file_stem()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            module: module_id.to_string(),
            description: String::new(),
            path: relative,
            standalone: None,
            group: None,
            checksum: Some(hash::short_checksum(&file)?),
        });
    }
    Ok(entries)
}

/// Merge freshly generated entries over an existing index, preserving rows
/// of modules that were not part of the current run
pub fn merge_entries(
    existing: Vec<ManifestEntry>,
    updated: Vec<ManifestEntry>,
    updated_modules: &[String],
) -> Vec<ManifestEntry> {
    let touched: BTreeSet<&str> = updated_modules.iter().map(String::as_str).collect();
    let mut merged: Vec<ManifestEntry> = existing
        .into_iter()
        .filter(|entry| !touched.contains(entry.module.as_str()))
        .collect();
    merged.extend(updated);
    merged
}

/// A module recorded in the install manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstalledModule {
    pub id: String,
    pub version: String,
    pub hash: String,
}

/// Run metadata written to `_config/manifest.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallManifest {
    pub version: String,
    pub installed_at: String,
    pub updated_at: String,
    pub pack_dir: String,
    pub modules: Vec<InstalledModule>,
}

impl InstallManifest {
    pub fn new(pack_dir: &str, modules: Vec<InstalledModule>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            installed_at: now.clone(),
            updated_at: now,
            pack_dir: pack_dir.to_string(),
            modules,
        }
    }

    /// Carry the original install time forward across updates
    pub fn touched(mut self, previous: Option<&InstallManifest>) -> Self {
        if let Some(previous) = previous {
            self.installed_at = previous.installed_at.clone();
        }
        self
    }
}

/// Read the install manifest; `None` when absent or malformed
pub fn read_install_manifest(path: &Path) -> Option<InstallManifest> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_yaml::from_str(&content).ok()
}

/// Write the install manifest
pub fn write_install_manifest(path: &Path, manifest: &InstallManifest) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| file_write_failed(parent, &e))?;
    }
    let content =
        serde_yaml::to_string(manifest).map_err(|e| AgentpackError::ManifestParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    std::fs::write(path, content).map_err(|e| file_write_failed(path, &e))
}
