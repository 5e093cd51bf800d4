//! Module source registry
//!
//! Reads module descriptors from a source tree whose immediate
//! subdirectories are modules. A descriptor lives at the module root or
//! inside the reserved installer subdirectory; the `custom.yaml` variants
//! mark user-authored modules.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Reserved installer-only subdirectory inside a module source
pub const INSTALLER_DIR: &str = "_installer";

/// Subdirectory for consumer-specific sub-module content (not deployed)
pub const SUB_MODULES_DIR: &str = "sub-modules";

/// Per-module metadata read from the descriptor file
#[derive(Debug, Clone)]
pub struct ModuleMeta {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub version: String,
    pub source_path: PathBuf,
    pub dependencies: Vec<String>,
    pub is_custom: bool,
    pub default_selected: bool,
}

#[derive(Debug, Deserialize, Default)]
struct Descriptor {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    default_selected: bool,
}

/// Module lookup over a source tree
#[derive(Debug, Clone)]
pub struct Registry {
    source_root: PathBuf,
}

impl Registry {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Read the descriptor for a module directory
    ///
    /// Checks the candidate locations in priority order; a missing or
    /// malformed descriptor yields `None` (the module is skipped, the run
    /// continues).
    pub fn read_descriptor(module_path: &Path, fallback_id: &str) -> Option<ModuleMeta> {
        let candidates = [
            module_path.join("module.yaml"),
            module_path.join(INSTALLER_DIR).join("module.yaml"),
            module_path.join(INSTALLER_DIR).join("custom.yaml"),
            module_path.join("custom.yaml"),
        ];

        let config_path = candidates.iter().find(|p| p.is_file())?;
        let content = std::fs::read_to_string(config_path).ok()?;
        let descriptor: Descriptor = serde_yaml::from_str(&content).ok()?;
        let is_custom = config_path
            .file_name()
            .is_some_and(|n| n == "custom.yaml");

        let id = descriptor.code.unwrap_or_else(|| fallback_id.to_string());
        Some(ModuleMeta {
            display_name: descriptor.name.unwrap_or_else(|| humanize(&id)),
            description: descriptor.description.unwrap_or_default(),
            version: descriptor.version.unwrap_or_else(|| "1.0.0".to_string()),
            source_path: module_path.to_path_buf(),
            dependencies: descriptor.dependencies,
            is_custom,
            default_selected: descriptor.default_selected,
            id,
        })
    }

    /// Find the source directory for a module id
    pub fn find_source(&self, module_id: &str) -> Option<PathBuf> {
        for meta in self.scan() {
            if meta.id == module_id {
                return Some(meta.source_path);
            }
        }
        None
    }

    /// Direct dependencies of a module; empty when the module is unknown
    ///
    /// An unknown module and a module with no dependencies are
    /// indistinguishable here, by contract with the resolver.
    pub fn dependencies(&self, module_id: &str) -> Vec<String> {
        self.find_source(module_id)
            .and_then(|path| Self::read_descriptor(&path, module_id))
            .map(|meta| meta.dependencies)
            .unwrap_or_default()
    }

    /// All modules the source tree offers, split into regular and custom
    ///
    /// The `core` module is omitted: it is auto-included by install when
    /// present, never selected by hand.
    pub fn list_available(&self) -> Result<(Vec<ModuleMeta>, Vec<ModuleMeta>)> {
        let mut modules = Vec::new();
        let mut custom = Vec::new();

        for meta in self.scan() {
            if meta.id == "core" {
                continue;
            }
            if meta.is_custom {
                custom.push(meta);
            } else {
                modules.push(meta);
            }
        }

        Ok((modules, custom))
    }

    /// Whether the source tree provides a `core` module
    pub fn has_core(&self) -> bool {
        self.find_source("core").is_some()
    }

    fn scan(&self) -> Vec<ModuleMeta> {
        let Ok(entries) = std::fs::read_dir(&self.source_root) else {
            return Vec::new();
        };

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|e| e.path())
            .collect();
        dirs.sort();

        dirs.into_iter()
            .filter_map(|path| {
                let fallback = path.file_name()?.to_string_lossy().to_string();
                Self::read_descriptor(&path, &fallback)
            })
            .collect()
    }
}

/// Turn a slug into a display name: `team-lead` -> `Team Lead`
fn humanize(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_module(root: &Path, dir: &str, descriptor: &str) {
        let module = root.join(dir);
        std::fs::create_dir_all(&module).unwrap();
        std::fs::write(module.join("module.yaml"), descriptor).unwrap();
    }

    #[test]
    fn test_read_descriptor_basic() {
        let temp = TempDir::new().unwrap();
        write_module(
            temp.path(),
            "bmm",
            "code: bmm\nname: Method Module\nversion: 2.1.0\ndependencies:\n  - core\n",
        );

        let meta = Registry::read_descriptor(&temp.path().join("bmm"), "bmm").unwrap();
        assert_eq!(meta.id, "bmm");
        assert_eq!(meta.display_name, "Method Module");
        assert_eq!(meta.version, "2.1.0");
        assert_eq!(meta.dependencies, vec!["core".to_string()]);
        assert!(!meta.is_custom);
    }

    #[test]
    fn test_read_descriptor_defaults() {
        let temp = TempDir::new().unwrap();
        write_module(temp.path(), "team-lead", "description: A module\n");

        let meta = Registry::read_descriptor(&temp.path().join("team-lead"), "team-lead").unwrap();
        assert_eq!(meta.id, "team-lead");
        assert_eq!(meta.display_name, "Team Lead");
        assert_eq!(meta.version, "1.0.0");
        assert!(meta.dependencies.is_empty());
    }

    #[test]
    fn test_custom_descriptor_flag() {
        let temp = TempDir::new().unwrap();
        let module = temp.path().join("mine");
        std::fs::create_dir_all(&module).unwrap();
        std::fs::write(module.join("custom.yaml"), "code: mine\n").unwrap();

        let meta = Registry::read_descriptor(&module, "mine").unwrap();
        assert!(meta.is_custom);
    }

    #[test]
    fn test_missing_descriptor_is_none() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("bare")).unwrap();
        assert!(Registry::read_descriptor(&temp.path().join("bare"), "bare").is_none());
    }

    #[test]
    fn test_find_source_by_code() {
        let temp = TempDir::new().unwrap();
        // directory name differs from the declared code
        write_module(temp.path(), "method-module", "code: bmm\n");

        let registry = Registry::new(temp.path());
        let found = registry.find_source("bmm").unwrap();
        assert_eq!(found, temp.path().join("method-module"));
        assert!(registry.find_source("nope").is_none());
    }

    #[test]
    fn test_dependencies_unknown_module_is_empty() {
        let temp = TempDir::new().unwrap();
        let registry = Registry::new(temp.path());
        assert!(registry.dependencies("ghost").is_empty());
    }

    #[test]
    fn test_list_available_skips_core_and_splits_custom() {
        let temp = TempDir::new().unwrap();
        write_module(temp.path(), "core", "code: core\n");
        write_module(temp.path(), "bmm", "code: bmm\ndefault_selected: true\n");
        let custom = temp.path().join("mine");
        std::fs::create_dir_all(&custom).unwrap();
        std::fs::write(custom.join("custom.yaml"), "code: mine\n").unwrap();

        let registry = Registry::new(temp.path());
        let (modules, custom) = registry.list_available().unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].id, "bmm");
        assert!(modules[0].default_selected);
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].id, "mine");
        assert!(registry.has_core());
    }
}
