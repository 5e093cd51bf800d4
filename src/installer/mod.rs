//! Module installation into the pack
//!
//! Install is a clean copy: any previous module directory is removed, then
//! every deployable file is written, with placeholder substitution applied
//! to recognized text files. Sidecar directories deploy additively into the
//! shared `_memory/` area. Update without `--force` is a smart sync that
//! never overwrites a file the user has modified (see [`sync`]).

pub mod sidecar;
pub mod sync;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{
    Result, file_read_failed, file_write_failed, module_not_found, module_not_installed,
};
use crate::pack::{PACK_DIR_VAR, PackPaths, is_sidecar_path};
use crate::registry::{INSTALLER_DIR, Registry, SUB_MODULES_DIR};
use crate::template::{self, Answers};

/// Extensions that undergo placeholder substitution during copy
pub const TEXT_EXTENSIONS: &[&str] = &["md", "xml", "yaml", "yml", "txt", "json", "toml", "mdc"];

/// Outcome of an install or update for one module
#[derive(Debug)]
pub struct InstallResult {
    pub module: String,
    pub path: PathBuf,
    /// Files written (copied or rewritten) by this operation
    pub files_installed: usize,
    /// Files left untouched because the installed copy has drifted
    pub files_preserved: Vec<String>,
}

/// Installer for one run, carrying the pack layout and substitution values
pub struct Installer<'a> {
    registry: &'a Registry,
    paths: &'a PackPaths,
    substitutions: Answers,
}

impl<'a> Installer<'a> {
    /// `pack_dir` is the configured installation root folder name; it is the
    /// only substitution value the installer applies.
    pub fn new(registry: &'a Registry, paths: &'a PackPaths, pack_dir: &str) -> Self {
        let mut substitutions = Answers::new();
        substitutions.insert(PACK_DIR_VAR, pack_dir);
        Self {
            registry,
            paths,
            substitutions,
        }
    }

    /// Clean-install a module into the pack
    pub fn install(
        &self,
        module_id: &str,
        mut on_file: impl FnMut(&str),
    ) -> Result<InstallResult> {
        let source = self
            .registry
            .find_source(module_id)
            .ok_or_else(|| module_not_found(module_id))?;
        let target = self.paths.module_dir(module_id);

        if target.exists() {
            std::fs::remove_dir_all(&target).map_err(|e| file_write_failed(&target, &e))?;
        }

        let mut files_installed = 0;
        for relative in deployable_files(&source) {
            let content = self.render_source(&source, &relative)?;
            write_file(&target.join(&relative), &content)?;
            files_installed += 1;
            on_file(&relative);
        }

        sidecar::deploy(&source, self.paths)?;

        Ok(InstallResult {
            module: module_id.to_string(),
            path: target,
            files_installed,
            files_preserved: Vec::new(),
        })
    }

    /// Update an installed module
    ///
    /// Non-forced updates smart-sync; `force` wipes and reinstalls.
    pub fn update(&self, module_id: &str, force: bool) -> Result<InstallResult> {
        let source = self
            .registry
            .find_source(module_id)
            .ok_or_else(|| module_not_found(module_id))?;
        let target = self.paths.module_dir(module_id);
        if !target.is_dir() {
            return Err(module_not_installed(module_id));
        }

        if force {
            return self.install(module_id, |_| {});
        }

        let outcome = sync::smart_sync(self, &source, &target)?;
        Ok(InstallResult {
            module: module_id.to_string(),
            path: target,
            files_installed: outcome.copied,
            files_preserved: outcome.preserved,
        })
    }

    /// Remove an installed module and the sidecars belonging to it
    pub fn remove(&self, module_id: &str) -> Result<()> {
        let target = self.paths.module_dir(module_id);
        if !target.is_dir() {
            return Err(module_not_installed(module_id));
        }

        // Sidecar ownership is known only from the module source; without a
        // source the sidecars stay (user data is never guessed at).
        if let Some(source) = self.registry.find_source(module_id) {
            sidecar::remove_for_module(&source, self.paths)?;
        }

        std::fs::remove_dir_all(&target).map_err(|e| file_write_failed(&target, &e))?;
        Ok(())
    }

    /// Produce a file's content as it would be installed
    ///
    /// Text files get placeholder substitution; everything else passes
    /// through byte-for-byte. Smart sync hashes exactly this output.
    pub(crate) fn render_source(&self, source: &Path, relative: &str) -> Result<Vec<u8>> {
        let file = source.join(relative);
        if is_text_file(relative) {
            let content =
                std::fs::read_to_string(&file).map_err(|e| file_read_failed(&file, &e))?;
            Ok(template::substitute(&content, &self.substitutions).into_bytes())
        } else {
            std::fs::read(&file).map_err(|e| file_read_failed(&file, &e))
        }
    }
}

/// Relative paths of the files a module deploys, sorted
///
/// Skips consumer sub-module content, the installer-only directory, the
/// descriptor files, raw agent definitions, and sidecar directories (those
/// deploy separately).
pub(crate) fn deployable_files(source: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(source)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            e.path()
                .strip_prefix(source)
                .ok()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .filter(|relative| !is_excluded(relative))
        .collect();
    files.sort();
    files
}

fn is_excluded(relative: &str) -> bool {
    relative.starts_with(&format!("{SUB_MODULES_DIR}/"))
        || relative.starts_with(&format!("{INSTALLER_DIR}/"))
        || relative == "module.yaml"
        || relative == "custom.yaml"
        || relative.ends_with(".agent.yaml")
        || is_sidecar_path(relative)
}

fn is_text_file(relative: &str) -> bool {
    Path::new(relative)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

pub(crate) fn write_file(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| file_write_failed(parent, &e))?;
    }
    std::fs::write(target, content).map_err(|e| file_write_failed(target, &e))
}
