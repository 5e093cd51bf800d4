//! Smart sync: update without clobbering user edits
//!
//! For every deployable source file: if the target does not have it yet,
//! copy it. If it does, compare the hash of the source *as it would be
//! installed* (after placeholder substitution) against the installed file.
//! A differing hash means the user modified the deployed copy — the file is
//! preserved, not overwritten. That preservation is the central correctness
//! property of the sync engine.

use std::path::Path;

use crate::error::Result;
use crate::hash;

use super::{Installer, deployable_files, write_file};

/// What a smart sync did
#[derive(Debug, Default)]
pub struct SyncOutcome {
    /// Files newly copied into the target
    pub copied: usize,
    /// Files left untouched because their content drifted from source
    pub preserved: Vec<String>,
}

/// Synchronize one module's target directory against its source
pub fn smart_sync(installer: &Installer, source: &Path, target: &Path) -> Result<SyncOutcome> {
    let mut outcome = SyncOutcome::default();

    for relative in deployable_files(source) {
        let dest = target.join(&relative);
        let rendered = installer.render_source(source, &relative)?;

        if !dest.exists() {
            write_file(&dest, &rendered)?;
            outcome.copied += 1;
            continue;
        }

        let source_hash = hash::hash_bytes(&rendered);
        let installed_hash = hash::hash_file(&dest)?;
        if source_hash != installed_hash {
            outcome.preserved.push(relative);
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::PackPaths;
    use crate::registry::Registry;
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
        registry: Registry,
        paths: PackPaths,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let source_root = temp.path().join("modules");
        let project = temp.path().join("project");

        let module = source_root.join("bmm");
        std::fs::create_dir_all(module.join("tasks")).unwrap();
        std::fs::write(module.join("module.yaml"), "code: bmm\n").unwrap();
        std::fs::write(module.join("tasks/review.md"), "# Review {{pack-dir}}\n").unwrap();
        std::fs::create_dir_all(&project).unwrap();

        Fixture {
            registry: Registry::new(&source_root),
            paths: PackPaths::new(&project, "_agentpack"),
            temp,
        }
    }

    #[test]
    fn test_sync_preserves_user_edit_and_copies_new_files() {
        let fx = fixture();
        let installer = Installer::new(&fx.registry, &fx.paths, "_agentpack");
        installer.install("bmm", |_| {}).unwrap();

        // user edits a deployed file
        let deployed = fx.paths.module_dir("bmm").join("tasks/review.md");
        std::fs::write(&deployed, "my own version\n").unwrap();

        // a new file appears in the source
        let module = fx.temp.path().join("modules/bmm");
        std::fs::write(module.join("tasks/added.md"), "# Added\n").unwrap();

        let result = installer.update("bmm", false).unwrap();

        assert_eq!(std::fs::read_to_string(&deployed).unwrap(), "my own version\n");
        assert_eq!(result.files_preserved, vec!["tasks/review.md".to_string()]);
        assert_eq!(result.files_installed, 1);
        assert!(fx.paths.module_dir("bmm").join("tasks/added.md").is_file());
    }

    #[test]
    fn test_sync_unmodified_substituted_file_is_not_drift() {
        let fx = fixture();
        let installer = Installer::new(&fx.registry, &fx.paths, "_agentpack");
        installer.install("bmm", |_| {}).unwrap();

        // nothing changed: the substituted install output still matches the
        // rendered source, so no file reads as modified
        let result = installer.update("bmm", false).unwrap();
        assert!(result.files_preserved.is_empty());
        assert_eq!(result.files_installed, 0);
    }

    #[test]
    fn test_forced_update_overwrites_user_edit() {
        let fx = fixture();
        let installer = Installer::new(&fx.registry, &fx.paths, "_agentpack");
        installer.install("bmm", |_| {}).unwrap();

        let deployed = fx.paths.module_dir("bmm").join("tasks/review.md");
        std::fs::write(&deployed, "my own version\n").unwrap();

        installer.update("bmm", true).unwrap();
        assert_eq!(
            std::fs::read_to_string(&deployed).unwrap(),
            "# Review _agentpack\n"
        );
    }
}
