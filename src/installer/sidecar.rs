//! Sidecar deployment into the shared `_memory/` area
//!
//! A sidecar is a per-agent data directory (`<agent>-sidecar/` under a
//! module's `agents/`). Sidecars deploy additively: a file is written only
//! if it does not already exist, so user content in `_memory/` survives
//! every reinstall.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, file_write_failed};
use crate::pack::{PackPaths, SIDECAR_SUFFIX};

use super::write_file;

/// Deploy all sidecars of a module source, additively
pub fn deploy(source: &Path, paths: &PackPaths) -> Result<usize> {
    let mut deployed = 0;

    for sidecar in sidecar_dirs(source) {
        let Some(name) = sidecar.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let agent = name.trim_end_matches(SIDECAR_SUFFIX);
        let dest_root = paths.sidecar_dir(agent);

        std::fs::create_dir_all(&dest_root).map_err(|e| file_write_failed(&dest_root, &e))?;

        let mut files: Vec<PathBuf> = WalkDir::new(&sidecar)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();

        for file in files {
            let relative = file.strip_prefix(&sidecar).unwrap_or(&file);
            let dest = dest_root.join(relative);
            if dest.exists() {
                continue;
            }
            let content = std::fs::read(&file)
                .map_err(|e| crate::error::file_read_failed(&file, &e))?;
            write_file(&dest, &content)?;
            deployed += 1;
        }
    }

    Ok(deployed)
}

/// Remove the sidecars belonging to a module's agents
pub fn remove_for_module(source: &Path, paths: &PackPaths) -> Result<()> {
    for sidecar in sidecar_dirs(source) {
        let Some(name) = sidecar.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let agent = name.trim_end_matches(SIDECAR_SUFFIX);
        let dest = paths.sidecar_dir(agent);
        if dest.is_dir() {
            std::fs::remove_dir_all(&dest).map_err(|e| file_write_failed(&dest, &e))?;
        }
    }
    Ok(())
}

/// Sidecar directories under a module source's `agents/`
fn sidecar_dirs(source: &Path) -> Vec<PathBuf> {
    let agents_dir = source.join("agents");
    let Ok(entries) = std::fs::read_dir(agents_dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(SIDECAR_SUFFIX))
        })
        .collect();
    dirs.sort();
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn module_with_sidecar(temp: &TempDir) -> PathBuf {
        let module = temp.path().join("modules/bmm");
        std::fs::create_dir_all(module.join("agents/sage-sidecar/deep")).unwrap();
        std::fs::write(module.join("agents/sage-sidecar/notes.md"), "seed\n").unwrap();
        std::fs::write(module.join("agents/sage-sidecar/deep/ref.md"), "deep\n").unwrap();
        module
    }

    #[test]
    fn test_deploy_copies_nested_files() {
        let temp = TempDir::new().unwrap();
        let module = module_with_sidecar(&temp);
        let paths = PackPaths::new(&temp.path().join("project"), "_agentpack");

        let deployed = deploy(&module, &paths).unwrap();
        assert_eq!(deployed, 2);
        assert!(paths.sidecar_dir("sage").join("deep/ref.md").is_file());
    }

    #[test]
    fn test_deploy_never_overwrites() {
        let temp = TempDir::new().unwrap();
        let module = module_with_sidecar(&temp);
        let paths = PackPaths::new(&temp.path().join("project"), "_agentpack");

        deploy(&module, &paths).unwrap();
        std::fs::write(paths.sidecar_dir("sage").join("notes.md"), "user edit\n").unwrap();

        let deployed = deploy(&module, &paths).unwrap();
        assert_eq!(deployed, 0);
        assert_eq!(
            std::fs::read_to_string(paths.sidecar_dir("sage").join("notes.md")).unwrap(),
            "user edit\n"
        );
    }

    #[test]
    fn test_remove_for_module_only_touches_own_sidecars() {
        let temp = TempDir::new().unwrap();
        let module = module_with_sidecar(&temp);
        let paths = PackPaths::new(&temp.path().join("project"), "_agentpack");

        deploy(&module, &paths).unwrap();
        // a sidecar owned by some other module
        let other = paths.sidecar_dir("other");
        std::fs::create_dir_all(&other).unwrap();
        std::fs::write(other.join("keep.md"), "other\n").unwrap();

        remove_for_module(&module, &paths).unwrap();
        assert!(!paths.sidecar_dir("sage").exists());
        assert!(other.join("keep.md").is_file());
    }
}
