//! Cross-module reference scanning
//!
//! Best-effort static analysis over an installed module's text files,
//! extracting soft references to other modules: explicit `@load <path>`
//! directives and embedded `<pack_dir>/<module>/` path literals. The result
//! informs audits of undeclared coupling; it never gates installation.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use walkdir::WalkDir;

use crate::error::Result;

/// How a reference was expressed in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// `@load path/to/file` directive
    Load,
    /// Embedded path literal naming another module directory
    PathRef,
}

/// A soft reference from one module's files to another module
#[derive(Debug, Clone)]
pub struct FileReference {
    pub source_module: String,
    pub target_module: String,
    pub path: String,
    pub kind: RefKind,
}

const TEXT_EXTENSIONS: &[&str] = &["md", "xml", "yaml", "yml"];

/// Scan one installed module for references to other modules
///
/// Duplicates (same source, target, and path) are suppressed. Returns an
/// empty list when the module directory does not exist.
#[allow(clippy::expect_used)] // the two patterns are static and known-valid
pub fn scan_references(
    pack_root: &Path,
    module_id: &str,
    pack_dir: &str,
) -> Result<Vec<FileReference>> {
    let module_dir = pack_root.join(module_id);
    if !module_dir.is_dir() {
        return Ok(Vec::new());
    }

    // e.g. `_agentpack/other-module/` embedded in instructions
    let path_literal = Regex::new(&format!(
        r"{}/([a-z][A-Za-z0-9_-]*)/",
        regex::escape(pack_dir)
    ))
    .expect("static pattern");
    let load_directive = Regex::new(r"@load\s+([^\s]+)").expect("static pattern");

    let mut files: Vec<_> = WalkDir::new(&module_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    let mut refs = Vec::new();
    for file in files {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };

        for capture in load_directive.captures_iter(&content) {
            if let Some(reference) = parse_load_ref(&capture[1], module_id, pack_dir) {
                refs.push(reference);
            }
        }

        for capture in path_literal.captures_iter(&content) {
            let target = capture[1].to_string();
            if target != module_id && target != "core" {
                refs.push(FileReference {
                    source_module: module_id.to_string(),
                    target_module: target,
                    path: capture[0].to_string(),
                    kind: RefKind::PathRef,
                });
            }
        }
    }

    Ok(dedupe(refs))
}

/// Extract the target module from a `@load` path
///
/// Accepts `other/agents/foo.md` and `<pack_dir>/other/agents/foo.md`;
/// single-segment paths carry no module information.
fn parse_load_ref(ref_path: &str, source_module: &str, pack_dir: &str) -> Option<FileReference> {
    let clean = ref_path
        .trim_start_matches("./")
        .trim_start_matches('/')
        .strip_prefix(&format!("{pack_dir}/"))
        .unwrap_or_else(|| ref_path.trim_start_matches("./").trim_start_matches('/'));

    let mut segments = clean.split('/');
    let target = segments.next()?;
    segments.next()?;

    if target == source_module || target.is_empty() {
        return None;
    }

    Some(FileReference {
        source_module: source_module.to_string(),
        target_module: target.to_string(),
        path: ref_path.to_string(),
        kind: RefKind::Load,
    })
}

fn dedupe(refs: Vec<FileReference>) -> Vec<FileReference> {
    let mut seen = HashSet::new();
    refs.into_iter()
        .filter(|r| {
            seen.insert(format!(
                "{}->{}:{}",
                r.source_module, r.target_module, r.path
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pack_with_file(module: &str, rel: &str, content: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join(module).join(rel);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, content).unwrap();
        temp
    }

    #[test]
    fn test_scan_load_directive() {
        let pack = pack_with_file("bmm", "agents/dev.md", "@load core-ext/tasks/review.md\n");
        let refs = scan_references(pack.path(), "bmm", "_agentpack").unwrap();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].target_module, "core-ext");
        assert_eq!(refs[0].kind, RefKind::Load);
    }

    #[test]
    fn test_scan_path_literal() {
        let pack = pack_with_file(
            "bmm",
            "tasks/plan.md",
            "See _agentpack/design-kit/workflows/spec/workflow.yaml\n",
        );
        let refs = scan_references(pack.path(), "bmm", "_agentpack").unwrap();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].target_module, "design-kit");
        assert_eq!(refs[0].kind, RefKind::PathRef);
    }

    #[test]
    fn test_scan_ignores_self_and_core() {
        let pack = pack_with_file(
            "bmm",
            "agents/dev.md",
            "_agentpack/bmm/agents/dev.md and _agentpack/core/tasks/run.md\n",
        );
        let refs = scan_references(pack.path(), "bmm", "_agentpack").unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_scan_deduplicates() {
        let pack = pack_with_file(
            "bmm",
            "agents/dev.md",
            "@load other/tasks/a.md\n@load other/tasks/a.md\n",
        );
        let refs = scan_references(pack.path(), "bmm", "_agentpack").unwrap();
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_scan_skips_non_text_files() {
        let pack = pack_with_file("bmm", "data/blob.bin", "@load other/tasks/a.md");
        let refs = scan_references(pack.path(), "bmm", "_agentpack").unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_scan_missing_module_dir() {
        let temp = TempDir::new().unwrap();
        let refs = scan_references(temp.path(), "ghost", "_agentpack").unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_parse_load_ref_with_pack_prefix() {
        let r = parse_load_ref("_agentpack/other/agents/x.md", "bmm", "_agentpack").unwrap();
        assert_eq!(r.target_module, "other");
    }

    #[test]
    fn test_parse_load_ref_single_segment_is_none() {
        assert!(parse_load_ref("justafile.md", "bmm", "_agentpack").is_none());
    }
}
