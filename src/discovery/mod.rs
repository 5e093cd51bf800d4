//! Artifact discovery over an installed pack
//!
//! Enumerates agents, workflows, and tasks/tools per module. Workflows and
//! tasks/tools are manifest-first: when a generated index file exists under
//! `_config/` it is trusted as the source of truth; otherwise discovery
//! falls back to a directory walk. Traversal is lexicographically sorted, so
//! re-running against an unchanged tree yields an identical artifact set.

pub mod frontmatter;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::compiler::xml::extract_attribute;
use crate::error::Result;
use crate::manifest::{self, ManifestEntry};
use crate::pack::CONFIG_DIR;

/// A discovered agent definition
#[derive(Debug, Clone)]
pub struct Agent {
    pub name: String,
    pub module: String,
    /// Absolute path; consumers mostly want `relative_path`
    #[allow(dead_code)]
    pub path: PathBuf,
    pub relative_path: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    Yaml,
    Markdown,
}

/// A discovered workflow
#[derive(Debug, Clone)]
pub struct Workflow {
    pub name: String,
    pub module: String,
    pub description: String,
    pub path: String,
    pub kind: WorkflowKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskToolKind {
    Task,
    Tool,
}

impl TaskToolKind {
    pub fn label(self) -> &'static str {
        match self {
            TaskToolKind::Task => "task",
            TaskToolKind::Tool => "tool",
        }
    }
}

/// A discovered task or tool
#[derive(Debug, Clone)]
pub struct TaskTool {
    pub name: String,
    pub module: String,
    pub kind: TaskToolKind,
    pub description: String,
    pub path: String,
    pub standalone: bool,
}

const ARTIFACT_EXTENSIONS: &[&str] = &["md", "xml"];

/// List installed module directories (skips `_` prefixed and hidden)
pub fn list_modules(pack_root: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(pack_root) else {
        return Vec::new();
    };

    let mut modules: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| !name.starts_with('_') && !name.starts_with('.'))
        .collect();
    modules.sort();
    modules
}

/// Discover agents across all installed modules
///
/// Agents are the recognized files directly under `<module>/agents/`;
/// anything named `readme*` is skipped. Front matter is optional.
pub fn discover_agents(pack_root: &Path) -> Result<Vec<Agent>> {
    let mut agents = Vec::new();

    for module in list_modules(pack_root) {
        let agents_dir = pack_root.join(&module).join("agents");
        if !agents_dir.is_dir() {
            continue;
        }

        for file in sorted_files(&agents_dir) {
            let Some(ext) = lower_ext(&file) else {
                continue;
            };
            if !ARTIFACT_EXTENSIONS.contains(&ext.as_str()) {
                continue;
            }
            let name = file_stem(&file);
            if name.to_lowercase().starts_with("readme") {
                continue;
            }

            let meta = std::fs::read_to_string(&file)
                .map(|content| frontmatter::parse(&content).metadata)
                .unwrap_or(serde_yaml::Value::Null);

            agents.push(Agent {
                relative_path: relative_to(&file, pack_root),
                display_name: frontmatter::str_field(&meta, "name")
                    .or_else(|| frontmatter::str_field(&meta, "displayName")),
                description: frontmatter::str_field(&meta, "description"),
                module: module.clone(),
                path: file,
                name,
            });
        }
    }

    Ok(agents)
}

/// Discover workflows, manifest-first
pub fn discover_workflows(pack_root: &Path) -> Result<Vec<Workflow>> {
    let manifest_path = pack_root.join(CONFIG_DIR).join(manifest::WORKFLOW_MANIFEST);
    if manifest_path.is_file() {
        if let Ok(entries) = manifest::read_manifest(&manifest_path) {
            return Ok(entries.into_iter().map(workflow_from_entry).collect());
        }
        // an unreadable manifest falls through to the directory walk
    }

    let mut workflows = Vec::new();
    for module in list_modules(pack_root) {
        let workflow_dir = pack_root.join(&module).join("workflows");
        if !workflow_dir.is_dir() {
            continue;
        }

        for file in walk_sorted(&workflow_dir) {
            if !is_workflow_marker(&file) {
                continue;
            }
            let name = file
                .parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            workflows.push(Workflow {
                name,
                module: module.clone(),
                description: read_workflow_description(&file),
                path: relative_to(&file, pack_root),
                kind: workflow_kind_for(&file),
            });
        }
    }

    Ok(workflows)
}

/// Discover tasks and tools, manifest-first
pub fn discover_tasks_and_tools(pack_root: &Path) -> Result<Vec<TaskTool>> {
    let config_dir = pack_root.join(CONFIG_DIR);
    let mut artifacts = Vec::new();

    for (file, kind) in [
        (manifest::TASK_MANIFEST, TaskToolKind::Task),
        (manifest::TOOL_MANIFEST, TaskToolKind::Tool),
    ] {
        let path = config_dir.join(file);
        if path.is_file() {
            if let Ok(entries) = manifest::read_manifest(&path) {
                artifacts.extend(entries.into_iter().map(|e| task_tool_from_entry(e, kind)));
            }
        }
    }

    if !artifacts.is_empty() {
        return Ok(artifacts);
    }

    for module in list_modules(pack_root) {
        for (dir, kind) in [("tasks", TaskToolKind::Task), ("tools", TaskToolKind::Tool)] {
            artifacts.extend(scan_task_tool_dir(pack_root, &module, dir, kind));
        }
    }

    Ok(artifacts)
}

fn scan_task_tool_dir(
    pack_root: &Path,
    module: &str,
    dir_name: &str,
    kind: TaskToolKind,
) -> Vec<TaskTool> {
    let dir = pack_root.join(module).join(dir_name);
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut artifacts = Vec::new();
    for file in sorted_files(&dir) {
        let Some(ext) = lower_ext(&file) else {
            continue;
        };
        if !ARTIFACT_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }

        let content = std::fs::read_to_string(&file).unwrap_or_default();
        let parsed = frontmatter::parse(&content);

        artifacts.push(TaskTool {
            name: file_stem(&file),
            module: module.to_string(),
            kind,
            description: frontmatter::str_field(&parsed.metadata, "description")
                .unwrap_or_default(),
            path: relative_to(&file, pack_root),
            standalone: is_standalone(&content),
        });
    }
    artifacts
}

/// Whether a task/tool is marked standalone, via front matter or a raw
/// `standalone="true"` attribute
fn is_standalone(content: &str) -> bool {
    let parsed = frontmatter::parse(content);
    if frontmatter::bool_field(&parsed.metadata, "standalone") {
        return true;
    }
    extract_attribute(content, "standalone").as_deref() == Some("true")
}

fn workflow_from_entry(entry: ManifestEntry) -> Workflow {
    let kind = if entry.path.ends_with(".yaml") || entry.path.ends_with(".yml") {
        WorkflowKind::Yaml
    } else {
        WorkflowKind::Markdown
    };
    Workflow {
        name: entry.name,
        module: entry.module,
        description: entry.description,
        path: entry.path,
        kind,
    }
}

fn task_tool_from_entry(entry: ManifestEntry, kind: TaskToolKind) -> TaskTool {
    TaskTool {
        name: entry.name,
        module: entry.module,
        kind,
        description: entry.description,
        path: entry.path,
        standalone: entry.standalone.unwrap_or(false),
    }
}

fn is_workflow_marker(file: &Path) -> bool {
    matches!(
        file.file_name().and_then(|n| n.to_str()),
        Some("workflow.yaml" | "workflow.yml" | "workflow.md")
    )
}

fn workflow_kind_for(file: &Path) -> WorkflowKind {
    match lower_ext(file).as_deref() {
        Some("yaml" | "yml") => WorkflowKind::Yaml,
        _ => WorkflowKind::Markdown,
    }
}

fn read_workflow_description(file: &Path) -> String {
    let Ok(content) = std::fs::read_to_string(file) else {
        return String::new();
    };

    match workflow_kind_for(file) {
        WorkflowKind::Yaml => serde_yaml::from_str::<serde_yaml::Value>(&content)
            .ok()
            .and_then(|v| frontmatter::str_field(&v, "description"))
            .unwrap_or_default(),
        WorkflowKind::Markdown => {
            let parsed = frontmatter::parse(&content);
            frontmatter::str_field(&parsed.metadata, "description").unwrap_or_default()
        }
    }
}

fn sorted_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}

fn walk_sorted(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn lower_ext(file: &Path) -> Option<String> {
    file.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn file_stem(file: &Path) -> String {
    file.file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn relative_to(file: &Path, root: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .to_string_lossy()
        .replace('\\', "/")
}
