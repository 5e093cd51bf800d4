//! Shared context and manifest regeneration for commands

use std::path::PathBuf;

use crate::config::PackConfig;
use crate::discovery;
use crate::error::{AgentpackError, Result};
use crate::manifest::{self, ManifestEntry};
use crate::pack::PackPaths;
use crate::registry::Registry;

/// Extensions included in the raw files manifest
const FILES_MANIFEST_EXTENSIONS: &[&str] = &["md", "xml", "yaml", "yml"];

/// Everything a command needs for one run
pub struct RunContext {
    pub project_root: PathBuf,
    pub config: PackConfig,
    pub paths: PackPaths,
    registry: Option<Registry>,
    pub verbose: bool,
}

impl RunContext {
    /// Build the run context from global CLI options
    pub fn new(
        project: Option<PathBuf>,
        source: Option<PathBuf>,
        verbose: bool,
    ) -> Result<Self> {
        let project_root = match project {
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        let config = PackConfig::load(&project_root)?.with_overrides(source, None);
        let paths = PackPaths::new(&project_root, &config.pack_dir);

        // config-relative source roots resolve against the project
        let registry = config.source_root.clone().map(|root| {
            if root.is_relative() {
                Registry::new(project_root.join(root))
            } else {
                Registry::new(root)
            }
        });

        Ok(Self {
            project_root,
            config,
            paths,
            registry,
            verbose,
        })
    }

    /// The module source registry; errors when no source tree is configured
    pub fn registry(&self) -> Result<&Registry> {
        self.registry
            .as_ref()
            .ok_or(AgentpackError::SourceNotConfigured)
    }

    /// The registry when configured; commands that can degrade use this
    pub fn registry_opt(&self) -> Option<&Registry> {
        self.registry.as_ref()
    }
}

/// Counts reported by the end-of-run summary
pub struct DiscoverySummary {
    pub agents: usize,
    pub workflows: usize,
    pub tasks_and_tools: usize,
}

/// Re-scan the pack and regenerate every manifest
///
/// `updated_modules` limits the raw files re-scan; with `merge` set, rows of
/// other modules are preserved from the existing files manifest (partial
/// update). The artifact manifests always cover the whole pack, since
/// discovery re-scans it wholesale.
pub fn regenerate_manifests(
    ctx: &RunContext,
    updated_modules: &[String],
    merge: bool,
) -> Result<DiscoverySummary> {
    let pack_root = ctx.paths.root();
    let config_dir = ctx.paths.config_dir();

    // The artifact manifests are regenerated from a directory walk, so the
    // walk must not read the indices this run is replacing.
    for file in [
        manifest::WORKFLOW_MANIFEST,
        manifest::TASK_MANIFEST,
        manifest::TOOL_MANIFEST,
    ] {
        let path = config_dir.join(file);
        if path.is_file() {
            std::fs::remove_file(&path)?;
        }
    }

    let agents = discovery::discover_agents(pack_root)?;
    let workflows = discovery::discover_workflows(pack_root)?;
    let tasks_and_tools = discovery::discover_tasks_and_tools(pack_root)?;

    let agent_entries: Vec<ManifestEntry> = agents
        .iter()
        .map(|a| ManifestEntry {
            name: a.name.clone(),
            module: a.module.clone(),
            description: a.description.clone().unwrap_or_default(),
            path: a.relative_path.clone(),
            group: Some("Agents".to_string()),
            ..ManifestEntry::default()
        })
        .collect();

    let workflow_entries: Vec<ManifestEntry> = workflows
        .iter()
        .map(|w| ManifestEntry {
            name: w.name.clone(),
            module: w.module.clone(),
            description: w.description.clone(),
            path: w.path.clone(),
            group: Some("Workflows".to_string()),
            ..ManifestEntry::default()
        })
        .collect();

    let task_tool_entry = |t: &discovery::TaskTool, group: &str| ManifestEntry {
        name: t.name.clone(),
        module: t.module.clone(),
        description: t.description.clone(),
        path: t.path.clone(),
        standalone: Some(t.standalone),
        group: Some(group.to_string()),
        ..ManifestEntry::default()
    };
    let task_entries: Vec<ManifestEntry> = tasks_and_tools
        .iter()
        .filter(|t| t.kind == discovery::TaskToolKind::Task)
        .map(|t| task_tool_entry(t, "Tasks"))
        .collect();
    let tool_entries: Vec<ManifestEntry> = tasks_and_tools
        .iter()
        .filter(|t| t.kind == discovery::TaskToolKind::Tool)
        .map(|t| task_tool_entry(t, "Tools"))
        .collect();

    let mut file_entries = Vec::new();
    for module in updated_modules {
        file_entries.extend(manifest::scan_module_files(
            pack_root,
            module,
            FILES_MANIFEST_EXTENSIONS,
        )?);
    }
    let files_path = config_dir.join(manifest::FILES_MANIFEST);
    let file_entries = if merge {
        let existing = manifest::read_manifest(&files_path).unwrap_or_default();
        manifest::merge_entries(existing, file_entries, updated_modules)
    } else {
        file_entries
    };

    manifest::write_manifest(&config_dir.join(manifest::AGENT_MANIFEST), &agent_entries)?;
    manifest::write_manifest(
        &config_dir.join(manifest::WORKFLOW_MANIFEST),
        &workflow_entries,
    )?;
    manifest::write_manifest(&config_dir.join(manifest::TASK_MANIFEST), &task_entries)?;
    manifest::write_manifest(&config_dir.join(manifest::TOOL_MANIFEST), &tool_entries)?;
    manifest::write_manifest(&files_path, &file_entries)?;
    manifest::party::write_agent_party(&ctx.paths.agent_party(), &agent_entries)?;

    Ok(DiscoverySummary {
        agents: agents.len(),
        workflows: workflows.len(),
        tasks_and_tools: tasks_and_tools.len(),
    })
}

/// Record the run in the install manifest
pub fn write_install_manifest(ctx: &RunContext) -> Result<()> {
    let registry = ctx.registry_opt();
    let mut modules = Vec::new();

    for module in discovery::list_modules(ctx.paths.root()) {
        let version = registry
            .and_then(|r| r.find_source(&module))
            .and_then(|path| Registry::read_descriptor(&path, &module))
            .map(|meta| meta.version)
            .unwrap_or_else(|| "unknown".to_string());
        let hash = crate::hash::hash_directory(&ctx.paths.module_dir(&module))?;
        modules.push(manifest::InstalledModule {
            id: module,
            version,
            hash,
        });
    }

    let path = ctx.paths.install_manifest();
    let previous = manifest::read_install_manifest(&path);
    let record = manifest::InstallManifest::new(&ctx.config.pack_dir, modules)
        .touched(previous.as_ref());
    manifest::write_install_manifest(&path, &record)
}
