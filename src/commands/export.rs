//! Export command implementation
//!
//! Writes consumer-neutral command files for every discovered artifact into
//! a directory of the caller's choosing. Which directory a given consumer
//! wants is that consumer's business; the text is the same everywhere.

use std::collections::BTreeMap;
use std::path::Path;

use console::style;

use crate::cli::ExportArgs;
use crate::commands::helpers::RunContext;
use crate::discovery::{self, TaskToolKind, Workflow};
use crate::error::{Result, file_write_failed};
use crate::generate;

pub fn run(ctx: &RunContext, args: &ExportArgs) -> Result<()> {
    let pack_root = ctx.paths.root();
    let pack_dir = &ctx.config.pack_dir;

    let agents = discovery::discover_agents(pack_root)?;
    let workflows = discovery::discover_workflows(pack_root)?;
    let tasks_and_tools = discovery::discover_tasks_and_tools(pack_root)?;

    let mut written = 0;

    for agent in &agents {
        let dest = args
            .dir
            .join("agents")
            .join(format!("{}-{}.md", agent.module, agent.name));
        write(&dest, &generate::agent_command(agent, pack_dir))?;
        written += 1;
    }

    let mut by_module: BTreeMap<&str, Vec<&Workflow>> = BTreeMap::new();
    for workflow in &workflows {
        by_module
            .entry(workflow.module.as_str())
            .or_default()
            .push(workflow);

        let dest = args
            .dir
            .join("workflows")
            .join(format!("{}-{}.md", workflow.module, workflow.name));
        write(&dest, &generate::workflow_command(workflow, pack_dir))?;
        written += 1;
    }

    // one launcher per module listing all of its workflows
    for (module, module_workflows) in &by_module {
        let owned: Vec<Workflow> = module_workflows.iter().map(|w| (*w).clone()).collect();
        let dest = args.dir.join(format!("{module}-workflows.md"));
        write(
            &dest,
            &generate::module_workflow_launcher(module, &owned, pack_dir),
        )?;
        written += 1;
    }

    for artifact in &tasks_and_tools {
        let subdir = match artifact.kind {
            TaskToolKind::Task => "tasks",
            TaskToolKind::Tool => "tools",
        };
        let dest = args
            .dir
            .join(subdir)
            .join(format!("{}-{}.md", artifact.module, artifact.name));
        let content = if args.flat {
            generate::flat_trigger(&artifact.path, pack_dir)
        } else {
            generate::task_tool_command(artifact, pack_dir)
        };
        write(&dest, &content)?;
        written += 1;
    }

    println!(
        "{} {written} command file(s) exported to {}",
        style("Done:").green().bold(),
        style(args.dir.display()).cyan()
    );

    Ok(())
}

fn write(dest: &Path, content: &str) -> Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| file_write_failed(parent, &e))?;
    }
    std::fs::write(dest, content).map_err(|e| file_write_failed(dest, &e))
}
