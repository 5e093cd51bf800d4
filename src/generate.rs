//! Consumer-neutral command and trigger text
//!
//! Builders for the command files downstream consumers place into their own
//! trigger directories. Where each file lands is the consumer adapter's
//! business; the text is the same everywhere, so it lives here. The pack dir
//! name is threaded explicitly.

use crate::discovery::{Agent, TaskTool, Workflow, WorkflowKind};

/// The activation block instructing a consumer to load the full agent file
pub fn activation_block(agent_path: &str, pack_dir: &str) -> String {
    [
        "<agent-activation CRITICAL=\"TRUE\">".to_string(),
        format!("1. LOAD the FULL agent file from @{pack_dir}/{agent_path}"),
        "2. READ its entire contents: persona, menu, and instructions.".to_string(),
        "3. FOLLOW every step in the <activation> section precisely.".to_string(),
        "4. DISPLAY the welcome/greeting.".to_string(),
        "5. PRESENT the numbered menu and WAIT for user input.".to_string(),
        "</agent-activation>".to_string(),
    ]
    .join("\n")
}

/// Command file text activating an agent
pub fn agent_command(agent: &Agent, pack_dir: &str) -> String {
    let description = agent
        .description
        .clone()
        .unwrap_or_else(|| format!("Activate {} agent", agent.name));

    [
        "---".to_string(),
        format!("description: '{description}'"),
        "---".to_string(),
        String::new(),
        format!(
            "# Agent: {}",
            agent.display_name.as_deref().unwrap_or(&agent.name)
        ),
        String::new(),
        "You must fully embody this agent and follow all instructions exactly.".to_string(),
        String::new(),
        activation_block(&agent.relative_path, pack_dir),
        String::new(),
        "---".to_string(),
        format!("*{pack_dir} registry: {}*", agent.module),
    ]
    .join("\n")
}

/// Command file text running a workflow
///
/// Markdown workflows are loaded directly; YAML workflows route through the
/// workflow executor task.
pub fn workflow_command(workflow: &Workflow, pack_dir: &str) -> String {
    let resolved = format!("{pack_dir}/{}", workflow.path);

    if workflow.kind == WorkflowKind::Markdown {
        return [
            "---".to_string(),
            format!("description: '{}'", workflow.description),
            "---".to_string(),
            String::new(),
            format!("# Workflow: {}", workflow.name),
            String::new(),
            format!("LOAD and follow the workflow at: `{{project-root}}/{resolved}`"),
            String::new(),
            "Execute each step in order. Save outputs after each section.".to_string(),
        ]
        .join("\n");
    }

    [
        "---".to_string(),
        format!("description: '{}'", workflow.description),
        "---".to_string(),
        String::new(),
        format!("# Workflow: {}", workflow.name),
        String::new(),
        "To execute this workflow:".to_string(),
        format!("1. LOAD {{project-root}}/{pack_dir}/core/tasks/workflow.md"),
        format!("2. Pass workflow path: `{{project-root}}/{resolved}`"),
        "3. Follow the executor instructions EXACTLY".to_string(),
        "4. Save outputs after EACH section".to_string(),
    ]
    .join("\n")
}

/// Command file text running a task or tool
pub fn task_tool_command(artifact: &TaskTool, pack_dir: &str) -> String {
    let description = if artifact.description.is_empty() {
        format!("Execute {} {}", artifact.name, artifact.kind.label())
    } else {
        artifact.description.clone()
    };
    let label = match artifact.kind {
        crate::discovery::TaskToolKind::Task => "Task",
        crate::discovery::TaskToolKind::Tool => "Tool",
    };

    [
        "---".to_string(),
        format!("description: '{description}'"),
        "---".to_string(),
        String::new(),
        format!("# {label}: {}", artifact.name),
        String::new(),
        format!(
            "LOAD and execute: `{{project-root}}/{pack_dir}/{}`",
            artifact.path
        ),
        String::new(),
        "Follow all instructions precisely. Report results when complete.".to_string(),
    ]
    .join("\n")
}

/// One-line trigger for consumers that key a whole file off a single line
pub fn flat_trigger(artifact_path: &str, pack_dir: &str) -> String {
    format!("LOAD {{project-root}}/{pack_dir}/{artifact_path} and follow all instructions exactly.")
}

/// A module-level launcher listing every workflow the module provides
pub fn module_workflow_launcher(
    module: &str,
    workflows: &[Workflow],
    pack_dir: &str,
) -> String {
    let mut lines = vec![
        format!("# {} Workflows", module.to_uppercase()),
        String::new(),
        "## Available Workflows".to_string(),
        String::new(),
    ];

    for workflow in workflows {
        lines.push(format!("**{}**", workflow.name));
        lines.push(format!(
            "- Path: `{{project-root}}/{pack_dir}/{}`",
            workflow.path
        ));
        lines.push(format!("- {}", workflow.description));
        lines.push(String::new());
    }

    lines.push("## Execution".to_string());
    lines.push(String::new());
    lines.push(format!(
        "1. LOAD {{project-root}}/{pack_dir}/core/tasks/workflow.md"
    ));
    lines.push("2. Pass the workflow path as parameter".to_string());
    lines.push("3. Follow the executor instructions EXACTLY".to_string());
    lines.push("4. Save outputs after EACH section".to_string());

    lines.join("\n")
}
