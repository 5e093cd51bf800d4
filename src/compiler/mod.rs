//! Declarative agent compiler
//!
//! Turns a YAML agent definition into the compiled document consumers load:
//! YAML front matter, a fixed embodiment preamble, and a fenced XML block
//! holding activation steps, persona, prompts, memories, and the menu.
//!
//! Answer values are applied to the raw definition text before the (single)
//! parse, so answers can template structure as well as literals. Malformed
//! definitions are a hard error; the compiler never emits partial output.

pub mod menu;
pub mod xml;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AgentpackError, Result, file_read_failed};
use crate::template::{self, Answers};
use menu::MenuItem;
use xml::{collapse, escape_xml};

/// Extension marking a compilable agent definition
pub const DEFINITION_SUFFIX: &str = ".agent.yaml";

#[derive(Debug, Deserialize)]
struct DefinitionFile {
    agent: Definition,
}

#[derive(Debug, Deserialize)]
struct Definition {
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    persona: Option<Persona>,
    #[serde(default)]
    prompts: Option<Vec<Prompt>>,
    #[serde(default)]
    memories: Option<Vec<String>>,
    #[serde(default)]
    menu: Option<Vec<MenuItem>>,
}

/// Agent identity block from the definition header
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Metadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct Persona {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    identity: Option<String>,
    #[serde(default)]
    communication_style: Option<String>,
    #[serde(default)]
    principles: Option<Principles>,
}

/// Principles accept either one text block or a list of lines
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Principles {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Deserialize, Default)]
struct Prompt {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// A compiled agent document plus the metadata it was built from
#[derive(Debug)]
pub struct CompiledAgent {
    pub document: String,
    pub metadata: Metadata,
}

/// Compile a definition file to its output document
///
/// The output path defaults to the definition's directory with the
/// `.agent.yaml` suffix swapped for `.md`.
pub fn compile_file(
    definition_path: &Path,
    output_path: Option<&Path>,
    answers: &Answers,
) -> Result<(CompiledAgent, PathBuf)> {
    if !definition_path.is_file() {
        return Err(AgentpackError::DefinitionNotFound {
            path: definition_path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(definition_path)
        .map_err(|e| file_read_failed(definition_path, &e))?;
    let slug = definition_slug(definition_path);

    let compiled = compile(&content, answers, &slug).map_err(|e| match e {
        AgentpackError::DefinitionParseFailed { reason, .. } => {
            AgentpackError::DefinitionParseFailed {
                path: definition_path.display().to_string(),
                reason,
            }
        }
        other => other,
    })?;

    let dest = output_path.map(Path::to_path_buf).unwrap_or_else(|| {
        definition_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!("{slug}.md"))
    });

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| crate::error::file_write_failed(parent, &e))?;
    }
    std::fs::write(&dest, &compiled.document)
        .map_err(|e| crate::error::file_write_failed(&dest, &e))?;

    Ok((compiled, dest))
}

/// Compile raw definition text
pub fn compile(definition: &str, answers: &Answers, slug: &str) -> Result<CompiledAgent> {
    let rendered = template::apply(definition, answers);

    let parsed: DefinitionFile =
        serde_yaml::from_str(&rendered).map_err(|e| AgentpackError::DefinitionParseFailed {
            path: slug.to_string(),
            reason: e.to_string(),
        })?;
    let agent = parsed.agent;
    let meta = agent.metadata.clone();

    let mut doc = String::new();
    doc.push_str(&build_front_matter(&meta, slug));

    doc.push_str("```xml\n");
    doc.push_str(&format!(
        "<agent id=\"{}\" name=\"{}\" title=\"{}\" icon=\"{}\">\n",
        escape_xml(meta.id.as_deref().unwrap_or("")),
        escape_xml(meta.name.as_deref().unwrap_or("")),
        escape_xml(meta.title.as_deref().unwrap_or("")),
        escape_xml(meta.icon.as_deref().unwrap_or("🤖")),
    ));

    doc.push_str(ACTIVATION_BLOCK);

    if let Some(persona) = &agent.persona {
        doc.push_str(&build_persona(persona));
    }
    if let Some(prompts) = &agent.prompts {
        if !prompts.is_empty() {
            doc.push_str(&build_prompts(prompts));
        }
    }
    if let Some(memories) = &agent.memories {
        if !memories.is_empty() {
            doc.push_str(&build_memories(memories));
        }
    }

    doc.push_str(&menu::build_menu(agent.menu.as_deref().unwrap_or(&[])));

    doc.push_str("</agent>\n");
    doc.push_str("```\n");

    Ok(CompiledAgent {
        document: doc,
        metadata: meta,
    })
}

/// Derive the agent slug from a definition file name
pub fn definition_slug(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    file_name
        .strip_suffix(DEFINITION_SUFFIX)
        .map(str::to_string)
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or(file_name)
        })
}

const ACTIVATION_BLOCK: &str = "  <activation>\n    <steps>\n      <step>READ the entire agent file.</step>\n      <step>ADOPT the persona described.</step>\n      <step>DISPLAY the welcome greeting.</step>\n      <step>PRESENT the numbered menu and WAIT for user input.</step>\n    </steps>\n  </activation>\n";

fn build_front_matter(meta: &Metadata, slug: &str) -> String {
    let name = slug.replace('-', " ");
    let description = meta.title.as_deref().unwrap_or("Agent");

    format!(
        "---\nname: \"{name}\"\ndescription: \"{description}\"\n---\n\n\
         You must fully embody this agent's persona and follow all activation \
         instructions exactly as specified. NEVER break character until given \
         an exit command.\n\n"
    )
}

fn build_persona(persona: &Persona) -> String {
    let mut xml = String::from("  <persona>\n");

    let fields = [
        ("role", &persona.role),
        ("identity", &persona.identity),
        ("communication_style", &persona.communication_style),
    ];
    for (tag, value) in fields {
        if let Some(value) = value {
            xml.push_str(&format!(
                "    <{tag}>{}</{tag}>\n",
                escape_xml(&collapse(value))
            ));
        }
    }

    if let Some(principles) = &persona.principles {
        let text = match principles {
            Principles::Text(text) => collapse(text),
            Principles::List(lines) => lines.join(" "),
        };
        xml.push_str(&format!(
            "    <principles>{}</principles>\n",
            escape_xml(&text)
        ));
    }

    xml.push_str("  </persona>\n");
    xml
}

fn build_prompts(prompts: &[Prompt]) -> String {
    let mut xml = String::from("  <prompts>\n");
    for prompt in prompts {
        xml.push_str(&format!(
            "    <prompt id=\"{}\">\n",
            escape_xml(prompt.id.as_deref().unwrap_or(""))
        ));
        xml.push_str(&format!(
            "      <content>\n{}\n      </content>\n",
            prompt.content.as_deref().unwrap_or("")
        ));
        xml.push_str("    </prompt>\n");
    }
    xml.push_str("  </prompts>\n");
    xml
}

fn build_memories(memories: &[String]) -> String {
    let mut xml = String::from("  <memories>\n");
    for memory in memories {
        xml.push_str(&format!("    <memory>{}</memory>\n", escape_xml(memory)));
    }
    xml.push_str("  </memories>\n");
    xml
}
