//! Aggregate agent roster (`_config/agent-party.xml`)
//!
//! A denormalized, consumer-oriented index grouping installed agents by
//! module with summary counts. Regenerated wholesale on every run.

use std::collections::BTreeMap;
use std::path::Path;

use crate::compiler::xml::escape_xml;
use crate::error::{Result, file_write_failed};
use crate::manifest::ManifestEntry;

/// Write the aggregate roster for the given agent entries
pub fn write_agent_party(path: &Path, agents: &[ManifestEntry]) -> Result<()> {
    let generated = chrono::Utc::now().to_rfc3339();

    // group by module, deterministically
    let mut by_module: BTreeMap<&str, Vec<&ManifestEntry>> = BTreeMap::new();
    for agent in agents {
        by_module.entry(agent.module.as_str()).or_default().push(agent);
    }

    let mut xml = String::new();
    xml.push_str(&format!(
        "<manifest id=\"agent-party\" version=\"1.0\" generated=\"{generated}\">\n"
    ));
    xml.push_str("  <description>Complete roster of installed agents.</description>\n");

    for (module, module_agents) in &by_module {
        xml.push_str(&format!("  <!-- {module} -->\n"));
        for agent in module_agents {
            xml.push_str(&format!(
                "  <agent id=\"{}\" name=\"{}\" module=\"{}\">\n",
                escape_xml(&agent.path),
                escape_xml(&agent.name),
                escape_xml(module),
            ));
            xml.push_str("    <persona>\n");
            xml.push_str(&format!(
                "      <role>{}</role>\n",
                escape_xml(&agent.description)
            ));
            xml.push_str("    </persona>\n");
            xml.push_str("  </agent>\n");
        }
    }

    xml.push_str("  <statistics>\n");
    xml.push_str(&format!("    <total_agents>{}</total_agents>\n", agents.len()));
    xml.push_str(&format!("    <modules>{}</modules>\n", by_module.len()));
    xml.push_str(&format!("    <last_updated>{generated}</last_updated>\n"));
    xml.push_str("  </statistics>\n");
    xml.push_str("</manifest>\n");

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| file_write_failed(parent, &e))?;
    }
    std::fs::write(path, xml).map_err(|e| file_write_failed(path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn agent(name: &str, module: &str, description: &str) -> ManifestEntry {
        ManifestEntry {
            name: name.to_string(),
            module: module.to_string(),
            description: description.to_string(),
            path: format!("{module}/agents/{name}.md"),
            ..ManifestEntry::default()
        }
    }

    #[test]
    fn test_party_groups_by_module_with_counts() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("_config/agent-party.xml");

        write_agent_party(
            &path,
            &[
                agent("dev", "bmm", "Developer"),
                agent("scout", "research", "Scout"),
                agent("sage", "bmm", "Advisor"),
            ],
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<!-- bmm -->"));
        assert!(content.contains("<!-- research -->"));
        assert!(content.contains("<total_agents>3</total_agents>"));
        assert!(content.contains("<modules>2</modules>"));
        // bmm group comes before research
        assert!(content.find("<!-- bmm -->").unwrap() < content.find("<!-- research -->").unwrap());
    }

    #[test]
    fn test_party_escapes_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("agent-party.xml");

        write_agent_party(&path, &[agent("dev", "bmm", "Builds <fast> & safe")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<role>Builds &lt;fast&gt; &amp; safe</role>"));
    }
}
