//! Menu block rendering for compiled agents
//!
//! A compiled menu always carries two fixed leading items (menu help, chat)
//! and one fixed trailing item (dismiss) around the user-defined items.
//! Multi-trigger items expand to a group of `<handler>` rows; each nested
//! trigger's directive list is reduced to one effective directive set,
//! last-applicable value winning per field.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;

use super::xml::escape_xml;

/// One user-defined menu entry from the definition
///
/// Unknown keys are ignored (serde default), matching the loose menu model.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MenuItem {
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub workflow: Option<String>,
    #[serde(default)]
    pub exec: Option<String>,
    #[serde(default)]
    pub tmpl: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub multi: Option<String>,
    #[serde(default)]
    pub triggers: Option<Vec<BTreeMap<String, Value>>>,
}

/// Effective directive set for one nested trigger
#[derive(Debug, Default, PartialEq)]
struct Directives {
    description: String,
    exec: Option<String>,
    workflow: Option<String>,
    data: Option<String>,
    action: Option<String>,
}

/// Render the full `<menu>` block
pub fn build_menu(items: &[MenuItem]) -> String {
    let mut xml = String::from("  <menu>\n");

    xml.push_str(
        "    <item cmd=\"MH or fuzzy match on menu or help\">[MH] Redisplay Menu Help</item>\n",
    );
    xml.push_str(
        "    <item cmd=\"CH or fuzzy match on chat\">[CH] Chat with the Agent about anything</item>\n",
    );

    for item in items {
        if let (Some(multi), Some(triggers)) = (&item.multi, &item.triggers) {
            xml.push_str(&format!(
                "    <item type=\"multi\">{}\n",
                escape_xml(multi)
            ));
            xml.push_str(&build_handlers(triggers));
            xml.push_str("    </item>\n");
        } else if let Some(trigger) = &item.trigger {
            xml.push_str(&build_simple_item(trigger, item));
        }
    }

    xml.push_str(
        "    <item cmd=\"DA or fuzzy match on exit, leave, goodbye or dismiss agent\">[DA] Dismiss Agent</item>\n",
    );
    xml.push_str("  </menu>\n");
    xml
}

fn build_simple_item(trigger: &str, item: &MenuItem) -> String {
    let mut attrs = vec![format!("cmd=\"{}\"", escape_xml(trigger))];

    let routed = [
        ("workflow", &item.workflow),
        ("exec", &item.exec),
        ("tmpl", &item.tmpl),
        ("data", &item.data),
        ("action", &item.action),
    ];
    for (name, value) in routed {
        if let Some(value) = value {
            attrs.push(format!("{name}=\"{}\"", escape_xml(value)));
        }
    }

    format!(
        "    <item {}>{}</item>\n",
        attrs.join(" "),
        escape_xml(item.description.as_deref().unwrap_or(""))
    )
}

fn build_handlers(trigger_groups: &[BTreeMap<String, Value>]) -> String {
    let mut xml = String::new();
    for group in trigger_groups {
        for directives in group.values() {
            let reduced = reduce_directives(directives);

            let mut attrs = vec![format!("match=\"{}\"", escape_xml(&reduced.description))];
            if let Some(exec) = &reduced.exec {
                attrs.push(format!("exec=\"{}\"", escape_xml(exec)));
            }
            if let Some(workflow) = &reduced.workflow {
                attrs.push(format!("workflow=\"{}\"", escape_xml(workflow)));
            }
            if let Some(action) = &reduced.action {
                attrs.push(format!("action=\"{}\"", escape_xml(action)));
            }
            if let Some(data) = &reduced.data {
                attrs.push(format!("data=\"{}\"", escape_xml(data)));
            }

            xml.push_str(&format!("      <handler {}></handler>\n", attrs.join(" ")));
        }
    }
    xml
}

/// Reduce an ordered directive list to one effective set
///
/// Iterates in order and overwrites per field, so the last applicable value
/// wins. A `route` ending in `.yaml`/`.yml` lands on `workflow`, anything
/// else on `exec`.
fn reduce_directives(directives: &Value) -> Directives {
    let mut result = Directives::default();
    let Some(entries) = directives.as_sequence() else {
        return result;
    };

    for entry in entries {
        let Some(map) = entry.as_mapping() else {
            continue;
        };

        if let Some(input) = scalar(map.get(Value::from("input"))) {
            result.description = input;
        }
        if let Some(route) = scalar(map.get(Value::from("route"))) {
            if route.ends_with(".yaml") || route.ends_with(".yml") {
                result.workflow = Some(route);
            } else {
                result.exec = Some(route);
            }
        }
        if let Some(data) = scalar(map.get(Value::from("data"))) {
            result.data = Some(data);
        }
        if let Some(action) = scalar(map.get(Value::from("action"))) {
            result.action = Some(action);
        }
    }

    result
}

fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_item(trigger: &str, description: &str) -> MenuItem {
        MenuItem {
            trigger: Some(trigger.to_string()),
            description: Some(description.to_string()),
            ..MenuItem::default()
        }
    }

    #[test]
    fn test_menu_fixed_items_surround_user_items() {
        let menu = build_menu(&[simple_item("CR", "Code review")]);
        let items: Vec<&str> = menu.lines().filter(|l| l.contains("<item")).collect();

        assert_eq!(items.len(), 4);
        assert!(items[0].contains("[MH] Redisplay Menu Help"));
        assert!(items[1].contains("[CH] Chat with the Agent"));
        assert!(items[2].contains("Code review"));
        assert!(items[3].contains("[DA] Dismiss Agent"));
    }

    #[test]
    fn test_simple_item_routing_attributes() {
        let mut item = simple_item("WF", "Run the flow");
        item.workflow = Some("flows/main.yaml".to_string());
        let menu = build_menu(&[item]);

        assert!(menu.contains(r#"<item cmd="WF" workflow="flows/main.yaml">Run the flow</item>"#));
    }

    #[test]
    fn test_item_without_trigger_is_skipped() {
        let item = MenuItem {
            description: Some("orphan".to_string()),
            ..MenuItem::default()
        };
        let menu = build_menu(&[item]);
        assert!(!menu.contains("orphan"));
    }

    #[test]
    fn test_multi_item_renders_handlers() {
        let yaml = r"
multi: Pick a target
triggers:
  - docs:
      - input: Generate docs
      - route: tasks/docs.md
  - spec:
      - input: Generate spec
      - route: flows/spec.yaml
";
        let item: MenuItem = serde_yaml::from_str(yaml).unwrap();
        let menu = build_menu(&[item]);

        assert!(menu.contains(r#"<item type="multi">Pick a target"#));
        assert!(menu.contains(r#"<handler match="Generate docs" exec="tasks/docs.md">"#));
        assert!(menu.contains(r#"<handler match="Generate spec" workflow="flows/spec.yaml">"#));
    }

    #[test]
    fn test_reduce_takes_last_route() {
        let directives: Value = serde_yaml::from_str(
            r"
- route: first.md
- route: second.md
- input: pick one
",
        )
        .unwrap();

        let reduced = reduce_directives(&directives);
        assert_eq!(reduced.exec.as_deref(), Some("second.md"));
        assert_eq!(reduced.description, "pick one");
    }

    #[test]
    fn test_reduce_splits_route_by_extension() {
        let directives: Value =
            serde_yaml::from_str("- route: flows/build.yml\n- action: confirm\n").unwrap();

        let reduced = reduce_directives(&directives);
        assert_eq!(reduced.workflow.as_deref(), Some("flows/build.yml"));
        assert!(reduced.exec.is_none());
        assert_eq!(reduced.action.as_deref(), Some("confirm"));
    }

    #[test]
    fn test_menu_escapes_description() {
        let menu = build_menu(&[simple_item("X", "a < b & c")]);
        assert!(menu.contains("a &lt; b &amp; c"));
        let user_line = menu
            .lines()
            .find(|l| l.contains("cmd=\"X\""))
            .unwrap();
        assert!(!user_line.contains("a < b"));
    }
}
