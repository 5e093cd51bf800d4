//! Compile command integration tests

mod common;

use common::TestProject;
use predicates::prelude::*;

const DEFINITION: &str = r"
agent:
  metadata:
    id: sage
    name: Sage
    title: Design Advisor
    icon: S
  persona:
    role: Advises on system design
    principles:
      - Prefer boring technology
      - Make reversible choices
  menu:
    - trigger: DR
      description: Design review
      workflow: bmm/workflows/review/workflow.yaml
";

#[test]
fn test_compile_writes_document_next_to_definition() {
    let project = TestProject::new();
    project.write_project_file("defs/sage.agent.yaml", DEFINITION);

    project
        .cmd()
        .args(["compile", "defs/sage.agent.yaml"])
        .assert()
        .success();

    let document = project.read_project_file("defs/sage.md");
    assert!(document.starts_with("---\nname: \"sage\""));
    assert!(document.contains("```xml"));
    assert!(document.contains(r#"<agent id="sage" name="Sage" title="Design Advisor" icon="S">"#));
    assert!(document.contains("<principles>Prefer boring technology Make reversible choices</principles>"));
}

#[test]
fn test_compile_menu_has_fixed_and_user_items() {
    let project = TestProject::new();
    project.write_project_file("sage.agent.yaml", DEFINITION);

    project
        .cmd()
        .args(["compile", "sage.agent.yaml"])
        .assert()
        .success();

    let document = project.read_project_file("sage.md");
    let item_count = document
        .lines()
        .filter(|l| l.trim_start().starts_with("<item"))
        .count();
    assert_eq!(item_count, 4);
    assert!(document.contains("[MH] Redisplay Menu Help"));
    assert!(document.contains("[DA] Dismiss Agent"));
}

#[test]
fn test_compile_with_answers() {
    let project = TestProject::new();
    project.write_project_file(
        "sage.agent.yaml",
        "
agent:
  metadata:
    id: sage
    title: \"{{specialty}} Advisor\"
",
    );

    project
        .cmd()
        .args([
            "compile",
            "sage.agent.yaml",
            "--answer",
            "specialty=Storage",
        ])
        .assert()
        .success();

    let document = project.read_project_file("sage.md");
    assert!(document.contains("description: \"Storage Advisor\""));
}

#[test]
fn test_compile_explicit_output_path() {
    let project = TestProject::new();
    project.write_project_file("sage.agent.yaml", DEFINITION);

    project
        .cmd()
        .args(["compile", "sage.agent.yaml", "-o", "out/advisor.md"])
        .assert()
        .success();

    assert!(project.project_has("out/advisor.md"));
}

#[test]
fn test_compile_missing_definition_fails() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["compile", "ghost.agent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost.agent.yaml"));
}

#[test]
fn test_compile_malformed_definition_fails() {
    let project = TestProject::new();
    project.write_project_file("bad.agent.yaml", "persona: no agent key\n");

    project
        .cmd()
        .args(["compile", "bad.agent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse"));
}
