use muledeps_cli::models::{ArtifactCoordinates, PluginDeclaration};
use muledeps_cli::resolver::RepositoryIndex;
use muledeps_cli::test_utils::declaration;
use predicates::prelude::*;

use crate::project::TestProject;

const DEP_GROUP: &str = "dep.en.den.cy.x";
const DEP_ARTIFACT: &str = "declaredPomDependencyX10";

fn declared(versions: &[&str]) -> PluginDeclaration {
    PluginDeclaration::new(
        "org.tests.plugins",
        "test.plugin",
        versions.iter().map(|version| declaration(DEP_GROUP, DEP_ARTIFACT, version)).collect(),
    )
}

fn index() -> RepositoryIndex {
    RepositoryIndex::default()
        .with_artifact(ArtifactCoordinates::new(DEP_GROUP, DEP_ARTIFACT, "1.0.0"), Vec::new())
        .with_artifact(
            ArtifactCoordinates::new(DEP_GROUP, DEP_ARTIFACT, "1.1.0"),
            vec![ArtifactCoordinates::new(DEP_GROUP, "transitive", "3.0.0")],
        )
        .with_artifact(ArtifactCoordinates::new(DEP_GROUP, "transitive", "3.0.0"), Vec::new())
}

#[test]
fn test_resolve_embedded_declarations() {
    let mut project = TestProject::new();
    project.add_plugin("test.plugin", &[declared(&["1.0.0", "1.1.0"])]);
    let snapshot = project.write_snapshot();
    let index = project.write_index(&index());
    project.write_config("");

    project
        .command()
        .arg("resolve")
        .arg("--project")
        .arg(&snapshot)
        .arg("--index")
        .arg(&index)
        .assert()
        .success()
        .stdout(predicate::str::contains(DEP_ARTIFACT))
        .stdout(predicate::str::contains("\"version\": \"1.1.0\""))
        .stdout(predicate::str::contains("\"version\": \"1.0.0\"").count(1))
        .stdout(predicate::str::contains("transitive"));
}

#[test]
fn test_resolve_application_declaration_from_config() {
    let mut project = TestProject::new();
    project.add_plugin("test.plugin", &[declared(&["1.1.0"])]);
    let snapshot = project.write_snapshot();
    let index = project.write_index(&index());
    project.write_config(
        r#"
[[additional_plugin_dependencies]]
groupId = "org.tests.plugins"
artifactId = "test.plugin"
additionalDependencies = [
    { groupId = "dep.en.den.cy.x", artifactId = "declaredPomDependencyX10", version = "1.0.0" },
]
"#,
    );

    project
        .command()
        .args(["resolve", "--index"])
        .arg(&index)
        .arg("--project")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("declaredPomDependencyX10-1.0.0.jar"))
        .stdout(predicate::str::contains("\"version\": \"1.1.0\"").not());
}

#[test]
fn test_resolve_without_declarations_prints_empty_mapping() {
    let mut project = TestProject::new();
    project.add_plugin("test.plugin", &[]);
    let snapshot = project.write_snapshot();
    project.write_config("");

    project
        .command()
        .arg("resolve")
        .arg("--project")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn test_resolve_undeclared_plugin_fails() {
    let mut project = TestProject::new();
    project.add_library("org.acme", "lib", &[]);
    let snapshot = project.write_snapshot();
    project.write_config(
        r#"
[[additional_plugin_dependencies]]
groupId = "org.tests.plugins"
artifactId = "missing.plugin"
additionalDependencies = [{ groupId = "g", artifactId = "a", version = "1.0.0" }]
"#,
    );

    project
        .command()
        .arg("resolve")
        .arg("--project")
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("org.tests.plugins:missing.plugin"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_resolve_unknown_artifact_fails() {
    let mut project = TestProject::new();
    project.add_plugin("test.plugin", &[declared(&["9.9.9"])]);
    let snapshot = project.write_snapshot();
    let index = project.write_index(&index());
    project.write_config("");

    project
        .command()
        .arg("resolve")
        .arg("--project")
        .arg(&snapshot)
        .arg("--index")
        .arg(&index)
        .assert()
        .failure()
        .stderr(predicate::str::contains("9.9.9"));
}

#[test]
fn test_resolve_missing_explicit_config_fails() {
    let mut project = TestProject::new();
    project.add_plugin("test.plugin", &[]);
    let snapshot = project.write_snapshot();

    project
        .command()
        .arg("--config")
        .arg(project.path().join("absent.toml"))
        .arg("resolve")
        .arg("--project")
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn test_resolve_malformed_snapshot_fails() {
    let project = TestProject::new();
    project.write_config("");
    let snapshot = project.path().join("project.json");
    std::fs::write(&snapshot, "{").unwrap();

    project
        .command()
        .arg("resolve")
        .arg("--project")
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("project snapshot"));
}
