use muledeps_cli::core::MuleDepsError;
use muledeps_cli::metadata::{
    Build, BuildModel, BuildPlugin, ConfigNode, ExtractorVocabulary, StaticBuildModelReader,
};
use muledeps_cli::models::{ArtifactKey, ClassLoaderModel, PluginDeclaration, ResolvedDependency};
use muledeps_cli::resolver::{AdditionalDependencies, AdditionalDependenciesResolver};
use muledeps_cli::test_utils::{
    RecordingResolver, build_model_with_additional_dependencies, classloader_model, declaration,
    init_test_logging, library_dependency, plugin_dependency,
};

const PLUGIN_GROUP: &str = "org.tests.plugins";
const PLUGIN_ARTIFACT: &str = "test.plugin";
const DEP_GROUP: &str = "dep.en.den.cy.x";
const DEP_ARTIFACT: &str = "declaredPomDependencyX10";

fn test_plugin() -> ResolvedDependency {
    plugin_dependency(PLUGIN_GROUP, PLUGIN_ARTIFACT, "1.0.0")
}

fn plugin_key() -> ArtifactKey {
    ArtifactKey::new(PLUGIN_GROUP, PLUGIN_ARTIFACT)
}

fn declared(versions: &[&str]) -> PluginDeclaration {
    PluginDeclaration::new(
        PLUGIN_GROUP,
        PLUGIN_ARTIFACT,
        versions.iter().map(|version| declaration(DEP_GROUP, DEP_ARTIFACT, version)).collect(),
    )
}

fn resolve(
    resolver: &RecordingResolver,
    reader: &StaticBuildModelReader,
    application_declarations: Vec<PluginDeclaration>,
    application: &[ResolvedDependency],
    plugin_models: &[ClassLoaderModel],
) -> Result<AdditionalDependencies, MuleDepsError> {
    init_test_logging(None);
    AdditionalDependenciesResolver::new(resolver, reader, application_declarations, "/repository")
        .resolve_dependencies(application, plugin_models)
}

fn resolved_versions(result: &AdditionalDependencies) -> Vec<String> {
    result
        .get(&plugin_key())
        .unwrap_or_default()
        .iter()
        .map(|dependency| dependency.descriptor().version().to_string())
        .collect()
}

/// A plugin whose build model carries embedded declarations.
fn plugin_with_embedded(
    artifact_id: &str,
    declarations: &[PluginDeclaration],
    reader: &mut StaticBuildModelReader,
) -> ResolvedDependency {
    let plugin = plugin_dependency(PLUGIN_GROUP, artifact_id, "1.0.0");
    reader.insert(
        plugin.content_location().clone(),
        build_model_with_additional_dependencies(declarations),
    );
    plugin
}

#[test]
fn test_single_declaration_resolves_one_dependency() {
    let plugin = test_plugin();
    let model = classloader_model(&plugin, &[]);
    let resolver = RecordingResolver::new();

    let result = resolve(
        &resolver,
        &StaticBuildModelReader::new().with_model(plugin.content_location().clone(), BuildModel::default()),
        vec![declared(&["1.0.0"])],
        &[plugin],
        &[model],
    )
    .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(resolved_versions(&result), vec!["1.0.0"]);
    let requests = resolver.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].coordinates.len(), 1);
    assert!(requests[0].remote_repositories.is_none());
}

#[test]
fn test_conflicting_versions_keep_the_greater_one() {
    let plugin = test_plugin();
    let model = classloader_model(&plugin, &[]);
    let reader = StaticBuildModelReader::new()
        .with_model(plugin.content_location().clone(), BuildModel::default());

    let result =
        resolve(&RecordingResolver::new(), &reader, vec![declared(&["1.0.0", "1.1.0"])], &[plugin], &[model])
            .unwrap();

    assert_eq!(resolved_versions(&result), vec!["1.1.0"]);
}

#[test]
fn test_conflicting_embedded_declarations_across_plugins() {
    let mut reader = StaticBuildModelReader::new();
    let plugin = plugin_with_embedded(PLUGIN_ARTIFACT, &[declared(&["1.0.0"])], &mut reader);
    let other = plugin_with_embedded("other.plugin", &[declared(&["1.1.0"])], &mut reader);
    let models = vec![classloader_model(&plugin, &[]), classloader_model(&other, &[])];

    let result =
        resolve(&RecordingResolver::new(), &reader, Vec::new(), &[plugin, other], &models).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(resolved_versions(&result), vec!["1.1.0"]);
}

#[test]
fn test_application_declaration_overrides_embedded_one() {
    let mut reader = StaticBuildModelReader::new();
    let plugin = plugin_with_embedded(PLUGIN_ARTIFACT, &[declared(&["2.0.0"])], &mut reader);
    let models = vec![classloader_model(&plugin, &[])];

    let result = resolve(
        &RecordingResolver::new(),
        &reader,
        vec![declared(&["1.0.0"])],
        &[plugin],
        &models,
    )
    .unwrap();

    assert_eq!(resolved_versions(&result), vec!["1.0.0"]);
}

#[test]
fn test_dependency_already_in_plugin_model_is_deduplicated() {
    let plugin = test_plugin();
    let model = classloader_model(&plugin, &[(DEP_GROUP, DEP_ARTIFACT, "1.0.0")]);
    let reader = StaticBuildModelReader::new()
        .with_model(plugin.content_location().clone(), BuildModel::default());
    let resolver = RecordingResolver::new();

    let result = resolve(&resolver, &reader, vec![declared(&["1.0.0"])], &[plugin], &[model]).unwrap();

    assert!(result.is_empty());
    assert!(resolver.requests().is_empty());
}

#[test]
fn test_other_version_in_plugin_model_is_not_deduplicated() {
    let plugin = test_plugin();
    let model = classloader_model(&plugin, &[(DEP_GROUP, DEP_ARTIFACT, "0.9.0")]);
    let reader = StaticBuildModelReader::new()
        .with_model(plugin.content_location().clone(), BuildModel::default());

    let result =
        resolve(&RecordingResolver::new(), &reader, vec![declared(&["1.0.0"])], &[plugin], &[model])
            .unwrap();

    assert_eq!(resolved_versions(&result), vec!["1.0.0"]);
}

#[test]
fn test_declaration_for_absent_plugin_fails() {
    let library = library_dependency("org.acme", "lib", "1.0.0");

    let error = resolve(
        &RecordingResolver::new(),
        &StaticBuildModelReader::new(),
        vec![declared(&["1.0.0"])],
        &[library],
        &[],
    )
    .unwrap_err();

    match error {
        MuleDepsError::UndeclaredPlugin { plugin } => {
            assert_eq!(plugin, "org.tests.plugins:test.plugin");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_classloader_model_fails() {
    let plugin = test_plugin();
    let reader = StaticBuildModelReader::new()
        .with_model(plugin.content_location().clone(), BuildModel::default());

    let error = resolve(&RecordingResolver::new(), &reader, vec![declared(&["1.0.0"])], &[plugin], &[])
        .unwrap_err();

    assert!(matches!(error, MuleDepsError::MissingClassLoaderModel { .. }));
    assert!(error.to_string().contains("test.plugin"));
}

#[test]
fn test_two_embedded_entries_resolve_to_two_dependencies() {
    let mut reader = StaticBuildModelReader::new();
    let declaration = PluginDeclaration::new(
        PLUGIN_GROUP,
        PLUGIN_ARTIFACT,
        vec![
            declaration(DEP_GROUP, DEP_ARTIFACT, "1.0.0"),
            declaration(DEP_GROUP, "declaredPomDependencyY20", "2.0.0"),
        ],
    );
    let plugin = plugin_with_embedded(PLUGIN_ARTIFACT, &[declaration], &mut reader);
    let models = vec![classloader_model(&plugin, &[])];
    let resolver = RecordingResolver::new();

    let result = resolve(&resolver, &reader, Vec::new(), &[plugin], &models).unwrap();

    assert_eq!(result.get(&plugin_key()).map(<[_]>::len), Some(2));
    assert_eq!(resolver.requests().len(), 1, "one batch per plugin");
}

#[test]
fn test_embedded_entry_without_artifact_id_fails() {
    let dependency = ConfigNode::new("dependency")
        .with_child(ConfigNode::leaf("groupId", DEP_GROUP))
        .with_child(ConfigNode::leaf("version", "1.0.0"));
    let configuration = ConfigNode::new("configuration").with_child(
        ConfigNode::new("additionalPluginDependencies").with_child(
            ConfigNode::new("plugin")
                .with_child(ConfigNode::leaf("groupId", PLUGIN_GROUP))
                .with_child(ConfigNode::leaf("artifactId", PLUGIN_ARTIFACT))
                .with_child(ConfigNode::new("additionalDependencies").with_child(dependency)),
        ),
    );
    let model = BuildModel {
        build: Some(Build {
            plugins: vec![
                BuildPlugin::new("org.mule.tools.maven", "mule-maven-plugin")
                    .with_configuration(configuration),
            ],
        }),
        ..BuildModel::default()
    };

    let plugin = test_plugin();
    let reader = StaticBuildModelReader::new().with_model(plugin.content_location().clone(), model);
    let models = vec![classloader_model(&plugin, &[])];

    let error = resolve(&RecordingResolver::new(), &reader, Vec::new(), &[plugin], &models).unwrap_err();

    assert!(matches!(error, MuleDepsError::DeclarationError { ref field, .. } if field == "artifactId"));
    assert!(error.to_string().contains("artifactId"));
}

#[test]
fn test_no_declarations_yield_empty_mapping() {
    let plugin = test_plugin();
    let library = library_dependency("org.acme", "lib", "1.0.0");
    let reader = StaticBuildModelReader::new()
        .with_model(plugin.content_location().clone(), BuildModel::default());
    let models = vec![classloader_model(&plugin, &[])];
    let resolver = RecordingResolver::new();

    let result = resolve(&resolver, &reader, Vec::new(), &[plugin, library], &models).unwrap();

    assert!(result.is_empty());
    assert!(resolver.requests().is_empty());
}

#[test]
fn test_resolution_failure_aborts_the_run() {
    let plugin = test_plugin();
    let reader = StaticBuildModelReader::new()
        .with_model(plugin.content_location().clone(), BuildModel::default());
    let models = vec![classloader_model(&plugin, &[])];
    let resolver = RecordingResolver::new().failing_on(DEP_ARTIFACT);

    let error =
        resolve(&resolver, &reader, vec![declared(&["1.0.0"])], &[plugin], &models).unwrap_err();

    assert!(matches!(error, MuleDepsError::ResolutionError { .. }));
}

#[test]
fn test_unreadable_plugin_metadata_fails() {
    let plugin = test_plugin();
    let models = vec![classloader_model(&plugin, &[])];

    let error = resolve(
        &RecordingResolver::new(),
        &StaticBuildModelReader::new(),
        Vec::new(),
        &[plugin],
        &models,
    )
    .unwrap_err();

    assert!(matches!(error, MuleDepsError::MetadataReadError { .. }));
}

#[test]
fn test_custom_packaging_plugin_vocabulary() {
    init_test_logging(None);
    let plugin = test_plugin();
    let mut model = build_model_with_additional_dependencies(&[declared(&["1.0.0"])]);
    if let Some(build) = model.build.as_mut() {
        build.plugins[0].group_id = "org.acme".to_string();
        build.plugins[0].artifact_id = "custom-packager".to_string();
    }
    let reader = StaticBuildModelReader::new().with_model(plugin.content_location().clone(), model);
    let models = vec![classloader_model(&plugin, &[])];
    let application = [plugin];
    let resolver = RecordingResolver::new();

    let default_result = AdditionalDependenciesResolver::new(&resolver, &reader, Vec::new(), "/repository")
        .resolve_dependencies(&application, &models)
        .unwrap();
    assert!(default_result.is_empty());

    let vocabulary = ExtractorVocabulary {
        packaging_plugins: vec![ArtifactKey::new("org.acme", "custom-packager")],
        ..ExtractorVocabulary::default()
    };
    let result = AdditionalDependenciesResolver::new(&resolver, &reader, Vec::new(), "/repository")
        .with_vocabulary(vocabulary)
        .resolve_dependencies(&application, &models)
        .unwrap();

    assert_eq!(resolved_versions(&result), vec!["1.0.0"]);
    assert_eq!(resolver.requests().len(), 1);
}
