use muledeps_cli::metadata::{Build, BuildModel, BuildPlugin, ConfigNode};
use muledeps_cli::models::{
    Artifact, ArtifactCoordinates, ArtifactKey, ResolvedDependency, to_application_model_artifacts,
};
use muledeps_cli::shared::{propagate_shared_libraries, shared_libraries_from_model};
use muledeps_cli::test_utils::{artifact, init_test_logging, library_dependency};

fn shared_flags(artifacts: &[Artifact]) -> Vec<(String, bool)> {
    artifacts
        .iter()
        .map(|artifact| (artifact.coordinates().artifact_id().to_string(), artifact.is_shared()))
        .collect()
}

#[test]
fn test_library_and_transitive_child_are_marked() {
    init_test_logging(None);
    let tree = vec![
        library_dependency("G", "A", "1.0.0")
            .with_transitive_dependencies(vec![library_dependency("G", "B", "1.0.0")]),
        library_dependency("G", "C", "1.0.0"),
    ];
    let mut artifacts = vec![
        artifact("G", "A", "1.0.0"),
        artifact("G", "B", "1.0.0"),
        artifact("G", "C", "1.0.0"),
    ];

    let marked = propagate_shared_libraries(&[ArtifactKey::new("G", "A")], &tree, &mut artifacts);

    assert_eq!(marked, 2);
    assert_eq!(
        shared_flags(&artifacts),
        vec![("A".to_string(), true), ("B".to_string(), true), ("C".to_string(), false)]
    );
}

#[test]
fn test_propagation_is_idempotent() {
    let tree = vec![library_dependency("G", "A", "1.0.0").with_transitive_dependencies(vec![
        library_dependency("G", "B", "1.0.0")
            .with_transitive_dependencies(vec![library_dependency("G", "D", "1.0.0")]),
    ])];
    let mut artifacts = to_application_model_artifacts(&[
        library_dependency("G", "A", "1.0.0"),
        library_dependency("G", "B", "1.0.0"),
        library_dependency("G", "C", "1.0.0"),
        library_dependency("G", "D", "1.0.0"),
    ]);
    let nominated = [ArtifactKey::new("G", "A")];

    propagate_shared_libraries(&nominated, &tree, &mut artifacts);
    let first = shared_flags(&artifacts);
    let marked = propagate_shared_libraries(&nominated, &tree, &mut artifacts);

    assert_eq!(marked, 0);
    assert_eq!(shared_flags(&artifacts), first);
}

#[test]
fn test_repeated_library_with_deeper_subtree_is_walked() {
    init_test_logging(None);
    let tree = vec![
        library_dependency("G", "L1", "1.0.0")
            .with_transitive_dependencies(vec![library_dependency("G", "X", "1.0.0")]),
        library_dependency("G", "L2", "1.0.0").with_transitive_dependencies(vec![
            library_dependency("G", "X", "1.0.0")
                .with_transitive_dependencies(vec![library_dependency("G", "Y", "1.0.0")]),
        ]),
    ];
    let mut artifacts = vec![artifact("G", "X", "1.0.0"), artifact("G", "Y", "1.0.0")];

    let marked = propagate_shared_libraries(
        &[ArtifactKey::new("G", "L1"), ArtifactKey::new("G", "L2")],
        &tree,
        &mut artifacts,
    );

    assert_eq!(marked, 2);
    assert_eq!(
        shared_flags(&artifacts),
        vec![("X".to_string(), true), ("Y".to_string(), true)]
    );
}

#[test]
fn test_library_reachable_twice_is_counted_once() {
    let common = library_dependency("G", "common", "1.0.0");
    let tree = vec![
        library_dependency("G", "A", "1.0.0").with_transitive_dependencies(vec![common.clone()]),
        library_dependency("G", "B", "1.0.0").with_transitive_dependencies(vec![common]),
    ];
    let mut artifacts = vec![artifact("G", "common", "1.0.0")];

    let marked = propagate_shared_libraries(
        &[ArtifactKey::new("G", "A"), ArtifactKey::new("G", "B")],
        &tree,
        &mut artifacts,
    );

    assert_eq!(marked, 1);
    assert!(artifacts[0].is_shared());
}

#[test]
fn test_domain_artifacts_are_provided() {
    let domain = ResolvedDependency::new(
        ArtifactCoordinates::new("G", "domain", "1.0.0").with_classifier(Some("mule-domain".to_string())),
        url::Url::parse("file:///repository/G/domain/1.0.0/domain-1.0.0-mule-domain.jar").unwrap(),
    );

    let artifacts = to_application_model_artifacts(&[domain, library_dependency("G", "A", "1.0.0")]);

    assert_eq!(artifacts[0].coordinates().scope(), Some("provided"));
    assert!(artifacts[0].content_location().is_none());
    assert_eq!(artifacts[1].coordinates().scope(), None);
    assert!(artifacts[1].content_location().is_some());
}

#[test]
fn test_nominations_from_build_model_drive_propagation() {
    let entry = ConfigNode::new("sharedLibrary")
        .with_child(ConfigNode::leaf("groupId", "G"))
        .with_child(ConfigNode::leaf("artifactId", "A"));
    let model = BuildModel {
        build: Some(Build {
            plugins: vec![
                BuildPlugin::new("org.mule.tools.maven", "mule-maven-plugin").with_configuration(
                    ConfigNode::new("configuration")
                        .with_child(ConfigNode::new("sharedLibraries").with_child(entry)),
                ),
            ],
        }),
        ..BuildModel::default()
    };
    let tree = vec![
        library_dependency("G", "A", "1.0.0")
            .with_transitive_dependencies(vec![library_dependency("G", "B", "1.0.0")]),
    ];
    let mut artifacts = vec![artifact("G", "A", "1.0.0"), artifact("G", "B", "1.0.0")];

    let nominated = shared_libraries_from_model(&model, &[]).unwrap();
    propagate_shared_libraries(&nominated, &tree, &mut artifacts);

    assert!(artifacts.iter().all(Artifact::is_shared));
}
