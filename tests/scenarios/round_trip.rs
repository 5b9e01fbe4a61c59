//! Scenario: Round Trip Between Formats
//!
//! Journey: A team converts its project to metadata format and back, and
//! expects the same components with the same content.

use std::path::Path;
use std::sync::Arc;

use metaform::domain::services::xml::parse_document;
use metaform::{default_registry, LocalTree, MetadataResolver};

use crate::common::*;

/// SCENARIO: source -> metadata -> source keeps every component
#[test]
fn scenario_round_trip_keeps_components() {
    let env = TestEnv::new();
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }

    let to_metadata = env.run(&["convert", "--to", "metadata", "-d", "mdapi"]);
    assert!(to_metadata.success, "stderr: {}", to_metadata.stderr);
    let to_source = env.run(&["convert", "mdapi", "--to", "source", "-d", "back"]);
    assert!(to_source.success, "stderr: {}", to_source.stderr);

    let resolve = |dir: &str| {
        MetadataResolver::new(default_registry(), Arc::new(LocalTree::new()))
            .resolve(&env.project_path(dir), None)
            .unwrap()
            .keys()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(resolve("force-app"), resolve("back"));

    let original = env.read_project_file("force-app/main/default/objects/Account/fields/Name.field-meta.xml");
    let returned = env.read_project_file("back/main/default/objects/Account/fields/Name.field-meta.xml");
    assert_eq!(
        parse_document(original.as_bytes(), Path::new("original")).unwrap(),
        parse_document(returned.as_bytes(), Path::new("returned")).unwrap()
    );
    assert_eq!(
        env.read_project_file("back/main/default/classes/Greeter.cls"),
        "public class Greeter {}"
    );
}
