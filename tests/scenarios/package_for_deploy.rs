//! Scenario: Packaging a Project for Deployment
//!
//! Journey: A developer turns their source-format project into a deployable
//! metadata-format zip.
//!
//! Steps:
//! 1. Project holds a class, a decomposed object and a bundle
//! 2. Runs `metaform convert --to metadata --zip -d dist`
//! 3. Opens the archive and finds a manifest plus composed documents
//! 4. Runs the same conversion with `--json` for CI

use std::path::Path;

use metaform::domain::ports::TreeContainer;
use metaform::ZipTree;

use crate::common::*;

fn project(env: &TestEnv) {
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }
    env.write_project_file(
        "force-app/main/default/objects/Account/fields/Phone.field-meta.xml",
        &field("Phone", "Phone"),
    );
}

/// SCENARIO: source project to a deployable zip
#[test]
fn scenario_package_project_as_zip() {
    let env = TestEnv::new();
    project(&env);

    let result = env.run(&["convert", "--to", "metadata", "--zip", "-d", "dist"]);
    assert!(
        result.success,
        "convert should succeed.\nstderr: {}\nstdout: {}",
        result.stderr, result.stdout
    );
    assert!(result.stdout.contains("Archive:"), "{}", result.stdout);

    let archive_path = env.project_path("dist/unpackaged.zip");
    assert!(archive_path.is_file(), "expected {}", archive_path.display());

    let archive = ZipTree::from_bytes(std::fs::read(&archive_path).unwrap()).unwrap();
    let manifest = String::from_utf8(archive.read_file(Path::new("package.xml")).unwrap()).unwrap();
    assert!(manifest.contains("<name>CustomObject</name>"));
    assert!(!manifest.contains("<name>CustomField</name>"));

    let object =
        String::from_utf8(archive.read_file(Path::new("objects/Account.object")).unwrap()).unwrap();
    let name_at = object.find("<fullName>Name</fullName>").expect("Name field");
    let phone_at = object.find("<fullName>Phone</fullName>").expect("Phone field");
    assert!(name_at < phone_at, "children are ordered by name:\n{}", object);
    assert!(archive.exists(Path::new("classes/Greeter.cls")));
}

/// SCENARIO: CI consumes NDJSON progress events
#[test]
fn scenario_ci_reads_json_events() {
    let env = TestEnv::new();
    project(&env);

    let result = env.run(&["convert", "--to", "metadata", "-d", "out", "--json"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let events = result.events();
    assert_eq!(events.first().unwrap()["event"], "start");
    assert_eq!(events.first().unwrap()["component_count"], 3);

    let last = events.last().unwrap();
    assert_eq!(last["event"], "complete");
    assert_eq!(last["status"], "success");
    assert_eq!(last["converted"], 3);

    let converted: Vec<&str> = events
        .iter()
        .filter(|e| e["event"] == "component_converted")
        .filter_map(|e| e["component"].as_str())
        .collect();
    assert_eq!(
        converted,
        vec![
            "apexclass#Greeter",
            "customobject#Account",
            "lightningcomponentbundle#hello"
        ]
    );
    assert!(events.iter().all(|e| e["timestamp"].is_string()));
}

/// SCENARIO: only selected members are packaged
#[test]
fn scenario_package_selected_members() {
    let env = TestEnv::new();
    project(&env);

    let result = env.run(&[
        "convert",
        "--to",
        "metadata",
        "-d",
        "out",
        "--package-name",
        "release",
        "-m",
        "ApexClass",
    ]);
    assert!(result.success, "stderr: {}", result.stderr);

    let files = list_files(&env.project_path("out/release"));
    assert_eq!(
        files,
        vec!["classes/Greeter.cls", "classes/Greeter.cls-meta.xml", "package.xml"]
    );
}
