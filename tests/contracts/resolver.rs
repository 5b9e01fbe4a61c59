//! Contract: resolution yields each component exactly once, regardless of
//! which tree backend holds the files.

use std::path::Path;
use std::sync::Arc;

use metaform::{default_registry, LocalTree, MetadataResolver, VirtualTree};

use crate::common::*;

fn pairs(json: &serde_json::Value) -> Vec<(String, String)> {
    json["components"]
        .as_array()
        .expect("components array")
        .iter()
        .map(|c| {
            (
                c["type"].as_str().unwrap_or_default().to_string(),
                c["fullName"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

/// CONTRACT: local disk and in-memory trees resolve to the same components.
#[test]
fn contract_local_and_virtual_trees_agree() {
    let env = TestEnv::new();
    let files = source_project();
    for (path, body) in &files {
        env.write_project_file(path, body);
    }

    let local = MetadataResolver::new(default_registry(), Arc::new(LocalTree::new()))
        .resolve(&env.project_path("force-app"), None)
        .unwrap();
    let virtual_tree = VirtualTree::from_files(
        files
            .iter()
            .map(|(path, body)| (path.clone(), body.as_bytes().to_vec())),
    );
    let in_memory = MetadataResolver::new(default_registry(), Arc::new(virtual_tree))
        .resolve(Path::new("force-app"), None)
        .unwrap();

    let local_keys: Vec<String> = local.keys().map(|k| k.to_string()).collect();
    let memory_keys: Vec<String> = in_memory.keys().map(|k| k.to_string()).collect();
    assert_eq!(local_keys, memory_keys);
    assert_eq!(local.len(), 3);
}

/// CONTRACT: `resolve` lists every component once, children folded into parents.
#[test]
fn contract_cli_resolve_lists_each_component_once() {
    let env = TestEnv::new();
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }

    let result = env.run(&["resolve", "--json"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let json = result.json();
    assert_eq!(json["count"], 3);
    assert_eq!(
        pairs(&json),
        vec![
            ("ApexClass".to_string(), "Greeter".to_string()),
            ("CustomObject".to_string(), "Account".to_string()),
            ("LightningComponentBundle".to_string(), "hello".to_string()),
        ]
    );
}

/// CONTRACT: a member filter reaches children of composite components.
#[test]
fn contract_member_filter_returns_matching_children() {
    let env = TestEnv::new();
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }

    let result = env.run(&["resolve", "--json", "-m", "CustomField:Account.Name"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let json = result.json();
    assert_eq!(
        pairs(&json),
        vec![("CustomField".to_string(), "Account.Name".to_string())]
    );
    assert_eq!(json["components"][0]["parent"], "Account");
}

/// CONTRACT: missing inputs and unknown types are errors, never empty results.
#[test]
fn contract_bad_inputs_fail_loudly() {
    let env = TestEnv::new();
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }

    let missing = env.run(&["resolve", "does-not-exist"]);
    assert!(!missing.success);
    assert!(missing.stderr.contains("path not found"), "{}", missing.stderr);

    let unknown = env.run(&["resolve", "-m", "NoSuchType:X"]);
    assert!(!unknown.success);
    assert!(
        unknown.stderr.contains("unknown metadata type 'NoSuchType'"),
        "{}",
        unknown.stderr
    );
}

/// CONTRACT: a file whose type cannot be inferred is an error.
#[test]
fn contract_untyped_file_is_a_type_inference_error() {
    let env = TestEnv::new();
    env.write_project_file("force-app/notes/readme.txt", "hello");

    let result = env.run(&["resolve", "force-app/notes/readme.txt"]);
    assert!(!result.success);
    assert!(
        result.stderr.contains("could not infer a metadata type"),
        "{}",
        result.stderr
    );
}
