//! Contract: configuration problems are reported, never silently dropped.

use crate::common::*;

/// CONTRACT: unknown keys produce a warning with a suggestion and do not fail.
#[test]
fn contract_unknown_config_keys_warn() {
    let env = TestEnv::with_config("[convert]\nbuffer_sise = 4\n");
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }

    let result = env.run(&["resolve"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stderr.contains("buffer_sise"), "{}", result.stderr);
    assert!(result.stderr.contains("buffer_size"), "{}", result.stderr);
    assert!(result.stdout.starts_with("Resolved 3 component(s)"));
}

/// CONTRACT: malformed config is an error.
#[test]
fn contract_malformed_config_fails() {
    let env = TestEnv::with_config("[project\n");
    let result = env.run(&["resolve"]);
    assert!(!result.success);
    assert!(result.stderr.contains("metaform.toml"), "{}", result.stderr);
}

/// CONTRACT: package directories from config are the default inputs.
#[test]
fn contract_package_directories_drive_default_inputs() {
    let env = TestEnv::with_config("[project]\npackage_directories = [\"pkg-a\", \"pkg-b\"]\n");
    env.write_project_files(&[
        ("pkg-a/classes/A.cls", "class A {}"),
        ("pkg-a/classes/A.cls-meta.xml", APEX_META),
        ("pkg-b/classes/B.cls", "class B {}"),
        ("pkg-b/classes/B.cls-meta.xml", APEX_META),
    ]);

    let result = env.run(&["resolve", "--json"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.json()["count"], 2);
}
