//! Contract: ignored paths never become components and never reach output.

use crate::common::*;

/// CONTRACT: `.forceignore` rules hide files from resolve.
#[test]
fn contract_ignored_paths_are_not_resolved() {
    let env = TestEnv::new();
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }
    env.write_project_file(".forceignore", "# local only\n**/classes/\n");

    let result = env.run(&["resolve", "--json"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(!result.stdout.contains("Greeter"), "{}", result.stdout);
    assert_eq!(result.json()["count"], 2);
}

/// CONTRACT: ignored components are absent from converted output and the manifest.
#[test]
fn contract_ignored_paths_are_not_converted() {
    let env = TestEnv::new();
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }
    env.write_project_file(".forceignore", "**/lwc/\n");

    let result = env.run(&["convert", "--to", "metadata", "-d", "out"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let files = list_files(&env.project_path("out"));
    assert!(files.iter().all(|f| !f.starts_with("lwc/")), "{:?}", files);
    let manifest = env.read_project_file("out/package.xml");
    assert!(!manifest.contains("LightningComponentBundle"));
    assert!(manifest.contains("<members>Greeter</members>"));
}

/// CONTRACT: the ignore file location comes from configuration.
#[test]
fn contract_configured_ignore_file_is_used() {
    let env = TestEnv::with_config("[ignore]\nfile = \"config/ignore\"\n");
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }
    env.write_project_file("config/ignore", "**/objects/\n");

    let result = env.run(&["resolve", "--json"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(!result.stdout.contains("CustomObject"), "{}", result.stdout);
}
