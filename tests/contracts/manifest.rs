//! Contract: metadata-format output always carries a manifest listing exactly
//! the converted components; source-format output never does.

use crate::common::*;

fn write_project(env: &TestEnv) {
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }
}

/// CONTRACT: package.xml lists every converted component under its type.
#[test]
fn contract_manifest_lists_converted_components() {
    let env = TestEnv::new();
    write_project(&env);

    let result = env.run(&["convert", "--to", "metadata", "-d", "out", "--api-version", "61.0"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("Convert Complete"), "{}", result.stdout);

    let manifest = env.read_project_file("out/package.xml");
    let expected = [
        "<members>Greeter</members>\n        <name>ApexClass</name>",
        "<members>Account</members>\n        <name>CustomObject</name>",
        "<members>hello</members>\n        <name>LightningComponentBundle</name>",
        "<version>61.0</version>",
    ];
    for fragment in expected {
        assert!(manifest.contains(fragment), "missing {:?} in\n{}", fragment, manifest);
    }
    assert!(env.project_path("out/objects/Account.object").is_file());
    assert!(env.project_path("out/classes/Greeter.cls").is_file());
}

/// CONTRACT: API version precedence is flag, then environment, then config.
#[test]
fn contract_api_version_precedence() {
    let env = TestEnv::with_config("[project]\napi_version = \"58.0\"\n");
    write_project(&env);

    env.run(&["convert", "--to", "metadata", "-d", "from-config"]);
    assert!(env
        .read_project_file("from-config/package.xml")
        .contains("<version>58.0</version>"));

    env.run_with_env(
        &["convert", "--to", "metadata", "-d", "from-env"],
        &[("METAFORM_API_VERSION", "59.0")],
    );
    assert!(env
        .read_project_file("from-env/package.xml")
        .contains("<version>59.0</version>"));

    env.run_with_env(
        &["convert", "--to", "metadata", "-d", "from-flag", "--api-version", "60.0"],
        &[("METAFORM_API_VERSION", "59.0")],
    );
    assert!(env
        .read_project_file("from-flag/package.xml")
        .contains("<version>60.0</version>"));
}

/// CONTRACT: source-format output has no manifest.
#[test]
fn contract_source_output_has_no_manifest() {
    let env = TestEnv::new();
    env.write_project_file("mdapi/objects/Account.object", ACCOUNT_COMPOSED);

    let result = env.run(&["convert", "mdapi", "--to", "source", "-d", "src-out"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(!env.project_path("src-out/package.xml").exists());
    assert!(env
        .project_path("src-out/main/default/objects/Account/fields/Phone.field-meta.xml")
        .is_file());
}
