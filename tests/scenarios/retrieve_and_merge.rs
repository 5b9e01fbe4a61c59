//! Scenario: Retrieving Metadata into an Existing Project
//!
//! Journey: A developer retrieved a metadata-format package and folds it
//! back into their source-format project.
//!
//! Steps:
//! 1. Project already has Account with a Name field
//! 2. Retrieved package has Account (Name changed, Phone added) and a new class
//! 3. Runs `metaform convert mdapi --to source --merge-into force-app`
//! 4. Existing files are updated in place, new ones land in the package

use crate::common::*;

const OBJECT_DIR: &str = "force-app/main/default/objects/Account";

/// SCENARIO: merge a retrieved package into the project
#[test]
fn scenario_merge_retrieved_package() {
    let env = TestEnv::new();
    env.write_project_file(&format!("{OBJECT_DIR}/Account.object-meta.xml"), ACCOUNT_OBJECT);
    env.write_project_file(&format!("{OBJECT_DIR}/fields/Name.field-meta.xml"), &field("Name", "Text"));
    env.write_project_files(&[
        ("mdapi/objects/Account.object", ACCOUNT_COMPOSED),
        ("mdapi/classes/Fresh.cls", "public class Fresh {}"),
        ("mdapi/classes/Fresh.cls-meta.xml", APEX_META),
        ("mdapi/package.xml", "<Package/>"),
    ]);

    let result = env.run(&["convert", "mdapi", "--to", "source", "--merge-into", "force-app"]);
    assert!(
        result.success,
        "merge should succeed.\nstderr: {}\nstdout: {}",
        result.stderr, result.stdout
    );

    assert_eq!(
        list_files(&env.project_path("force-app")),
        vec![
            "main/default/classes/Fresh.cls",
            "main/default/classes/Fresh.cls-meta.xml",
            "main/default/objects/Account/Account.object-meta.xml",
            "main/default/objects/Account/fields/Name.field-meta.xml",
            "main/default/objects/Account/fields/Phone.field-meta.xml",
            "main/default/objects/Account/validationRules/Check.validationRule-meta.xml",
        ]
    );
    let name = env.read_project_file(&format!("{OBJECT_DIR}/fields/Name.field-meta.xml"));
    assert!(name.contains("<type>LongText</type>"), "{}", name);
    assert!(!env.project_path("force-app/package.xml").exists());
}

/// SCENARIO: merging into a directory that does not exist yet
#[test]
fn scenario_merge_into_new_package_directory() {
    let env = TestEnv::new();
    env.write_project_files(&[
        ("mdapi/classes/Fresh.cls", "public class Fresh {}"),
        ("mdapi/classes/Fresh.cls-meta.xml", APEX_META),
    ]);

    let result = env.run(&["convert", "mdapi", "--to", "source", "--merge-into", "new-app"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(env
        .project_path("new-app/main/default/classes/Fresh.cls")
        .is_file());
}

/// SCENARIO: merge is refused for metadata-format output
#[test]
fn scenario_merge_requires_source_target() {
    let env = TestEnv::new();
    for (path, body) in source_project() {
        env.write_project_file(&path, &body);
    }

    let result = env.run(&["convert", "--to", "metadata", "--merge-into", "force-app"]);
    assert!(!result.success);
    assert!(result.stderr.contains("--merge-into"), "{}", result.stderr);
}
