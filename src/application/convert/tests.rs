//! Tests for ConvertUseCase

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use insta::assert_snapshot;
use tempfile::tempdir;

use super::*;
use crate::application::resolve::MetadataResolver;
use crate::domain::entities::{ComponentSet, SourceComponent};
use crate::domain::ports::{AcceptAll, ConvertEvent, ConvertEventSink, TreeContainer};
use crate::domain::services::xml::parse_document;
use crate::domain::value_objects::TargetFormat;
use crate::infrastructure::repositories::default_registry;
use crate::infrastructure::tree::{LocalTree, VirtualTree, ZipTree};

const PARENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>Account</label>
</CustomObject>
"#;

const COMPOSED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>Account</label>
    <fields>
        <fullName>Name</fullName>
        <type>LongText</type>
    </fields>
    <fields>
        <fullName>Phone</fullName>
        <type>Phone</type>
    </fields>
    <validationRules>
        <fullName>Check</fullName>
        <active>true</active>
    </validationRules>
</CustomObject>
"#;

fn field(name: &str, kind: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<CustomField xmlns=\"http://soap.sforce.com/2006/04/metadata\">\n    <fullName>{}</fullName>\n    <type>{}</type>\n</CustomField>\n",
        name, kind
    )
}

fn resolve_tree(tree: Arc<dyn TreeContainer>, path: &Path) -> ComponentSet {
    MetadataResolver::new(default_registry(), tree)
        .resolve(path, None)
        .unwrap()
}

fn resolve_files(files: &[(&str, String)], path: &str) -> ComponentSet {
    let tree = VirtualTree::from_files(
        files
            .iter()
            .map(|(path, body)| (*path, body.as_bytes().to_vec())),
    );
    resolve_tree(Arc::new(tree), Path::new(path))
}

fn source_project() -> ComponentSet {
    resolve_files(
        &[
            ("force-app/main/default/classes/A.cls", "class A {}".to_string()),
            ("force-app/main/default/classes/A.cls-meta.xml", "<ApexClass/>".to_string()),
            ("force-app/main/default/objects/Account/Account.object-meta.xml", PARENT.to_string()),
            ("force-app/main/default/objects/Account/fields/Name.field-meta.xml", field("Name", "Text")),
            ("force-app/main/default/objects/Account/fields/Phone.field-meta.xml", field("Phone", "Phone")),
        ],
        "force-app",
    )
}

/// Files under `root`, relative and sorted
fn listing(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let relative = path.strip_prefix(root).unwrap();
                files.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    files.sort();
    files
}

struct RecordingSink {
    events: Mutex<Vec<ConvertEvent>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    fn names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| match event {
                ConvertEvent::Started { .. } => "started",
                ConvertEvent::ComponentConverted { .. } => "converted",
                ConvertEvent::FileWritten { .. } => "file",
                ConvertEvent::ComponentFailed { .. } => "failed",
                ConvertEvent::Completed { .. } => "completed",
            })
            .collect()
    }
}

impl ConvertEventSink for RecordingSink {
    fn on_event(&self, event: ConvertEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[test]
fn source_to_metadata_directory_with_manifest() {
    let out = tempdir().unwrap();
    let output = OutputConfig::Directory {
        root: out.path().to_path_buf(),
        package_name: Some("unpackaged".to_string()),
    };
    let options = ConvertOptions::new(TargetFormat::Metadata, output);

    let result = ConvertUseCase::new()
        .execute(&source_project(), &options)
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.converted, vec!["apexclass#A", "customobject#Account"]);
    let package = out.path().join("unpackaged");
    assert_eq!(
        listing(&package),
        vec![
            "classes/A.cls",
            "classes/A.cls-meta.xml",
            "objects/Account.object",
            "package.xml",
        ]
    );
    assert_eq!(result.output.root.as_deref(), Some(package.as_path()));

    let manifest = fs::read_to_string(package.join("package.xml")).unwrap();
    assert_snapshot!(manifest, @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <Package xmlns="http://soap.sforce.com/2006/04/metadata">
        <types>
            <members>A</members>
            <name>ApexClass</name>
        </types>
        <types>
            <members>Account</members>
            <name>CustomObject</name>
        </types>
        <version>62.0</version>
    </Package>
    "#);
}

#[test]
fn parent_with_children_is_one_composed_write() {
    let out = tempdir().unwrap();
    let components = resolve_files(
        &[
            ("objects/Account/Account.object-meta.xml", PARENT.to_string()),
            ("objects/Account/fields/Name.field-meta.xml", field("Name", "Text")),
            ("objects/Account/fields/Phone.field-meta.xml", field("Phone", "Phone")),
        ],
        "objects",
    );
    let options = ConvertOptions::new(TargetFormat::Metadata, OutputConfig::directory(out.path()));

    let result = ConvertUseCase::new().execute(&components, &options).unwrap();

    assert_eq!(result.converted, vec!["customobject#Account"]);
    assert_eq!(listing(out.path()), vec!["objects/Account.object", "package.xml"]);
    let composed = fs::read_to_string(out.path().join("objects/Account.object")).unwrap();
    assert!(composed.contains("<fullName>Name</fullName>"));
    assert!(composed.contains("<fullName>Phone</fullName>"));
}

#[test]
fn zip_output_reads_back_as_a_package() {
    let options = ConvertOptions::new(TargetFormat::Metadata, OutputConfig::zip())
        .with_api_version("60.0");

    let result = ConvertUseCase::new()
        .execute(&source_project(), &options)
        .unwrap();

    let bytes = result.zip_buffer().unwrap().to_vec();
    let archive = ZipTree::from_bytes(bytes).unwrap();
    let manifest = String::from_utf8(archive.read_file(Path::new("package.xml")).unwrap()).unwrap();
    assert!(manifest.contains("<version>60.0</version>"));
    assert_eq!(
        archive.read_file(Path::new("classes/A.cls")).unwrap(),
        b"class A {}"
    );

    let resolved = resolve_tree(Arc::new(archive), Path::new("objects"));
    assert_eq!(resolved.len(), 1);
}

#[test]
fn decompose_then_recompose_keeps_the_document() {
    let metadata = resolve_files(&[("objects/Account.object", COMPOSED.to_string())], "objects");

    let source_out = tempdir().unwrap();
    let to_source = ConvertOptions::new(TargetFormat::Source, OutputConfig::directory(source_out.path()));
    let result = ConvertUseCase::new().execute(&metadata, &to_source).unwrap();
    assert!(result.is_success());
    assert_eq!(
        listing(source_out.path()),
        vec![
            "main/default/objects/Account/Account.object-meta.xml",
            "main/default/objects/Account/fields/Name.field-meta.xml",
            "main/default/objects/Account/fields/Phone.field-meta.xml",
            "main/default/objects/Account/validationRules/Check.validationRule-meta.xml",
        ]
    );

    let source = resolve_tree(
        Arc::new(LocalTree::new()),
        &source_out.path().join("main/default/objects"),
    );
    let metadata_out = tempdir().unwrap();
    let to_metadata =
        ConvertOptions::new(TargetFormat::Metadata, OutputConfig::directory(metadata_out.path()));
    ConvertUseCase::new().execute(&source, &to_metadata).unwrap();

    let original = parse_document(COMPOSED.as_bytes(), Path::new("original")).unwrap();
    let bytes = fs::read(metadata_out.path().join("objects/Account.object")).unwrap();
    let recomposed = parse_document(&bytes, Path::new("recomposed")).unwrap();
    assert_eq!(recomposed, original);
}

#[test]
fn merge_lands_on_existing_files_and_defaults_new_ones() {
    let project = tempdir().unwrap();
    let package = project.path().join("force-app");
    let object_dir = package.join("main/default/objects/Account");
    fs::create_dir_all(object_dir.join("fields")).unwrap();
    fs::write(object_dir.join("Account.object-meta.xml"), PARENT).unwrap();
    fs::write(object_dir.join("fields/Name.field-meta.xml"), field("Name", "Text")).unwrap();
    let local = resolve_tree(Arc::new(LocalTree::new()), &package);
    assert_eq!(local.len(), 1);

    let incoming = resolve_files(
        &[
            ("unpackaged/objects/Account.object", COMPOSED.to_string()),
            ("unpackaged/classes/B.cls", "class B {}".to_string()),
            ("unpackaged/classes/B.cls-meta.xml", "<ApexClass/>".to_string()),
        ],
        "unpackaged",
    );
    let options = ConvertOptions::new(TargetFormat::Source, OutputConfig::merge(local, &package));

    let result = ConvertUseCase::new().execute(&incoming, &options).unwrap();

    assert!(result.is_success(), "{:?}", result.failed);
    assert_eq!(
        listing(&package),
        vec![
            "main/default/classes/B.cls",
            "main/default/classes/B.cls-meta.xml",
            "main/default/objects/Account/Account.object-meta.xml",
            "main/default/objects/Account/fields/Name.field-meta.xml",
            "main/default/objects/Account/fields/Phone.field-meta.xml",
            "main/default/objects/Account/validationRules/Check.validationRule-meta.xml",
        ]
    );
    let name = fs::read_to_string(object_dir.join("fields/Name.field-meta.xml")).unwrap();
    assert!(name.contains("<type>LongText</type>"));
    assert!(!package.join("package.xml").exists());
}

#[test]
fn failed_component_leaves_others_written() {
    let out = tempdir().unwrap();
    let mut components = resolve_files(
        &[
            ("classes/A.cls", "class A {}".to_string()),
            ("classes/A.cls-meta.xml", "<ApexClass/>".to_string()),
        ],
        "classes",
    );
    let apex_class = default_registry().type_by_name("ApexClass").unwrap();
    let tree: Arc<dyn TreeContainer> = Arc::new(VirtualTree::new());
    components.add(
        SourceComponent::new(apex_class, "Gone", tree, Arc::new(AcceptAll))
            .with_xml(Some(PathBuf::from("classes/Gone.cls-meta.xml")))
            .with_content(Some(PathBuf::from("classes/Gone.cls"))),
    );
    let sink = Arc::new(RecordingSink::new());
    let options = ConvertOptions::new(TargetFormat::Source, OutputConfig::directory(out.path()));

    let result = ConvertUseCase::new()
        .with_event_sink(sink.clone())
        .execute(&components, &options)
        .unwrap();

    assert!(!result.is_success());
    assert_eq!(result.converted, vec!["apexclass#A"]);
    assert_eq!(result.failed.len(), 1);
    assert_eq!(result.failed[0].component, "apexclass#Gone");
    assert_eq!(
        listing(out.path()),
        vec![
            "main/default/classes/A.cls",
            "main/default/classes/A.cls-meta.xml",
        ]
    );
    assert_eq!(
        sink.names(),
        vec!["started", "file", "file", "converted", "failed", "completed"]
    );
}

#[test]
fn cancelled_conversion_writes_nothing_further() {
    let out = tempdir().unwrap();
    let token = CancellationToken::new();
    token.cancel();
    let options = ConvertOptions::new(TargetFormat::Metadata, OutputConfig::directory(out.path()));

    let result = ConvertUseCase::new()
        .with_cancellation(token)
        .execute(&source_project(), &options)
        .unwrap();

    assert!(result.cancelled);
    assert!(!result.is_success());
    assert!(result.converted.is_empty());
    assert!(!out.path().join("package.xml").exists());
}

#[test]
fn small_buffer_still_delivers_every_component() {
    let files: Vec<(String, String)> = (0..40)
        .flat_map(|i| {
            [
                (format!("classes/C{i:02}.cls"), format!("class C{i:02} {{}}")),
                (format!("classes/C{i:02}.cls-meta.xml"), "<ApexClass/>".to_string()),
            ]
        })
        .collect();
    let borrowed: Vec<(&str, String)> = files
        .iter()
        .map(|(path, body)| (path.as_str(), body.clone()))
        .collect();
    let components = resolve_files(&borrowed, "classes");
    let options = ConvertOptions::new(TargetFormat::Metadata, OutputConfig::zip()).with_buffer_size(1);

    let result = ConvertUseCase::new().execute(&components, &options).unwrap();

    assert_eq!(result.converted.len(), 40);
    assert_eq!(result.files.len(), 81);
}
