//! Property tests for decomposition and recomposition.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use proptest::prelude::*;

use metaform::domain::ports::TreeContainer;
use metaform::domain::services::xml::parse_document;
use metaform::{
    default_registry, ConvertOptions, ConvertUseCase, MetadataResolver, OutputConfig,
    TargetFormat, VirtualTree, ZipTree,
};

fn composed(fields: &BTreeSet<String>) -> String {
    let mut doc = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<CustomObject xmlns=\"http://soap.sforce.com/2006/04/metadata\">\n    <label>Thing</label>\n",
    );
    for name in fields {
        doc.push_str(&format!(
            "    <fields>\n        <fullName>{name}</fullName>\n        <type>Text</type>\n    </fields>\n"
        ));
    }
    doc.push_str("</CustomObject>\n");
    doc
}

fn convert(tree: Arc<dyn TreeContainer>, root: &str, target: TargetFormat) -> ZipTree {
    let set = MetadataResolver::new(default_registry(), tree)
        .resolve(Path::new(root), None)
        .unwrap();
    let result = ConvertUseCase::new()
        .execute(&set, &ConvertOptions::new(target, OutputConfig::zip()))
        .unwrap();
    assert!(result.is_success(), "{:?}", result.failed);
    ZipTree::from_bytes(result.zip_buffer().unwrap().to_vec()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: decomposing then recomposing a document with name-ordered
    /// children yields the same document.
    #[test]
    fn property_decompose_recompose_round_trips(
        fields in proptest::collection::btree_set("[A-Z][a-z]{0,6}__c", 0..8)
    ) {
        let original = composed(&fields);
        let metadata = VirtualTree::from_files([("objects/Thing.object", original.clone().into_bytes())]);

        let source = convert(Arc::new(metadata), "objects", TargetFormat::Source);
        let recomposed = convert(Arc::new(source), "main/default/objects", TargetFormat::Metadata);

        let bytes = recomposed.read_file(Path::new("objects/Thing.object")).unwrap();
        prop_assert_eq!(
            parse_document(&bytes, Path::new("recomposed")).unwrap(),
            parse_document(original.as_bytes(), Path::new("original")).unwrap()
        );
    }
}
