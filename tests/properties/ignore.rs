//! Property tests for ignore handling during resolution.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use proptest::prelude::*;

use metaform::{default_registry, ForceIgnore, MetadataResolver, VirtualTree};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: an ignored component never appears in the resolved set,
    /// and every other component does.
    #[test]
    fn property_ignored_components_never_resolve(
        classes in proptest::collection::btree_map("[A-Z][a-z]{1,5}", any::<bool>(), 1..12)
    ) {
        let files: Vec<(String, Vec<u8>)> = classes
            .keys()
            .flat_map(|name| {
                [
                    (format!("pkg/classes/{name}.cls"), format!("class {name} {{}}").into_bytes()),
                    (format!("pkg/classes/{name}.cls-meta.xml"), b"<ApexClass/>".to_vec()),
                ]
            })
            .collect();
        let patterns: String = classes
            .iter()
            .filter(|(_, ignored)| **ignored)
            .map(|(name, _)| format!("**/{name}.cls\n**/{name}.cls-meta.xml\n"))
            .collect();
        let ignore = ForceIgnore::from_content(Path::new(""), Path::new(".forceignore"), &patterns)
            .unwrap();

        let resolver = MetadataResolver::new(default_registry(), Arc::new(VirtualTree::from_files(files)))
            .with_ignore(Arc::new(ignore));
        let set = resolver.resolve(Path::new("pkg"), None).unwrap();

        let resolved: BTreeSet<String> = set.values().map(|c| c.full_name().to_string()).collect();
        let expected: BTreeSet<String> = classes
            .iter()
            .filter(|(_, ignored)| !**ignored)
            .map(|(name, _)| name.clone())
            .collect();
        prop_assert_eq!(resolved, expected);
    }
}
