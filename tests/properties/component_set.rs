//! Property tests for component identity.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use metaform::domain::ports::{AcceptAll, TreeContainer};
use metaform::{default_registry, ComponentSet, SourceComponent, VirtualTree};

fn class(name: &str) -> SourceComponent {
    let ty = default_registry().type_by_name("ApexClass").unwrap();
    let tree: Arc<dyn TreeContainer> = Arc::new(VirtualTree::new());
    SourceComponent::new(ty, name, tree, Arc::new(AcceptAll))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a set holds each identity once, whatever the insertion order.
    #[test]
    fn property_set_holds_each_identity_once(
        names in proptest::collection::vec("[A-Z][a-z]{0,4}", 0..24)
    ) {
        let mut set = ComponentSet::new();
        let mut seen = BTreeSet::new();
        for name in &names {
            let inserted = set.add(class(name));
            prop_assert_eq!(inserted, seen.insert(name.clone()));
        }
        prop_assert_eq!(set.len(), seen.len());

        let listed: Vec<String> = set.values().map(|c| c.full_name().to_string()).collect();
        let expected: Vec<String> = seen.into_iter().collect();
        prop_assert_eq!(listed, expected);
    }

    /// PROPERTY: re-adding a set to itself changes nothing.
    #[test]
    fn property_extend_is_idempotent(
        names in proptest::collection::btree_set("[A-Z][a-z]{0,4}", 0..16)
    ) {
        let set: ComponentSet = names.iter().map(|n| class(n)).collect();
        let mut doubled = set.clone();
        doubled.extend(set.clone());

        let before: Vec<String> = set.keys().map(|k| k.to_string()).collect();
        let after: Vec<String> = doubled.keys().map(|k| k.to_string()).collect();
        prop_assert_eq!(before, after);
    }
}
