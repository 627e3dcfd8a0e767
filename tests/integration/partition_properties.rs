//! Property tests for delta partitioning.

use graph_connector::model::{AttrValue, AttributeDelta};
use graph_connector::partition_deltas;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn value_strategy() -> impl Strategy<Value = AttrValue> {
    prop_oneof![
        "[a-z0-9@.]{0,12}".prop_map(AttrValue::from),
        any::<i64>().prop_map(AttrValue::from),
        any::<bool>().prop_map(AttrValue::from),
    ]
}

fn values_strategy() -> impl Strategy<Value = Vec<AttrValue>> {
    prop::collection::vec(value_strategy(), 0..4)
}

prop_compose! {
    fn replace_delta_strategy()
        (name in "[a-z]{1,8}", values in values_strategy())
        -> AttributeDelta {
        AttributeDelta::replace(name, values)
    }
}

prop_compose! {
    fn modify_delta_strategy()
        (name in "[a-z]{1,8}",
         add in prop::collection::vec(value_strategy(), 1..4),
         remove in values_strategy())
        -> AttributeDelta {
        AttributeDelta::modify(name, add, remove)
    }
}

/// Deltas with distinct names, each carrying a payload.
fn delta_batch_strategy() -> impl Strategy<Value = Vec<AttributeDelta>> {
    prop::collection::vec(prop_oneof![replace_delta_strategy(), modify_delta_strategy()], 0..12)
        .prop_map(|deltas| {
            let mut seen = BTreeSet::new();
            deltas
                .into_iter()
                .filter(|delta| seen.insert(delta.name().to_string()))
                .collect()
        })
}

proptest! {
    #[test]
    fn test_outputs_are_disjoint_and_cover_input(deltas in delta_batch_strategy()) {
        let input_names: BTreeSet<String> =
            deltas.iter().map(|delta| delta.name().to_string()).collect();
        let partitioned = partition_deltas(deltas);

        let replace_names: BTreeSet<String> =
            partitioned.replace.names().map(str::to_string).collect();
        let multi_names: BTreeSet<String> =
            partitioned.multi_value.iter().map(|delta| delta.name().to_string()).collect();

        prop_assert!(replace_names.is_disjoint(&multi_names));
        let union: BTreeSet<String> = replace_names.union(&multi_names).cloned().collect();
        prop_assert_eq!(union, input_names);
    }

    #[test]
    fn test_replace_payload_decides_the_side(deltas in delta_batch_strategy()) {
        let partitioned = partition_deltas(deltas.clone());

        for delta in &deltas {
            match delta.values_to_replace() {
                Some(values) => {
                    let attribute = partitioned.replace.get(delta.name());
                    prop_assert!(attribute.is_some());
                    prop_assert_eq!(attribute.unwrap().values(), values);
                }
                None => prop_assert!(partitioned.multi_value.contains(delta)),
            }
        }
    }

    #[test]
    fn test_multi_value_order_is_preserved(deltas in delta_batch_strategy()) {
        let expected: Vec<AttributeDelta> = deltas
            .iter()
            .filter(|delta| delta.values_to_replace().is_none())
            .cloned()
            .collect();
        prop_assert_eq!(partition_deltas(deltas).multi_value, expected);
    }

    #[test]
    fn test_empty_replace_is_a_clear(name in "[a-z]{1,8}") {
        let partitioned = partition_deltas(vec![AttributeDelta::clear(name.clone())]);

        prop_assert!(partitioned.multi_value.is_empty());
        prop_assert!(partitioned.replace.get(&name).is_some_and(|attribute| attribute.is_empty()));
    }
}
