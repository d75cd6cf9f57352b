use trellis::graph::{DirectIdMap, FilteredGraph, Graph, IdMap, NodeFilter};
use trellis::CsrGraph;

#[test]
fn round_trip_is_identity_on_registered_ids() {
    let mut builder = DirectIdMap::builder();
    let originals = [100u64, 5, 42, 7_000_000_000, 0];
    for &original in &originals {
        builder.add_node(original);
    }
    let map = builder.build();

    assert_eq!(map.node_count(), originals.len() as u64);
    for &original in &originals {
        let mapped = map.to_mapped_node_id(original).unwrap();
        assert_eq!(map.to_original_node_id(mapped), original);
        // Idempotent round trip.
        assert_eq!(
            map.to_mapped_node_id(map.to_original_node_id(mapped)),
            Some(mapped)
        );
    }
}

#[test]
fn mapped_ids_are_dense_in_registration_order() {
    let mut builder = DirectIdMap::builder();
    assert_eq!(builder.add_node(900), 0);
    assert_eq!(builder.add_node(20), 1);
    assert_eq!(builder.add_node(333), 2);
    // Re-registering returns the first assignment.
    assert_eq!(builder.add_node(20), 1);
    let map = builder.build();
    assert_eq!(map.node_count(), 3);
}

#[test]
fn unknown_original_id_is_not_mapped() {
    let mut builder = DirectIdMap::builder();
    builder.add_node(1);
    let map = builder.build();

    assert_eq!(map.to_mapped_node_id(99), None);
    assert!(!map.contains(99));
    assert!(map.contains(1));
}

#[test]
fn filter_renumbers_members_in_encounter_order() {
    let mut builder = DirectIdMap::builder();
    for original in [10u64, 11, 12, 13, 14] {
        builder.add_node(original);
    }
    let map = builder.build();

    // Keep the even originals: 10, 12, 14 -> filtered 0, 1, 2.
    let filter = NodeFilter::new(&map, |original| original % 2 == 0);
    assert_eq!(filter.node_count(), 3);
    for (filtered, inner) in [(0u64, 0u64), (1, 2), (2, 4)] {
        assert_eq!(filter.to_inner(filtered), inner);
        assert_eq!(filter.to_filtered(inner), Some(filtered));
    }
    assert_eq!(filter.to_filtered(1), None);
    assert!(filter.contains_inner(2));
    assert!(!filter.contains_inner(3));
}

#[test]
fn filter_from_explicit_member_set() {
    let mut builder = DirectIdMap::builder();
    for original in [7u64, 8, 9] {
        builder.add_node(original);
    }
    let map = builder.build();

    let filter = NodeFilter::from_original_ids(&map, &[9, 7]);
    assert_eq!(filter.node_count(), 2);
    // Encounter order is inner-id order, not member-list order.
    assert_eq!(filter.to_inner(0), 0);
    assert_eq!(filter.to_inner(1), 2);
}

fn diamond_graph() -> CsrGraph {
    // 1 -> 2 -> 4, 1 -> 3 -> 4
    let mut builder = CsrGraph::builder();
    builder.add_relationship(1, 2);
    builder.add_relationship(1, 3);
    builder.add_relationship(2, 4);
    builder.add_relationship(3, 4);
    builder.build()
}

#[test]
fn filtered_graph_translates_and_filters_adjacency() {
    let graph = diamond_graph();
    let view = FilteredGraph::from_predicate(&graph, |original| original != 3);

    assert_eq!(view.node_count(), 3);
    // Only 1 -> 2 and 2 -> 4 survive.
    assert_eq!(view.relationship_count(), 2);

    let mapped_1 = view.to_mapped_node_id(1).unwrap();
    assert_eq!(view.degree(mapped_1), 1);

    let mut seen = Vec::new();
    view.for_each_relationship(mapped_1, &mut |_, target| {
        seen.push(view.to_original_node_id(target));
        true
    });
    assert_eq!(seen, vec![2]);

    // The excluded node is invisible through the view.
    assert_eq!(view.to_mapped_node_id(3), None);
    // Round trip composes down to true original ids.
    for original in [1u64, 2, 4] {
        let mapped = view.to_mapped_node_id(original).unwrap();
        assert_eq!(view.to_original_node_id(mapped), original);
    }
}
