use trellis::graph::{
    FilteredGraph, GraphIntersect, IdMap, NodeFilter, RelationshipIntersect,
};
use trellis::{build_inverse_index, CsrGraph};

/// Undirected test graph with two triangles sharing an edge:
/// {1,2,3} and {2,3,4}, plus a pendant node 5 attached to 4.
fn two_triangle_graph() -> CsrGraph {
    let mut builder = CsrGraph::builder();
    for (a, b) in [(1u64, 2u64), (2, 3), (1, 3), (2, 4), (3, 4), (4, 5)] {
        builder.add_undirected_relationship(a, b);
    }
    builder.build()
}

fn triangles_from(
    intersect: &mut dyn RelationshipIntersect,
    node: u64,
) -> Vec<(u64, u64, u64)> {
    let mut found = Vec::new();
    intersect.intersect_all(node, &mut |a, b, c| found.push((a, b, c)));
    found
}

#[test]
fn csr_intersect_enumerates_each_triangle_once_per_anchor() {
    let graph = two_triangle_graph();
    let mut intersect = GraphIntersect::of(&graph);

    let anchor = graph.to_mapped_node_id(2).unwrap();
    let mut triangles: Vec<(u64, u64, u64)> = triangles_from(&mut intersect, anchor)
        .into_iter()
        .map(|(a, b, c)| {
            (
                graph.to_original_node_id(a),
                graph.to_original_node_id(b),
                graph.to_original_node_id(c),
            )
        })
        .collect();
    triangles.sort_unstable();

    // From node 2's perspective: {2,1,3} and {2,3,4}, each exactly once.
    assert_eq!(triangles, vec![(2, 1, 3), (2, 3, 4)]);
}

#[test]
fn pendant_node_anchors_no_triangle() {
    let graph = two_triangle_graph();
    let mut intersect = GraphIntersect::of(&graph);
    let anchor = graph.to_mapped_node_id(5).unwrap();
    assert!(triangles_from(&mut intersect, anchor).is_empty());
}

#[test]
fn filtered_intersect_drops_triangles_with_excluded_members() {
    let graph = two_triangle_graph();
    // Excluding node 1 kills triangle {1,2,3} but keeps {2,3,4}.
    let view = FilteredGraph::from_predicate(&graph, |original| original != 1);
    let mut intersect = GraphIntersect::of_filtered(&view);

    let anchor = view.to_mapped_node_id(2).unwrap();
    let triangles: Vec<(u64, u64, u64)> = triangles_from(&mut intersect, anchor)
        .into_iter()
        .map(|(a, b, c)| {
            (
                view.to_original_node_id(a),
                view.to_original_node_id(b),
                view.to_original_node_id(c),
            )
        })
        .collect();

    assert_eq!(triangles, vec![(2, 3, 4)]);
}

#[test]
fn filtered_intersect_never_invents_triangles() {
    let graph = two_triangle_graph();
    let full_filter = NodeFilter::new(&graph, |_| true);
    let view = FilteredGraph::new(&graph, full_filter);

    let mut unfiltered = GraphIntersect::of(&graph);
    let mut filtered = GraphIntersect::of_filtered(&view);

    for original in [1u64, 2, 3, 4, 5] {
        let mapped = graph.to_mapped_node_id(original).unwrap();
        let mut expected = triangles_from(&mut unfiltered, mapped);
        // An all-member filter renumbers identically, so triangles match.
        let mut actual = triangles_from(&mut filtered, view.to_mapped_node_id(original).unwrap());
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(actual, expected, "anchor {original}");
    }
}

#[test]
fn inverse_index_matches_sequential_transpose() {
    let mut builder = CsrGraph::builder();
    for (a, b) in [(0u64, 1u64), (0, 2), (1, 2), (3, 2), (2, 0), (3, 0)] {
        builder.add_relationship(a, b);
    }
    let graph = builder.build();

    let descriptor = build_inverse_index(&graph, "KNOWS", 4).unwrap();
    assert_eq!(descriptor.relationship_type, "KNOWS");
    assert_eq!(descriptor.offsets.len() as u64, graph.node_count() + 1);
    assert_eq!(
        *descriptor.offsets.last().unwrap() as u64,
        trellis::Graph::relationship_count(&graph)
    );

    // Sequential transpose oracle.
    let node_count = graph.node_count();
    let mut incoming: Vec<Vec<u64>> = vec![Vec::new(); node_count as usize];
    for source in 0..node_count {
        for &target in graph.neighbors(source) {
            incoming[target as usize].push(source);
        }
    }
    for (node, expected) in incoming.iter_mut().enumerate() {
        expected.sort_unstable();
        let segment =
            &descriptor.targets[descriptor.offsets[node]..descriptor.offsets[node + 1]];
        assert_eq!(segment, expected.as_slice(), "node {node}");
    }
}
