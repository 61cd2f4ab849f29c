//! Structural adjacency graph between placed objects.
//!
//! Two objects are adjacent when some cell of one shares an edge with
//! some cell of the other on the same level. Only `±x` and `±y`
//! neighbours count; diagonal and vertical contact never does.

use std::collections::VecDeque;

use cella_core::{GridState, ObjectId};
use indexmap::{IndexMap, IndexSet};

/// Undirected adjacency: every edge appears in both endpoints' sets.
///
/// Every object in the source grid is a key, isolated ones with an
/// empty set.
pub type StructuralGraph = IndexMap<ObjectId, IndexSet<ObjectId>>;

/// Degree statistics over a [`StructuralGraph`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStats {
    /// Number of objects.
    pub node_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Objects with no neighbours.
    pub isolated_count: usize,
    /// Mean degree, 0.0 for an empty graph.
    pub avg_degree: f64,
    /// Smallest degree, 0 for an empty graph.
    pub min_degree: usize,
    /// Largest degree, 0 for an empty graph.
    pub max_degree: usize,
}

/// Build the contact graph of `grid`. O(occupied cells).
///
/// # Examples
///
/// ```
/// use cella_core::GridState;
/// use cella_analysis::build_structural_graph;
///
/// let grid = GridState::from_cells([
///     ((0, 0, 0), "wall_01"),
///     ((1, 0, 0), "wall_02"),
///     ((2, 0, 0), "wall_03"),
/// ]);
/// let graph = build_structural_graph(&grid);
/// assert!(graph["wall_01"].contains("wall_02"));
/// assert!(!graph["wall_01"].contains("wall_03"));
/// ```
pub fn build_structural_graph(grid: &GridState) -> StructuralGraph {
    let mut graph: StructuralGraph = grid
        .object_ids()
        .into_iter()
        .map(|id| (id, IndexSet::new()))
        .collect();

    for (cell, owner) in grid.cells() {
        for n in cell.planar_neighbours() {
            let Some(other) = grid.get_object(n) else {
                continue;
            };
            if other == owner {
                continue;
            }
            if let Some(set) = graph.get_mut(owner) {
                set.insert(other.clone());
            }
            if let Some(set) = graph.get_mut(other) {
                set.insert(owner.clone());
            }
        }
    }
    graph
}

/// Partition all nodes into maximal connected groups by depth-first
/// traversal. Isolated nodes form singleton components.
///
/// Components appear in the order of their first node in `graph`.
pub fn find_connected_components(graph: &StructuralGraph) -> Vec<IndexSet<ObjectId>> {
    let mut seen: IndexSet<&ObjectId> = IndexSet::with_capacity(graph.len());
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for start in graph.keys() {
        if !seen.insert(start) {
            continue;
        }
        let mut component = IndexSet::new();
        stack.push(start);
        while let Some(node) = stack.pop() {
            component.insert(node.clone());
            for n in graph.get(node).into_iter().flatten() {
                if seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        components.push(component);
    }
    components
}

/// Count nodes and edges and summarise degrees.
pub fn get_graph_stats(graph: &StructuralGraph) -> GraphStats {
    if graph.is_empty() {
        return GraphStats::default();
    }
    let degrees: Vec<usize> = graph.values().map(IndexSet::len).collect();
    let degree_sum: usize = degrees.iter().sum();
    GraphStats {
        node_count: graph.len(),
        edge_count: degree_sum / 2,
        isolated_count: degrees.iter().filter(|d| **d == 0).count(),
        avg_degree: degree_sum as f64 / degrees.len() as f64,
        min_degree: degrees.iter().copied().min().unwrap_or(0),
        max_degree: degrees.iter().copied().max().unwrap_or(0),
    }
}

/// Direct neighbours of `object_id`; empty for unknown ids.
pub fn find_neighbors(graph: &StructuralGraph, object_id: &str) -> IndexSet<ObjectId> {
    graph.get(object_id).cloned().unwrap_or_default()
}

/// Whether `a` and `b` lie in the same component (breadth-first).
///
/// False when either id is not a node. A node is connected to itself.
pub fn is_connected(graph: &StructuralGraph, a: &str, b: &str) -> bool {
    let (Some((start, _, _)), true) = (graph.get_full(a), graph.contains_key(b)) else {
        return false;
    };
    if a == b {
        return true;
    }

    let mut visited: IndexSet<&str> = IndexSet::new();
    let mut queue = VecDeque::new();
    visited.insert(a);
    queue.push_back(start);

    while let Some(i) = queue.pop_front() {
        let Some((_, neighbours)) = graph.get_index(i) else {
            continue;
        };
        for n in neighbours {
            if n.as_str() == b {
                return true;
            }
            if visited.insert(n.as_str()) {
                if let Some(j) = graph.get_index_of(n.as_str()) {
                    queue.push_back(j);
                }
            }
        }
    }
    false
}

/// Number of neighbours of `object_id`; 0 for unknown ids.
pub fn get_object_degree(graph: &StructuralGraph, object_id: &str) -> usize {
    graph.get(object_id).map_or(0, IndexSet::len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cella_core::footprint;
    use cella_test_utils::{grid_with, single, wall_line};
    use proptest::prelude::*;

    fn three_walls() -> GridState {
        grid_with(&[
            ("wall_01", single(0, 0, 0)),
            ("wall_02", single(1, 0, 0)),
            ("wall_03", single(2, 0, 0)),
        ])
    }

    #[test]
    fn chain_of_three() {
        let g = build_structural_graph(&three_walls());
        assert!(g["wall_01"].contains("wall_02"));
        assert!(g["wall_02"].contains("wall_01"));
        assert!(g["wall_02"].contains("wall_03"));
        assert!(!g["wall_01"].contains("wall_03"));

        let stats = get_graph_stats(&g);
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.isolated_count, 0);
        assert_eq!(stats.max_degree, 2);
        assert_eq!(stats.min_degree, 1);
        assert!((stats.avg_degree - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn diagonal_and_vertical_contact_ignored() {
        let grid = grid_with(&[
            ("a", single(0, 0, 0)),
            ("b", single(1, 1, 0)),
            ("c", single(0, 0, 1)),
        ]);
        let g = build_structural_graph(&grid);
        assert_eq!(g.len(), 3);
        assert!(g.values().all(IndexSet::is_empty));
        assert_eq!(get_graph_stats(&g).isolated_count, 3);
    }

    #[test]
    fn multi_cell_objects_share_one_edge() {
        let grid = grid_with(&[("a", wall_line(0, 0, 0, 4)), ("b", wall_line(0, 1, 0, 4))]);
        let g = build_structural_graph(&grid);
        assert_eq!(get_object_degree(&g, "a"), 1);
        assert_eq!(get_graph_stats(&g).edge_count, 1);
    }

    #[test]
    fn components_include_isolated_nodes() {
        let grid = grid_with(&[
            ("a", single(0, 0, 0)),
            ("b", single(1, 0, 0)),
            ("lonely", single(9, 9, 0)),
        ]);
        let comps = find_connected_components(&build_structural_graph(&grid));
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].len(), 2);
        assert!(comps[1].contains("lonely"));
    }

    #[test]
    fn neighbour_queries() {
        let g = build_structural_graph(&three_walls());
        assert_eq!(find_neighbors(&g, "wall_02").len(), 2);
        assert!(find_neighbors(&g, "ghost").is_empty());
        assert_eq!(get_object_degree(&g, "ghost"), 0);
    }

    #[test]
    fn connectivity() {
        let grid = grid_with(&[
            ("wall_01", single(0, 0, 0)),
            ("wall_02", single(1, 0, 0)),
            ("wall_03", single(2, 0, 0)),
            ("far", single(8, 8, 0)),
        ]);
        let g = build_structural_graph(&grid);
        assert!(is_connected(&g, "wall_01", "wall_03"));
        assert!(is_connected(&g, "wall_03", "wall_01"));
        assert!(!is_connected(&g, "wall_01", "far"));
        assert!(is_connected(&g, "far", "far"));
        assert!(!is_connected(&g, "ghost", "ghost"));
        assert!(!is_connected(&g, "wall_01", "ghost"));
    }

    #[test]
    fn empty_graph_stats() {
        let g = build_structural_graph(&GridState::empty());
        assert_eq!(get_graph_stats(&g), GraphStats::default());
        assert!(find_connected_components(&g).is_empty());
    }

    fn arb_grid() -> impl Strategy<Value = GridState> {
        prop::collection::vec(((0i32..5, 0i32..5, 0i32..2), 0u8..5), 0..20).prop_map(|pairs| {
            grid_with(
                &pairs
                    .iter()
                    .map(|&(c, id)| (["a", "b", "c", "d", "e"][id as usize], footprint([c])))
                    .collect::<Vec<_>>(),
            )
        })
    }

    proptest! {
        #[test]
        fn graph_is_symmetric(grid in arb_grid()) {
            let g = build_structural_graph(&grid);
            prop_assert_eq!(g.len(), grid.object_ids().len());
            for (a, ns) in &g {
                prop_assert!(!ns.contains(a));
                for b in ns {
                    prop_assert!(g[b].contains(a));
                }
            }
        }

        #[test]
        fn components_partition_nodes(grid in arb_grid()) {
            let g = build_structural_graph(&grid);
            let comps = find_connected_components(&g);
            let total: usize = comps.iter().map(IndexSet::len).sum();
            prop_assert_eq!(total, g.len());
            for comp in &comps {
                let first = comp[0].as_str();
                for other in comp {
                    prop_assert!(is_connected(&g, first, other.as_str()));
                }
            }
        }
    }
}
