//! Undirected weighted graph built on ordered maps
//!
//! Nodes are integers, weights are doubles. The graph cannot represent a
//! node with degree 0: only nodes with at least one incident edge exist.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Node identifier. Labels of a clustering share this type, so the nodes
/// of a coarsened graph are the labels of the previous level.
pub type Node = i64;

/// Undirected weighted graph.
///
/// Adjacency is stored symmetrically: an edge `{a, b}` appears under both
/// endpoints with the same weight. `BTreeMap` keeps node and neighbor
/// iteration in ascending order, which downstream code relies on as the
/// canonical deterministic order.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    num_edges: usize,
    edges: BTreeMap<Node, BTreeMap<Node, f64>>,
}

impl WeightedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an undirected edge, accumulating weight on repeats.
    ///
    /// There is at most one stored edge between any two nodes; adding the
    /// same pair again sums the weights into that edge.
    ///
    /// Caveat: the undirected edge counter is incremented once per call,
    /// not once per distinct pair. `num_edges()` therefore counts
    /// edge-insertion operations. Callers that want an accurate distinct
    /// count must not add the same logical edge twice.
    pub fn add_edge(&mut self, node_a: Node, node_b: Node, weight: f64) {
        self.add_directed_edge(node_a, node_b, weight);
        self.add_directed_edge(node_b, node_a, weight);
        self.num_edges += 1;
    }

    fn add_directed_edge(&mut self, start: Node, end: Node, weight: f64) {
        *self
            .edges
            .entry(start)
            .or_default()
            .entry(end)
            .or_insert(0.0) += weight;
    }

    /// Check whether an edge exists between two nodes.
    pub fn has_edge(&self, node_a: Node, node_b: Node) -> bool {
        self.edges
            .get(&node_a)
            .map_or(false, |neighbors| neighbors.contains_key(&node_b))
    }

    /// Neighbors of a node with their edge weights, in ascending node order.
    pub fn neighbors(&self, node: Node) -> Result<&BTreeMap<Node, f64>> {
        self.edges
            .get(&node)
            .ok_or_else(|| Error::NotFound(format!("node {node} has no edges")))
    }

    /// Number of distinct neighbors (not the weighted degree).
    pub fn degree(&self, node: Node) -> Result<usize> {
        Ok(self.neighbors(node)?.len())
    }

    /// Snapshot of all nodes, in ascending order.
    pub fn nodes(&self) -> Vec<Node> {
        self.edges.keys().copied().collect()
    }

    /// Full adjacency view.
    pub fn edges(&self) -> &BTreeMap<Node, BTreeMap<Node, f64>> {
        &self.edges
    }

    /// Number of nodes with at least one edge.
    pub fn num_nodes(&self) -> usize {
        self.edges.len()
    }

    /// Number of undirected edge insertions (see `add_edge` caveat).
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut graph = WeightedGraph::new();
        graph.add_edge(1, 2, 3.5);

        assert_eq!(graph.neighbors(1).unwrap().get(&2), Some(&3.5));
        assert_eq!(graph.neighbors(2).unwrap().get(&1), Some(&3.5));
    }

    #[test]
    fn test_repeated_edges_accumulate_weight() {
        let mut graph = WeightedGraph::new();
        graph.add_edge(1, 2, 1.0);
        graph.add_edge(2, 1, 2.0);

        // One stored edge holding the summed weight, in both directions.
        assert_eq!(graph.neighbors(1).unwrap().get(&2), Some(&3.0));
        assert_eq!(graph.neighbors(2).unwrap().get(&1), Some(&3.0));
        assert_eq!(graph.degree(1).unwrap(), 1);
        // The counter tracks insertion calls, not distinct pairs.
        assert_eq!(graph.num_edges(), 2);
    }

    #[test]
    fn test_missing_node_is_not_found() {
        let graph = WeightedGraph::new();
        assert!(matches!(graph.neighbors(7), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_counts_and_node_order() {
        let mut graph = WeightedGraph::new();
        graph.add_edge(3, 1, 1.0);
        graph.add_edge(2, 3, 1.0);

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.nodes(), vec![1, 2, 3]);
        assert_eq!(graph.degree(3).unwrap(), 2);
        assert!(graph.has_edge(1, 3));
        assert!(!graph.has_edge(1, 2));
    }
}
