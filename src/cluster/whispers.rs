//! Chinese Whispers label propagation
//!
//! Greedy community detection: each node repeatedly adopts the label that
//! carries the most edge weight among its neighbors.
//! https://en.wikipedia.org/wiki/Chinese_Whispers_(clustering_method)

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::cluster::{Clustering, Label};
use crate::error::{Error, Result};
use crate::graph::WeightedGraph;

/// Chinese Whispers clusterer.
///
/// Runs a fixed number of rounds; there is no convergence detection or
/// early stopping, the iteration count is the only cost control.
#[derive(Debug, Clone)]
pub struct ChineseWhispers {
    /// Number of label-propagation rounds.
    iterations: usize,
    /// Random seed for the per-round node shuffles.
    seed: Option<u64>,
}

impl ChineseWhispers {
    /// Create a clusterer running the given number of rounds.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            seed: None,
        }
    }

    /// Set a fixed random seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cluster the graph.
    ///
    /// Every node starts labeled with itself. Each round visits the nodes
    /// in a fresh random order and relabels each node immediately, so a new
    /// label is visible to nodes visited later in the same round.
    pub fn cluster(&self, graph: &WeightedGraph) -> Result<Clustering> {
        // One RNG per run: rounds stay correlated to a single run while
        // separate runs vary (unless seeded).
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut nodes = graph.nodes();
        let mut clustering = Clustering::new();
        for &node in &nodes {
            clustering.set_label(node, node);
        }

        for round in 0..self.iterations {
            nodes.shuffle(&mut rng);

            for &node in &nodes {
                // Accumulate edge weight per neighbor label.
                let mut counts: BTreeMap<Label, f64> = BTreeMap::new();
                for (&neighbor, &weight) in graph.neighbors(node)? {
                    let label = clustering.label(neighbor).unwrap_or(neighbor);
                    *counts.entry(label).or_insert(0.0) += weight;
                }

                // Ties go to the first label in ascending order. The
                // textbook algorithm picks randomly among ties; this
                // deterministic rule is a deliberate simplification.
                let (best_label, _) = arg_max(&counts)?;
                clustering.set_label(node, best_label);
            }

            log::debug!(
                "CW[{round}] clusters={} max_cluster_size={}",
                clustering.num_clusters(),
                clustering.max_cluster_size()
            );
        }

        Ok(clustering)
    }
}

/// Key and value of the maximum value in an ordered map.
///
/// With more than one maximum, the first key in map order wins.
fn arg_max<K: Copy + Ord, V: Copy + PartialOrd>(map: &BTreeMap<K, V>) -> Result<(K, V)> {
    let mut best: Option<(K, V)> = None;
    for (&key, &value) in map {
        match best {
            Some((_, max)) if value <= max => {}
            _ => best = Some((key, value)),
        }
    }
    best.ok_or(Error::EmptyInput("arg_max over empty map"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{hierarchy, metrics};

    fn two_triangles() -> WeightedGraph {
        let mut graph = WeightedGraph::new();
        for &(a, b) in &[(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4)] {
            graph.add_edge(a, b, 1.0);
        }
        graph
    }

    #[test]
    fn test_zero_iterations_is_identity_labeling() {
        let graph = two_triangles();
        let clustering = ChineseWhispers::new(0).cluster(&graph).unwrap();

        assert_eq!(clustering.num_nodes(), 6);
        for node in graph.nodes() {
            assert_eq!(clustering.label(node), Some(node));
        }
    }

    #[test]
    fn test_disjoint_triangles_form_two_clusters() {
        let graph = two_triangles();
        for seed in 0..10 {
            let clustering = ChineseWhispers::new(5)
                .with_seed(seed)
                .cluster(&graph)
                .unwrap();

            // Labels cannot cross the disconnected components.
            assert_eq!(clustering.num_clusters(), 2);
            assert_eq!(clustering.label(1), clustering.label(2));
            assert_eq!(clustering.label(2), clustering.label(3));
            assert_eq!(clustering.label(4), clustering.label(5));
            assert_eq!(clustering.label(5), clustering.label(6));
            assert_ne!(clustering.label(1), clustering.label(4));

            // Two complete triangles: the regression target is Q = 0.5.
            let q = metrics::modularity(&graph, &clustering).unwrap();
            assert!((q - 0.5).abs() < 1e-12);

            // Both components collapse, leaving nothing to coarsen.
            let coarse = hierarchy::coarsen(&graph, &clustering).unwrap();
            assert_eq!(coarse.num_edges(), 0);
        }
    }

    #[test]
    fn test_arg_max_tie_breaks_to_first_key() {
        let mut counts = BTreeMap::new();
        counts.insert(7, 2.0);
        counts.insert(3, 2.0);
        counts.insert(5, 1.0);

        let (label, weight) = arg_max(&counts).unwrap();
        assert_eq!(label, 3);
        assert_eq!(weight, 2.0);
    }

    #[test]
    fn test_arg_max_rejects_empty_map() {
        let counts: BTreeMap<i64, f64> = BTreeMap::new();
        assert!(matches!(arg_max(&counts), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_weighted_tally_prefers_heavier_label() {
        // Node 1 has a light edge to 2 and a heavy edge to 3, so after one
        // deterministic pass it must carry 3's cluster label.
        let mut graph = WeightedGraph::new();
        graph.add_edge(1, 2, 1.0);
        graph.add_edge(1, 3, 10.0);
        graph.add_edge(3, 4, 10.0);

        let clustering = ChineseWhispers::new(20)
            .with_seed(1)
            .cluster(&graph)
            .unwrap();
        assert_eq!(clustering.label(1), clustering.label(3));
    }
}
