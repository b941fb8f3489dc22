//! Graph coarsening: collapse each cluster into a single node

use crate::cluster::{Clustering, Label};
use crate::error::{Error, Result};
use crate::graph::{Node, WeightedGraph};

/// Build the coarsened graph of a clustering.
///
/// Every node of the result is a cluster label of `clustering`, and each
/// edge weight is the summed weight of the inter-cluster edges between the
/// two clusters in `graph`. Intra-cluster edges are dropped, so the result
/// never contains a self-loop.
///
/// Hierarchical clustering loops cluster → coarsen until the coarsened
/// graph has no edges left.
pub fn coarsen(graph: &WeightedGraph, clustering: &Clustering) -> Result<WeightedGraph> {
    let mut coarse = WeightedGraph::new();

    for (&start_node, neighbors) in graph.edges() {
        let start_cluster = label_of(clustering, start_node)?;
        for (&end_node, &weight) in neighbors {
            // Each undirected edge is stored twice; visit it once.
            if end_node < start_node {
                let end_cluster = label_of(clustering, end_node)?;
                if start_cluster != end_cluster {
                    coarse.add_edge(start_cluster, end_cluster, weight);
                }
            }
        }
    }

    Ok(coarse)
}

fn label_of(clustering: &Clustering, node: Node) -> Result<Label> {
    clustering
        .label(node)
        .ok_or_else(|| Error::NotFound(format!("node {node} has no cluster label")))
}
