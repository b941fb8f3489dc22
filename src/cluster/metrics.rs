//! Clustering quality and comparison metrics
//!
//! Pure read-only functions over one or two clusterings. The comparison
//! functions only verify that the two clusterings cover the same *number*
//! of nodes; they do not check that the node sets are identical. This is a
//! known gap, kept deliberately.

use crate::cluster::Clustering;
use crate::error::{Error, Result};
use crate::graph::{Node, WeightedGraph};

/// Modularity Q of a clustering over its originating graph.
/// https://en.wikipedia.org/wiki/Modularity_(networks)
///
/// Uses unweighted degrees and unweighted edge presence even when the
/// graph carries real weights, and counts an intra-cluster edge once per
/// endpoint visited. Both are simplifications of the weighted formula,
/// kept because callers depend on the resulting scale.
pub fn modularity(graph: &WeightedGraph, clustering: &Clustering) -> Result<f64> {
    // Q = 1/(2m) * sum_vw (A_vw - k_v k_w / (2m)) delta(c_v, c_w)
    let m2 = 2.0 * graph.num_edges() as f64;
    let mut q = 0.0;

    for nodes in clustering.clusters().values() {
        let mut sum_deg = 0.0;
        for &node in nodes {
            sum_deg += graph.degree(node)? as f64;
            for neighbor in graph.neighbors(node)?.keys() {
                if nodes.contains(neighbor) {
                    q += 1.0;
                }
            }
        }
        // sum_vw k_v k_w over the cluster collapses to sum_deg^2.
        q -= sum_deg * sum_deg / m2;
    }

    Ok(q / m2)
}

/// Entropy of a clustering in bits: H = -sum p_c log2(p_c).
pub fn entropy(clustering: &Clustering) -> f64 {
    let num_nodes = clustering.num_nodes() as f64;
    let mut entropy = 0.0;
    for nodes in clustering.clusters().values() {
        // Probability of randomly picking a node in this cluster.
        let p = nodes.len() as f64 / num_nodes;
        entropy -= p * p.log2();
    }
    entropy
}

/// Mutual information between two clusterings of the same node set, in bits.
/// https://en.wikipedia.org/wiki/Adjusted_mutual_information
///
/// Only label pairs that actually co-occur are visited, so zero-probability
/// terms are never evaluated.
pub fn mutual_information(clustering1: &Clustering, clustering2: &Clustering) -> Result<f64> {
    check_compatible(clustering1, clustering2)?;

    let num_nodes = clustering1.num_nodes() as f64;
    let clusters2 = clustering2.clusters();
    let mut information = 0.0;

    for nodes1 in clustering1.clusters().values() {
        let p1 = nodes1.len() as f64 / num_nodes;
        let sub = restrict_to(clustering2, nodes1.iter().copied())?;

        for (label2, intersection) in sub.clusters().iter() {
            // Probability of label2 across the *entire* second clustering.
            let p2 = clusters2.get(label2).map_or(0.0, |s| s.len() as f64) / num_nodes;
            let p12 = intersection.len() as f64 / num_nodes;
            information += p12 * (p12 / (p1 * p2)).log2();
        }
    }

    Ok(information)
}

/// P(two nodes share a cluster in `clustering2` | they share one in
/// `clustering1`).
///
/// Not symmetric: evaluate both directions when a symmetric score is
/// needed. The largest single-label overlap fraction is logged at debug
/// level as a side diagnostic.
pub fn conditional_probability_similarity(
    clustering1: &Clustering,
    clustering2: &Clustering,
) -> Result<f64> {
    check_compatible(clustering1, clustering2)?;

    let num_nodes = clustering1.num_nodes() as f64;
    // P(X~Y in clustering1 & X~Y in clustering2)
    let mut sim12 = 0.0;
    // P(X~Y in clustering1)
    let mut sim1 = 0.0;
    let mut overlap = 0.0;

    for nodes1 in clustering1.clusters().values() {
        let p1 = nodes1.len() as f64 / num_nodes;
        sim1 += p1 * p1;

        let sub = restrict_to(clustering2, nodes1.iter().copied())?;
        let mut max_size = 0usize;
        for intersection in sub.clusters().values() {
            let p12 = intersection.len() as f64 / num_nodes;
            sim12 += p12 * p12;
            max_size = max_size.max(intersection.len());
        }
        overlap += max_size as f64;
    }

    log::debug!("largest-label overlap fraction: {}", overlap / num_nodes);
    Ok(sim12 / sim1)
}

/// Node-count compatibility proxy check (does not compare the sets).
fn check_compatible(clustering1: &Clustering, clustering2: &Clustering) -> Result<()> {
    if clustering1.num_nodes() != clustering2.num_nodes() {
        return Err(Error::IncompatibleInput {
            left: clustering1.num_nodes(),
            right: clustering2.num_nodes(),
        });
    }
    Ok(())
}

/// Sub-clustering of `clustering` over just the given nodes.
fn restrict_to(
    clustering: &Clustering,
    nodes: impl Iterator<Item = Node>,
) -> Result<Clustering> {
    let mut sub = Clustering::new();
    for node in nodes {
        let label = clustering
            .label(node)
            .ok_or_else(|| Error::NotFound(format!("node {node} has no cluster label")))?;
        sub.set_label(node, label);
    }
    Ok(sub)
}
