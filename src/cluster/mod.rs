//! Clustering module: partitions, the Chinese Whispers algorithm,
//! coarsening, and quality/comparison metrics

pub mod whispers;
pub mod hierarchy;
pub mod metrics;

use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use crate::graph::Node;

/// Cluster label. Labels are node identifiers promoted to cluster names,
/// so a label is a valid node of the coarsened graph.
pub type Label = Node;

/// A partition of a node set into labeled clusters.
///
/// The primary state is the node → label map. The label → members view is
/// derived lazily: every relabel drops the cached view, and the next read
/// rebuilds it. Values are held by copy, so a `Clustering` outlives the
/// graph it was computed from.
#[derive(Debug, Clone, Default)]
pub struct Clustering {
    labels: BTreeMap<Node, Label>,
    // None means stale; rebuilt on the next clusters() call.
    clusters: RefCell<Option<BTreeMap<Label, BTreeSet<Node>>>>,
}

impl Clustering {
    /// Create an empty clustering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a label to a node, invalidating the derived cluster view.
    pub fn set_label(&mut self, node: Node, label: Label) {
        self.labels.insert(node, label);
        *self.clusters.get_mut() = None;
    }

    /// Label of a node, if it has been assigned one.
    pub fn label(&self, node: Node) -> Option<Label> {
        self.labels.get(&node).copied()
    }

    /// The node → label map, in ascending node order.
    pub fn labels(&self) -> &BTreeMap<Node, Label> {
        &self.labels
    }

    /// Clusters keyed by label, members in ascending node order.
    ///
    /// Rebuilds the cached view if a relabel made it stale.
    pub fn clusters(&self) -> Ref<'_, BTreeMap<Label, BTreeSet<Node>>> {
        // Only take the mutable borrow when the cache is actually stale,
        // so views already handed out stay valid.
        if self.clusters.borrow().is_none() {
            let mut grouped: BTreeMap<Label, BTreeSet<Node>> = BTreeMap::new();
            for (&node, &label) in &self.labels {
                grouped.entry(label).or_default().insert(node);
            }
            *self.clusters.borrow_mut() = Some(grouped);
        }
        Ref::map(self.clusters.borrow(), |cache| {
            cache.as_ref().expect("cluster cache populated above")
        })
    }

    /// Number of labeled nodes.
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Number of distinct labels in use.
    pub fn num_clusters(&self) -> usize {
        self.clusters().len()
    }

    /// Size of the largest cluster, 0 for an empty clustering.
    pub fn max_cluster_size(&self) -> usize {
        self.clusters()
            .values()
            .map(|members| members.len())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_view_groups_by_label() {
        let mut clustering = Clustering::new();
        clustering.set_label(1, 10);
        clustering.set_label(2, 10);
        clustering.set_label(3, 30);

        let clusters = clustering.clusters();
        assert_eq!(clusters.len(), 2);
        assert_eq!(
            clusters.get(&10).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(clusters.get(&30).unwrap().len(), 1);
    }

    #[test]
    fn test_relabel_invalidates_cached_view() {
        let mut clustering = Clustering::new();
        clustering.set_label(1, 10);
        clustering.set_label(2, 20);
        assert_eq!(clustering.num_clusters(), 2);

        clustering.set_label(2, 10);
        assert_eq!(clustering.num_clusters(), 1);
        assert_eq!(clustering.max_cluster_size(), 2);
        assert!(clustering.clusters().get(&20).is_none());
    }

    #[test]
    fn test_counts() {
        let mut clustering = Clustering::new();
        for node in 0..5 {
            clustering.set_label(node, node % 2);
        }
        assert_eq!(clustering.num_nodes(), 5);
        assert_eq!(clustering.num_clusters(), 2);
        assert_eq!(clustering.max_cluster_size(), 3);
        assert_eq!(clustering.label(3), Some(1));
        assert_eq!(clustering.label(9), None);
    }
}
