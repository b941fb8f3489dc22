//! Results persistence: cluster dumps and run summaries

use std::fs::File;
use std::io::Write;
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::cluster::Clustering;
use crate::error::Result;

/// Per-level statistics of a hierarchical clustering run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelStats {
    /// Hierarchy level, 0 for the input graph.
    pub level: usize,

    /// Nodes in this level's graph.
    pub num_nodes: usize,

    /// Edges in this level's graph.
    pub num_edges: usize,

    /// Clusters found at this level.
    pub num_clusters: usize,

    /// Size of the largest cluster.
    pub max_cluster_size: usize,

    /// Modularity of the clustering over this level's graph.
    pub modularity: f64,
}

/// Write one hierarchy level of a clustering in the cluster-dump format:
///
/// ```text
/// == Clustering Level <level> ==
/// Cluster:<label> <node> <node> ...
/// <blank line>
/// ```
///
/// Clusters appear in ascending label order, nodes in ascending order
/// within each cluster.
pub fn write_clustering<W: Write>(
    level: usize,
    clustering: &Clustering,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "== Clustering Level {level} ==")?;

    for (label, nodes) in clustering.clusters().iter() {
        writeln!(out, "Cluster:{label} {}", nodes.iter().format(" "))?;
    }

    // Blank line separates levels.
    writeln!(out)?;
    Ok(())
}

/// Save per-level statistics as pretty-printed JSON.
pub fn save_summary<P: AsRef<Path>>(stats: &[LevelStats], path: P) -> Result<()> {
    log::info!("Saving summary for {} levels", stats.len());

    let mut file = File::create(path)?;
    let body = serde_json::to_string_pretty(stats)?;
    file.write_all(body.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_format() {
        let mut clustering = Clustering::new();
        for &(node, label) in &[(3, 1), (1, 1), (2, 1), (6, 4), (5, 4), (4, 4)] {
            clustering.set_label(node, label);
        }

        let mut out = Vec::new();
        write_clustering(2, &clustering, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "== Clustering Level 2 ==\n\
             Cluster:1 1 2 3\n\
             Cluster:4 4 5 6\n\
             \n"
        );
    }

    #[test]
    fn test_dump_of_empty_clustering_has_header_only() {
        let clustering = Clustering::new();
        let mut out = Vec::new();
        write_clustering(0, &clustering, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "== Clustering Level 0 ==\n\n");
    }
}
