use std::fs::File;
use std::io::BufWriter;

use anyhow::Result;
use clap::Parser;

mod config;
mod error;
mod graph;
mod cluster;
mod storage;

use cluster::whispers::ChineseWhispers;
use cluster::{hierarchy, metrics, Clustering};
use config::Config;
use graph::WeightedGraph;
use storage::LevelStats;

#[derive(Parser, Debug)]
#[clap(
    name = "graph-whispers",
    about = "Hierarchical Chinese Whispers clustering of large graphs"
)]
struct Cli {
    /// Path to input adjacency-list file
    #[clap(long)]
    input: String,

    /// Output file for cluster dumps
    #[clap(long, default_value = "clusters.txt")]
    output: String,

    /// Label-propagation rounds per clustering
    #[clap(long, default_value = "20")]
    iterations: usize,

    /// Random seed (omit for a fresh seed per run)
    #[clap(long)]
    seed: Option<u64>,

    /// Optional path for a JSON per-level summary
    #[clap(long)]
    summary: Option<String>,

    /// Compare two independent clusterings instead of building a hierarchy
    #[clap(long)]
    compare: bool,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config::new(args.iterations, args.seed);

    log::info!("Loading graph from {}", args.input);
    let graph = graph::adjlist::load_from_adj_list(&args.input)?;
    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.num_nodes(),
        graph.num_edges()
    );

    if args.compare {
        compare_clusterings(&graph, &config)?;
    } else {
        let stats = cluster_hierarchy(graph, &config, &args.output)?;
        if let Some(path) = &args.summary {
            storage::save_summary(&stats, path)?;
        }
    }

    log::info!("Done");
    Ok(())
}

/// Cluster, coarsen, and repeat until the coarsened graph has no edges.
fn cluster_hierarchy(
    mut graph: WeightedGraph,
    config: &Config,
    output: &str,
) -> Result<Vec<LevelStats>> {
    let mut out = BufWriter::new(File::create(output)?);
    let mut stats = Vec::new();

    for level in 0.. {
        log::info!(
            "Level {level}: clustering {} nodes, {} edges",
            graph.num_nodes(),
            graph.num_edges()
        );
        let clustering = clusterer(config, level).cluster(&graph)?;
        let modularity = metrics::modularity(&graph, &clustering)?;
        log::info!(
            "Level {level}: {} clusters, max size {}, modularity {modularity:.4}",
            clustering.num_clusters(),
            clustering.max_cluster_size()
        );

        stats.push(LevelStats {
            level,
            num_nodes: graph.num_nodes(),
            num_edges: graph.num_edges(),
            num_clusters: clustering.num_clusters(),
            max_cluster_size: clustering.max_cluster_size(),
            modularity,
        });
        storage::write_clustering(level, &clustering, &mut out)?;

        if clustering.num_clusters() == graph.num_nodes() {
            // No node changed cluster; coarsening would reproduce the
            // same graph forever.
            log::warn!("Level {level}: clustering did not collapse any nodes, stopping");
            break;
        }
        let coarse = hierarchy::coarsen(&graph, &clustering)?;
        if coarse.num_edges() == 0 {
            // Either one giant cluster or isolated singletons; the
            // hierarchy cannot shrink any further.
            break;
        }
        graph = coarse;
    }

    Ok(stats)
}

/// Run two independent clusterings of the same graph and report how much
/// they agree.
fn compare_clusterings(graph: &WeightedGraph, config: &Config) -> Result<()> {
    let mut clusterings: Vec<Clustering> = Vec::with_capacity(2);
    for run in 0..2 {
        log::info!("Computing clustering {run}");
        let clustering = clusterer(config, run).cluster(graph)?;
        log::info!(
            "Clustering {run}: {} clusters, entropy {:.4} bits",
            clustering.num_clusters(),
            metrics::entropy(&clustering)
        );
        clusterings.push(clustering);
    }

    println!(
        "Mutual information: {:.6}",
        metrics::mutual_information(&clusterings[0], &clusterings[1])?
    );
    println!(
        "Conditional probabilities: {:.6} {:.6} {:.6} {:.6}",
        metrics::conditional_probability_similarity(&clusterings[0], &clusterings[1])?,
        metrics::conditional_probability_similarity(&clusterings[1], &clusterings[0])?,
        metrics::conditional_probability_similarity(&clusterings[0], &clusterings[0])?,
        metrics::conditional_probability_similarity(&clusterings[1], &clusterings[1])?,
    );

    Ok(())
}

/// Build a clusterer for one level or run, decorrelating seeded runs so
/// successive levels do not replay the same shuffles.
fn clusterer(config: &Config, run: usize) -> ChineseWhispers {
    let cw = ChineseWhispers::new(config.iterations);
    match config.seed {
        Some(seed) => cw.with_seed(seed.wrapping_add(run as u64)),
        None => cw,
    }
}
