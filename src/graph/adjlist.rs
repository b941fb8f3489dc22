//! Adjacency-list file loading
//!
//! One line per source node: the first token is the source, every
//! following token is a neighbor. Lines starting with `#` are comments.
//! Every pair becomes one unweighted undirected edge.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::graph::{Node, WeightedGraph};

/// Load a graph from an adjacency-list file.
///
/// Fails with `NotFound` if the file cannot be opened and with `Format`
/// on the first malformed node token.
pub fn load_from_adj_list<P: AsRef<Path>>(path: P) -> Result<WeightedGraph> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::NotFound(format!("{}: {e}", path.display())))?;
    load_from_reader(BufReader::new(file))
}

/// Load a graph from any buffered reader of adjacency-list text.
pub fn load_from_reader<R: BufRead>(reader: R) -> Result<WeightedGraph> {
    let mut graph = WeightedGraph::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        // First token is the source node, the rest are its neighbors.
        let source = match tokens.next() {
            Some(token) => parse_node(token, line_number)?,
            None => continue,
        };
        for token in tokens {
            let neighbor = parse_node(token, line_number)?;
            graph.add_edge(source, neighbor, 1.0);
        }
    }

    Ok(graph)
}

fn parse_node(token: &str, line: usize) -> Result<Node> {
    token.parse::<Node>().map_err(|_| Error::Format {
        line,
        message: format!("invalid node identifier '{token}'"),
    })
}
