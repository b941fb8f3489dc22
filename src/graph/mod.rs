//! Graph representation and loading module

pub mod weighted;
pub mod adjlist;

pub use weighted::{Node, WeightedGraph};
