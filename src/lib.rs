//! Core library for hierarchical Chinese Whispers graph clustering

pub mod config;
pub mod error;
pub mod graph;
pub mod cluster;
pub mod storage;

pub use error::{Error, Result};
pub use graph::{Node, WeightedGraph};
