//! Configuration for clustering runs

/// Default configuration for a Chinese Whispers clustering run
pub struct Config {
    /// Number of label-propagation rounds per clustering
    pub iterations: usize,

    /// Random seed; `None` seeds from entropy so runs vary
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: 20,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(iterations: usize, seed: Option<u64>) -> Self {
        Self { iterations, seed }
    }
}
