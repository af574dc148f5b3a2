//! Runtime configuration

use std::path::PathBuf;

/// Configuration for one sorting run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose non-directory entries are processed
    pub input_dir: PathBuf,

    /// Output root the month directories are created under
    pub output_dir: PathBuf,

    /// Number of worker threads (0 = one per logical CPU)
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::new(),
            threads: 0,
        }
    }
}

impl Config {
    /// Worker count the pool is actually started with
    pub fn worker_count(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.threads
        }
    }

    /// Capacity of the shared task channel. Keeps the dispatcher a
    /// little ahead of the workers without buffering the whole listing.
    pub fn queue_capacity(&self) -> usize {
        self.worker_count() * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_count_auto() {
        let config = Config::default();
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn test_worker_count_explicit() {
        let config = Config {
            threads: 3,
            ..Config::default()
        };
        assert_eq!(config.worker_count(), 3);
        assert_eq!(config.queue_capacity(), 6);
    }
}
