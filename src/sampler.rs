//! Epoch ordering of sample indices.
//!
//! Seeding happens here, explicitly, from [`DatasetConfig::seed`]. Nothing in
//! the crate touches a process-wide random state.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::DatasetConfig;

/// Produces the order in which a training loop visits samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSampler {
    len: usize,
    seed: Option<u64>,
}

impl IndexSampler {
    /// Visit `0..len` in order every epoch.
    pub fn sequential(len: usize) -> Self {
        Self { len, seed: None }
    }

    /// Visit `0..len` in a reproducible shuffled order per epoch.
    pub fn shuffled(len: usize, seed: u64) -> Self {
        Self {
            len,
            seed: Some(seed),
        }
    }

    /// Sampler following the config's `shuffle` and `seed` settings.
    pub fn from_config(config: &DatasetConfig, len: usize) -> Self {
        if config.shuffle {
            Self::shuffled(len, config.seed)
        } else {
            Self::sequential(len)
        }
    }

    /// Number of indices per epoch.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there is nothing to sample.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the order changes between epochs.
    pub fn is_shuffled(&self) -> bool {
        self.seed.is_some()
    }

    /// Sample order for the given epoch.
    ///
    /// Shuffled epochs seed a fresh `StdRng` with `seed + epoch`, so the same
    /// epoch always yields the same order.
    pub fn epoch(&self, epoch: u64) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.len).collect();
        if let Some(seed) = self.seed {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(epoch));
            indices.shuffle(&mut rng);
            log::trace!("Shuffled {} indices for epoch {}", self.len, epoch);
        }
        indices
    }
}
