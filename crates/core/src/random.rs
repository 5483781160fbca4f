use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A randomness abstraction for deterministic shuffles and picks in services and tests.
#[derive(Clone, Default)]
pub enum RandomSource {
    /// Thread-local entropy.
    #[default]
    Default,
    /// Reproducible sequence from a seed, shared between clones.
    Seeded(Arc<Mutex<StdRng>>),
    /// No randomness: shuffles keep their input order and picks return the first item.
    Fixed,
}

impl RandomSource {
    /// Returns a source backed by thread-local entropy.
    #[must_use]
    pub fn default_source() -> Self {
        Self::Default
    }

    /// Returns a reproducible source for the given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))))
    }

    /// Returns a source that never reorders or picks anything but the first item.
    #[must_use]
    pub fn fixed() -> Self {
        Self::Fixed
    }

    /// Shuffle `items` in place.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        match self {
            Self::Default => items.shuffle(&mut rand::rng()),
            Self::Seeded(rng) => {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                items.shuffle(&mut *rng);
            }
            Self::Fixed => {}
        }
    }

    /// Pick a uniformly distributed index below `len`.
    ///
    /// Returns `None` when `len` is zero.
    #[must_use]
    pub fn index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let picked = match self {
            Self::Default => rand::rng().random_range(0..len),
            Self::Seeded(rng) => rng
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .random_range(0..len),
            Self::Fixed => 0,
        };
        Some(picked)
    }

    /// Pick one item uniformly at random.
    #[must_use]
    pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).and_then(|idx| items.get(idx))
    }

    /// Returns true if this source draws from real entropy.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("RandomSource::Default"),
            Self::Seeded(_) => f.write_str("RandomSource::Seeded"),
            Self::Fixed => f.write_str("RandomSource::Fixed"),
        }
    }
}
