//! Random number generation for dungeon building
//!
//! Wraps the seeded LCG from `dv-rng` with the handful of helpers the
//! generation stages need. Every stage draws from the one `GenRng` owned by
//! the pipeline, so the draw order alone determines the dungeon.

use dv_rng::Lcg;

/// Generator random number source
#[derive(Debug, Clone)]
pub struct GenRng {
    rng: Lcg,
}

impl GenRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { rng: Lcg::new(seed) }
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Float in [0, 1)
    pub fn random(&mut self) -> f64 {
        self.rng.random()
    }

    /// Integer in [0, max); returns 0 without drawing when max is 0
    pub fn rand_int(&mut self, max: usize) -> usize {
        let bound = u32::try_from(max).unwrap_or(u32::MAX);
        self.rng.rand_int(bound) as usize
    }

    /// Returns true with probability percent/100
    pub fn percent(&mut self, percent: u32) -> bool {
        self.rand_int(100) < percent as usize
    }

    /// Fair coin
    pub fn coin(&mut self) -> bool {
        self.rand_int(2) == 1
    }

    /// Fisher-Yates shuffle of a copy; the input is left untouched
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        for i in (1..out.len()).rev() {
            let j = self.rand_int(i + 1);
            out.swap(i, j);
        }
        out
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> u64 {
        self.rng.call_count()
    }

    /// Access the underlying generator (tracing, `rand` adapters)
    pub fn inner_mut(&mut self) -> &mut Lcg {
        &mut self.rng
    }
}
