//! Seeded linear-congruential random number generator
//!
//! Every dungeon is reproducible from a single integer seed, so the
//! generator draws from a plain 64-bit LCG instead of an OS-seeded source.
//! The recurrence wraps on overflow and never fails.

use serde::{Deserialize, Serialize};

/// Multiplier of the recurrence (Knuth, MMIX)
const LCG_MUL: u64 = 6364136223846793005;
/// Increment of the recurrence (Knuth, MMIX)
const LCG_INC: u64 = 1442695040888963407;

/// Scale for turning the top 53 bits of the state into an `f64` in [0, 1)
const F64_SCALE: f64 = (1u64 << 53) as f64;

/// A draw recorded while tracing is enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RngTraceEntry {
    /// Sequence number (0-indexed)
    pub seq: u64,
    /// Function name (e.g. "random", "rand_int")
    pub func: &'static str,
    /// Argument (the exclusive bound for `rand_int`, 0 otherwise)
    pub arg: u64,
    /// Result value (`random` results are stored as raw bits)
    pub result: u64,
    /// State after the step
    pub raw: u64,
}

/// Linear-congruential generator state
#[derive(Clone, Serialize, Deserialize)]
pub struct Lcg {
    /// Seed the generator was created with
    seed: u64,
    /// Current state
    state: u64,
    /// Total number of steps taken
    call_count: u64,
    /// If true, record all draws into the trace log
    #[serde(skip)]
    tracing: bool,
    /// Trace log (only populated when tracing is true)
    #[serde(skip)]
    trace: Vec<RngTraceEntry>,
}

impl core::fmt::Debug for Lcg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Lcg")
            .field("seed", &self.seed)
            .field("state", &self.state)
            .field("call_count", &self.call_count)
            .finish()
    }
}

impl Lcg {
    /// Create a generator seeded with a u64 value.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            state: seed,
            call_count: 0,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Seed the generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance the recurrence and return the new state
    #[inline]
    pub fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.call_count += 1;
        self.state
    }

    /// Returns a float in [0, 1)
    pub fn random(&mut self) -> f64 {
        let raw = self.step();
        let res = (raw >> 11) as f64 / F64_SCALE;
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count - 1,
                func: "random",
                arg: 0,
                result: res.to_bits(),
                raw,
            });
        }
        res
    }

    /// Returns an integer in [0, max); 0 when max is 0
    pub fn rand_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        let raw = self.step();
        let unit = (raw >> 11) as f64 / F64_SCALE;
        let res = ((unit * max as f64) as u32).min(max - 1);
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count - 1,
                func: "rand_int",
                arg: max as u64,
                result: res as u64,
                raw,
            });
        }
        res
    }

    /// Enable draw tracing (clears any previous trace)
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
    }

    /// Disable draw tracing
    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    /// Recorded draws since tracing was enabled
    pub fn trace(&self) -> &[RngTraceEntry] {
        &self.trace
    }

    /// Total number of recurrence steps
    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(0)
    }
}

impl rand::RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl rand::SeedableRng for Lcg {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
