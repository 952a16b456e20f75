/// Small deterministic generator used for every procedural choice.
///
/// Seeded explicitly so layouts and grain are reproducible under test.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed drawn from the thread-local OS-backed generator.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_01()
    }

    /// Uniform index in `0..n`; `n` must be non-zero.
    pub fn index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        ((self.next_f64_01() * n as f64) as usize).min(n.saturating_sub(1))
    }

    /// Derive an independent generator, leaving `self` advanced by one step.
    pub fn fork(&mut self) -> Self {
        Self::new(self.next_u64() ^ 0xD6E8_FEB8_6659_FD93)
    }
}
