use rand::{rngs::StdRng, seq::SliceRandom, RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// One-in-`sides` roll.
    pub fn roll(&mut self, sides: u64) -> bool {
        sides > 0 && self.next_u64() % sides == 0
    }

    /// Uniform index into a non-empty slice of length `len`.
    pub fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}
