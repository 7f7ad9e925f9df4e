/// MT19937 pseudo-random number generator

pub const N: usize = 624;
const M: usize = 397;
const W: u32 = 32;
const LOWER_MASK: u32 = 0xffffffff >> 1;
const UPPER_MASK: u32 = !LOWER_MASK;
const A: u32 = 0x9908b0df;
pub(crate) const U: u32 = 11;
pub(crate) const S: u32 = 7;
pub(crate) const T: u32 = 15;
pub(crate) const L: u32 = 18;
pub(crate) const B: u32 = 0x9d2c5680;
pub(crate) const C: u32 = 0xefc60000;
const F: u32 = 1812433253;
pub const DEFAULT_SEED: u32 = 5489;

/// The generator's state is only ever untempered words; tempering is applied
/// on output.
#[derive(Clone)]
pub struct Mt19937 {
    state: [u32; N],
    state_idx: usize,
    seeded: bool,
}

impl Mt19937 {
    pub fn new(seed: u32) -> Self {
        let mut rng = Self::unseeded();
        rng.seed(seed);
        rng
    }

    /// A generator that seeds itself with `DEFAULT_SEED` on first use.
    pub fn unseeded() -> Self {
        Self {
            state: [0; N],
            state_idx: N,
            seeded: false,
        }
    }

    /// Build a generator from raw (untempered) state words.
    ///
    /// The next call to `generate` twists the state, exactly as the original
    /// generator would after emitting the outputs the state came from.
    pub fn from_state(state: [u32; N]) -> Self {
        Self {
            state,
            state_idx: N,
            seeded: true,
        }
    }

    pub fn seed(&mut self, seed: u32) {
        self.state[0] = seed;
        for i in 1..N {
            let prev = self.state[i - 1];
            self.state[i] = F.wrapping_mul(prev ^ (prev >> (W - 2))).wrapping_add(i as u32);
        }
        self.state_idx = N;
        self.seeded = true;
    }

    pub fn generate(&mut self) -> u32 {
        if self.state_idx >= N {
            if !self.seeded {
                self.seed(DEFAULT_SEED);
            }
            self.twist();
        }
        let y = self.state[self.state_idx];
        self.state_idx += 1;
        temper(y)
    }

    /// Generate a u32 in the given range (inclusive).
    pub fn generate_in_range(&mut self, min: u32, max: u32) -> u32 {
        let real_min = min.min(max);
        let span = (min.max(max) - real_min) as u64 + 1;
        real_min + ((self.generate() as u64 * span) >> W) as u32
    }

    /// Generate a float in range [0, 1).
    pub fn generate_float(&mut self) -> f64 {
        self.generate() as f64 / (1u64 << W) as f64
    }

    fn twist(&mut self) {
        for i in 0..N {
            // Low 31 bits of this word, top bit of the next.
            let x = (self.state[i] & LOWER_MASK) | (self.state[(i + 1) % N] & UPPER_MASK);
            let mut x_a = x >> 1;
            if x & 1 > 0 {
                x_a ^= A;
            }
            self.state[i] = self.state[(i + M) % N] ^ x_a;
        }
        self.state_idx = 0;
    }
}

impl Default for Mt19937 {
    fn default() -> Self {
        Self::unseeded()
    }
}

pub fn temper(x: u32) -> u32 {
    let mut y: u32 = x ^ (x >> U);
    y ^= (y << S) & B;
    y ^= (y << T) & C;
    y ^ (y >> L)
}
