/// An ECB/CBC detection oracle
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use crate::{encrypt_aes_128_cbc, encrypt_aes_128_ecb, max_block_repetitions};

const BLOCK_SIZE: usize = 16;

pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

pub fn random_bytes_with_seed<const N: usize>(seed: u64) -> [u8; N] {
    let mut bytes = [0u8; N];
    StdRng::seed_from_u64(seed).fill_bytes(&mut bytes);
    bytes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMode {
    Ecb,
    Cbc,
}

/// Encrypts under a fresh random key each call, choosing ECB or CBC at random.
pub struct RandomModeOracle {
    rng: StdRng,
}

impl RandomModeOracle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Return the mode that was used alongside the ciphertext, so callers can
    /// check a guess.
    pub fn encrypt(&mut self, msg: &[u8]) -> (BlockMode, Vec<u8>) {
        let mut key = [0u8; BLOCK_SIZE];
        self.rng.fill_bytes(&mut key);
        let prefix = self.random_filler();
        let suffix = self.random_filler();
        let plaintext = [prefix.as_slice(), msg, suffix.as_slice()].concat();

        if self.rng.gen_bool(0.5) {
            (BlockMode::Ecb, encrypt_aes_128_ecb(&plaintext, &key))
        } else {
            let mut iv = [0u8; BLOCK_SIZE];
            self.rng.fill_bytes(&mut iv);
            (BlockMode::Cbc, encrypt_aes_128_cbc(&plaintext, &key, &iv))
        }
    }

    fn random_filler(&mut self) -> Vec<u8> {
        let len = self.rng.gen_range(5..=10);
        let mut filler = vec![0u8; len];
        self.rng.fill_bytes(&mut filler);
        filler
    }
}

/// Guess the block mode used by an encryption function.
///
/// We control a message long enough that, whatever the random prefix, at
/// least three whole blocks of it are identical. ECB maps those to three
/// identical ciphertext blocks; CBC never will.
pub fn detect_block_mode<F>(mut encrypt: F) -> BlockMode
where
    F: FnMut(&[u8]) -> Vec<u8>,
{
    let ciphertext = encrypt(&[0u8; 4 * BLOCK_SIZE]);
    if max_block_repetitions(&ciphertext, BLOCK_SIZE) >= 3 {
        BlockMode::Ecb
    } else {
        BlockMode::Cbc
    }
}
