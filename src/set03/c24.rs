// Create the MT19937 stream cipher and break it
//
// The keystream is the generator's output, two words at a time: each 8-byte
// keystream block is the little-endian encoding of two consecutive outputs.
// With only a 16-bit seed, the whole key space can be searched.

use rayon::prelude::*;

use crate::{Error, Mt19937, Result};

const KEYSTREAM_BLOCK_SIZE: usize = 8;

/// Default width, in seconds, of the window a reset token may come from.
pub const DEFAULT_TOKEN_WINDOW: u32 = 3600;

pub fn mt19937_cipher(seed: u16, message: &[u8]) -> Vec<u8> {
    let mut rng = Mt19937::new(seed.into());
    let mut output = Vec::with_capacity(message.len());
    for message_block in message.chunks(KEYSTREAM_BLOCK_SIZE) {
        let key_stream = mt19937_keystream_block(&mut rng);
        output.extend(message_block.iter().zip(key_stream).map(|(m, k)| m ^ k));
    }
    output
}

/// The 16-bit cipher seed for a key: the big-endian value of its first two
/// bytes.
pub fn mt19937_stream_seed(key: &[u8]) -> u16 {
    match key {
        [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]),
        [hi] => u16::from_be_bytes([*hi, 0]),
        [] => 0,
    }
}

fn mt19937_keystream_block(rng: &mut Mt19937) -> [u8; KEYSTREAM_BLOCK_SIZE] {
    let mut block = [0u8; KEYSTREAM_BLOCK_SIZE];
    block[..4].copy_from_slice(&rng.generate().to_le_bytes());
    block[4..].copy_from_slice(&rng.generate().to_le_bytes());
    block
}

/// Find the seed of an MT19937 stream cipher given a ciphertext whose
/// plaintext is known to end with `known_suffix`.
pub fn recover_seed_from_mt19937_cipher_encrypted_message(
    ciphertext: &[u8],
    known_suffix: &[u8],
) -> Result<u16> {
    if known_suffix.len() > ciphertext.len() {
        return Err(Error::KeyNotFound);
    }
    (0..=u16::MAX)
        .into_par_iter()
        .find_first(|&candidate_seed| {
            mt19937_cipher(candidate_seed, ciphertext).ends_with(known_suffix)
        })
        .ok_or(Error::KeyNotFound)
}

/// Generate a password reset token: a run of 'A's encrypted with a seed taken
/// from the (truncated) current time.
pub struct ResetTokenOracle {
    rng: Mt19937,
}

impl ResetTokenOracle {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Mt19937::new(seed),
        }
    }

    pub fn generate_token(&mut self, now: u32) -> Vec<u8> {
        let token_len = self.rng.generate_in_range(4, 24) as usize;
        mt19937_cipher(now as u16, &b"A".repeat(token_len))
    }
}

/// Check whether `token` was produced by an MT19937 stream seeded with a
/// timestamp in the `window` seconds up to and including `now`.
pub fn is_token_for_recent_time(token: &[u8], now: u32, window: u32) -> bool {
    let plaintext = b"A".repeat(token.len());
    (0..=window)
        .into_par_iter()
        .filter_map(|elapsed| now.checked_sub(elapsed))
        .any(|timestamp| mt19937_cipher(timestamp as u16, &plaintext) == token)
}
