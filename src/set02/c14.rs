// Byte-at-a-time ECB decryption (Harder)
//
// The oracle now also prepends a random-length, random prefix:
//
//     AES-128-ECB(random-prefix || attacker-controlled || target-bytes, random-key)
//
// The attack is the same one as for the simple oracle, once our input has
// been padded out past the end of the prefix. See
// `byte_at_a_time_ecb_decrypt` and `find_prefix_alignment`.

use crate::{encrypt_aes_128_ecb, EncryptionOracle, Mt19937};

const BLOCK_SIZE: usize = 16;

pub struct EcbRandomPrefixOracle {
    key: [u8; BLOCK_SIZE],
    prefix: Vec<u8>,
    unknown_bytes: Vec<u8>,
}

impl EcbRandomPrefixOracle {
    pub fn new(key: [u8; BLOCK_SIZE], seed: u32, unknown_bytes: Vec<u8>) -> Self {
        Self {
            key,
            prefix: Self::make_random_prefix(seed),
            unknown_bytes,
        }
    }

    pub fn with_prefix(key: [u8; BLOCK_SIZE], prefix: Vec<u8>, unknown_bytes: Vec<u8>) -> Self {
        Self {
            key,
            prefix,
            unknown_bytes,
        }
    }

    fn make_random_prefix(seed: u32) -> Vec<u8> {
        let mut rng = Mt19937::new(seed);
        let n_random_bytes = rng.generate_in_range(1, 16 * BLOCK_SIZE as u32);
        (0..n_random_bytes)
            .map(|_| rng.generate() as u8)
            .collect::<Vec<u8>>()
    }
}

impl EncryptionOracle for EcbRandomPrefixOracle {
    fn encrypt(&self, msg: &[u8]) -> Vec<u8> {
        let plaintext = [self.prefix.as_slice(), msg, self.unknown_bytes.as_slice()].concat();
        encrypt_aes_128_ecb(&plaintext, &self.key)
    }
}
