use crate::{
    aes::BLOCK_SIZE, aes_128_ctr, decrypt_aes_128_cbc, decrypt_aes_128_ecb, encrypt_aes_128_cbc,
    encrypt_aes_128_ecb, mt19937_cipher, mt19937_stream_seed, Result,
};

/// A block cipher mode of operation, along with the per-mode parameters it
/// needs on top of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ecb,
    Cbc { iv: [u8; BLOCK_SIZE] },
    Ctr { nonce: [u8; 8] },
    /// The MT19937 stream cipher. The key plays no part; see
    /// `Mode::mt_stream_from_key`.
    MtStream { seed: u16 },
}

impl Mode {
    pub fn mt_stream_from_key(key: &[u8; BLOCK_SIZE]) -> Self {
        Mode::MtStream {
            seed: mt19937_stream_seed(key),
        }
    }

    pub fn encrypt(&self, key: &[u8; BLOCK_SIZE], plaintext: &[u8]) -> Vec<u8> {
        match self {
            Mode::Ecb => encrypt_aes_128_ecb(plaintext, key),
            Mode::Cbc { iv } => encrypt_aes_128_cbc(plaintext, key, iv),
            Mode::Ctr { nonce } => aes_128_ctr(plaintext, key, nonce),
            Mode::MtStream { seed } => mt19937_cipher(*seed, plaintext),
        }
    }

    /// Block modes strip padding and so can fail; stream modes cannot.
    pub fn decrypt(&self, key: &[u8; BLOCK_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>> {
        match self {
            Mode::Ecb => decrypt_aes_128_ecb(ciphertext, key),
            Mode::Cbc { iv } => decrypt_aes_128_cbc(ciphertext, key, iv),
            Mode::Ctr { nonce } => Ok(aes_128_ctr(ciphertext, key, nonce)),
            Mode::MtStream { seed } => Ok(mt19937_cipher(*seed, ciphertext)),
        }
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Mode::Ctr { .. } | Mode::MtStream { .. })
    }
}
