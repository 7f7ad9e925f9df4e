/// Byte-at-a-time ECB decryption
use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    encrypt_aes_128_ecb, max_block_repetitions, pkcs7_unpad, EncryptionOracle, Error, Result,
};

const FILLER: u8 = b'A';
// A second filler byte, used to confirm the prefix alignment. The prefix
// cannot end in both.
const ALT_FILLER: u8 = b'B';
const MAX_BLOCK_SIZE: usize = 256;

/// Appends a fixed secret to each message and encrypts with a fixed key.
pub struct EcbSuffixOracle {
    key: [u8; 16],
    unknown_bytes: Vec<u8>,
}

impl EcbSuffixOracle {
    pub fn new(key: [u8; 16], unknown_bytes: Vec<u8>) -> Self {
        Self { key, unknown_bytes }
    }
}

impl EncryptionOracle for EcbSuffixOracle {
    fn encrypt(&self, msg: &[u8]) -> Vec<u8> {
        let message = [msg, self.unknown_bytes.as_slice()].concat();
        encrypt_aes_128_ecb(&message, &self.key)
    }
}

/// Where the attacker's input starts once it has been aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixAlignment {
    /// Filler bytes needed to complete the prefix's final block.
    pub padding_len: usize,
    /// Number of whole blocks occupied by the prefix and that filler.
    pub blocks_to_skip: usize,
}

/// Recover the secret an ECB oracle appends to our input.
///
/// Works whether or not the oracle also prepends a fixed prefix of unknown
/// length.
///
/// The oracle encrypts `prefix || input || secret`. Once the prefix is padded
/// out to a block boundary, feeding `block_size - 1` filler bytes puts
/// exactly one unknown byte at the end of a block we control. Encrypting the
/// filler followed by every possible final byte gives a dictionary from
/// ciphertext block to byte; looking up the real block gives the byte. With
/// one fewer filler byte, the known byte and the next unknown byte shift
/// into the block, and so on until the whole secret has been read.
pub fn byte_at_a_time_ecb_decrypt<O>(oracle: &O) -> Result<Vec<u8>>
where
    O: EncryptionOracle + Sync + ?Sized,
{
    let block_size = detect_block_size(oracle)?;

    // Four blocks of filler always contain three whole, aligned filler
    // blocks, wherever the prefix ends.
    let sample = oracle.encrypt(&vec![FILLER; 4 * block_size]);
    if max_block_repetitions(&sample, block_size) < 3 {
        return Err(Error::ModeNotEcb);
    }

    let alignment = find_prefix_alignment(oracle, block_size)?;
    let base_len = oracle.encrypt(&[]).len();

    let mut decrypted_bytes: Vec<u8> = Vec::new();
    for block_idx in alignment.blocks_to_skip..(base_len / block_size + 1) {
        for byte_idx in 0..block_size {
            let n_filler = alignment.padding_len + block_size - (byte_idx + 1);
            let filler = vec![FILLER; n_filler];
            // Near the end of the secret the candidate message can cross into
            // an extra block that the real one does not have. These positions
            // are past the secret, so skip them.
            if let Some(byte) =
                crack_next_byte(oracle, block_size, block_idx, &filler, &decrypted_bytes)
            {
                decrypted_bytes.push(byte);
            }
        }
    }
    if decrypted_bytes.is_empty() {
        return Err(Error::NoMatchFound);
    }
    pkcs7_unpad(&mut decrypted_bytes)?;
    Ok(decrypted_bytes)
}

fn crack_next_byte<O>(
    oracle: &O,
    block_size: usize,
    block_idx: usize,
    filler: &[u8],
    decrypted_bytes: &[u8],
) -> Option<u8>
where
    O: EncryptionOracle + Sync + ?Sized,
{
    let block_range = (block_idx * block_size)..((block_idx + 1) * block_size);
    let real_ciphertext = oracle.encrypt(filler);
    let target_block = real_ciphertext.get(block_range.clone())?;

    let known = [filler, decrypted_bytes].concat();
    let dictionary: HashMap<Vec<u8>, u8> = (0..=255u8)
        .into_par_iter()
        .filter_map(|candidate| {
            let candidate_msg = [known.as_slice(), &[candidate]].concat();
            let fake_ciphertext = oracle.encrypt(&candidate_msg);
            fake_ciphertext
                .get(block_range.clone())
                .map(|block| (block.to_vec(), candidate))
        })
        .collect();
    dictionary.get(target_block).copied()
}

/// Detect the block size by growing the input until the ciphertext grows.
pub fn detect_block_size<O>(oracle: &O) -> Result<usize>
where
    O: EncryptionOracle + ?Sized,
{
    let initial_len = oracle.encrypt(&[]).len();
    let mut input = Vec::with_capacity(MAX_BLOCK_SIZE);
    while input.len() < MAX_BLOCK_SIZE {
        input.push(FILLER);
        let ciphertext_len = oracle.encrypt(&input).len();
        if ciphertext_len != initial_len {
            return Ok(ciphertext_len - initial_len);
        }
    }
    Err(Error::BlockSizeNotDetected)
}

/// Find how much filler aligns our input to a block boundary, and how many
/// blocks precede it.
///
/// Three blocks of filler encrypt to at least two identical blocks: that is
/// what a block of pure filler looks like. We then feed `block_size + n`
/// filler bytes for increasing `n`; the first `n` for which that block
/// appears completes the prefix's final block, and its index is the number
/// of blocks to skip. The search runs for two filler bytes at once so that a
/// prefix ending in filler cannot align early.
pub fn find_prefix_alignment<O>(oracle: &O, block_size: usize) -> Result<PrefixAlignment>
where
    O: EncryptionOracle + ?Sized,
{
    let target = encrypted_filler_block(oracle, block_size, FILLER)?;
    let alt_target = encrypted_filler_block(oracle, block_size, ALT_FILLER)?;

    for padding_len in 0..block_size {
        let c = oracle.encrypt(&vec![FILLER; block_size + padding_len]);
        let c_alt = oracle.encrypt(&vec![ALT_FILLER; block_size + padding_len]);
        let found = c
            .chunks_exact(block_size)
            .zip(c_alt.chunks_exact(block_size))
            .position(|(block, alt_block)| {
                block == target.as_slice() && alt_block == alt_target.as_slice()
            });
        if let Some(blocks_to_skip) = found {
            return Ok(PrefixAlignment {
                padding_len,
                blocks_to_skip,
            });
        }
    }
    Err(Error::PrefixNotFound)
}

fn encrypted_filler_block<O>(oracle: &O, block_size: usize, filler: u8) -> Result<Vec<u8>>
where
    O: EncryptionOracle + ?Sized,
{
    // Whole prefix blocks may repeat too, but they also appear when we send
    // nothing at all.
    let base_ciphertext = oracle.encrypt(&[]);
    let ciphertext = oracle.encrypt(&vec![filler; 3 * block_size]);
    let blocks = ciphertext.chunks_exact(block_size);
    blocks
        .clone()
        .find(|&block| {
            blocks.clone().filter(|&b| b == block).count() >= 2
                && !base_ciphertext.chunks_exact(block_size).any(|b| b == block)
        })
        .map(|block| block.to_vec())
        .ok_or(Error::ModeNotEcb)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{base64_decode, encrypt_aes_128_cbc, random_bytes, random_bytes_with_seed};

    const UNKNOWN_STRING: &str =
        "Um9sbGluJyBpbiBteSA1LjAKV2l0aCBteSByYWctdG9wIGRvd24gc28gbXkg\
aGFpciBjYW4gYmxvdwpUaGUgZ2lybGllcyBvbiBzdGFuZGJ5IHdhdmluZyBq\
dXN0IHRvIHNheSBoaQpEaWQgeW91IHN0b3A/IE5vLCBJIGp1c3QgZHJvdmUg\
YnkK";

    #[test]
    fn byte_at_a_time_ecb_decrypt_decrypts_message_with_oracle() {
        let key = random_bytes::<16>();
        let decoded_secret = base64_decode(UNKNOWN_STRING).unwrap();
        let oracle = EcbSuffixOracle::new(key, decoded_secret.clone());

        let secret_bytes = byte_at_a_time_ecb_decrypt(&oracle).unwrap();

        assert!(secret_bytes.starts_with(b"Rollin' in my 5.0\n"));
        assert_eq!(secret_bytes, decoded_secret);
    }

    #[test]
    fn byte_at_a_time_ecb_decrypt_decrypts_block_aligned_secret() {
        let key = random_bytes_with_seed::<16>(101);
        let secret = b"exactly thirty-two bytes of text".to_vec();
        let oracle = EcbSuffixOracle::new(key, secret.clone());

        let secret_bytes = byte_at_a_time_ecb_decrypt(&oracle).unwrap();

        assert_eq!(secret_bytes, secret);
    }

    #[test]
    fn detect_block_size_finds_aes_block_size() {
        let oracle = EcbSuffixOracle::new(random_bytes_with_seed(1), b"secret".to_vec());

        assert_eq!(detect_block_size(&oracle), Ok(16));
    }

    #[test]
    fn find_prefix_alignment_is_trivial_without_prefix() {
        let oracle = EcbSuffixOracle::new(random_bytes_with_seed(1), b"secret".to_vec());

        let alignment = find_prefix_alignment(&oracle, 16).unwrap();

        assert_eq!(
            alignment,
            PrefixAlignment {
                padding_len: 0,
                blocks_to_skip: 0
            }
        );
    }

    #[test]
    fn byte_at_a_time_ecb_decrypt_returns_err_given_cbc_oracle() {
        let key = random_bytes_with_seed::<16>(101);
        let iv = random_bytes_with_seed::<16>(102);
        let oracle = |msg: &[u8]| encrypt_aes_128_cbc(&[msg, b"secret"].concat(), &key, &iv);

        let result = byte_at_a_time_ecb_decrypt(&oracle);

        assert_eq!(result, Err(Error::ModeNotEcb));
    }
}
