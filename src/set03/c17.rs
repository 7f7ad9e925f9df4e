// The CBC padding oracle
//
// CBC decrypts each block as
//
//                 P_i = D(C_i) ⊕ C_{i-1}.
//
// Call I_i = D(C_i) the intermediate block. If we send the oracle a two block
// ciphertext X || C_i, where X is a probe block we control, the final
// plaintext block it decrypts is
//
//                 P' = I_i ⊕ X.
//
// The oracle tells us whether P' ends in valid padding. Sweep the last byte
// of X until it does: P' then (almost certainly) ends in '\x01', so
//
//                 I_i[15] = X[15] ⊕ \x01.
//
// Knowing I_i[15], we can set X[15] = I_i[15] ⊕ \x02 and sweep X[14] until
// P' ends in '\x02\x02', giving I_i[14] = X[14] ⊕ \x02. Repeat for every byte
// of the block, then recover the real plaintext with P_i = I_i ⊕ C_{i-1}.
// No key is needed at any point.
//
// The first byte of each block has one trap: P' may already end in '\x02',
// in which case a probe that makes the last byte '\x02' is also valid. Flip
// the second-to-last byte of the probe and ask again: genuine '\x01' padding
// survives, the false positive does not.

use rayon::prelude::*;

use crate::{
    aes::{to_blocks, BLOCK_SIZE},
    decrypt_aes_128_cbc, encrypt_aes_128_cbc, pkcs7_unpad, xor_blocks, Error, Mt19937, Result,
    ValidationOracle,
};

const PLAINTEXTS: [&[u8]; 10] = [
    b"000000Now that the party is jumping",
    b"000001With the bass kicked in and the Vega's are pumpin'",
    b"000002Quick to the point, to the point, no faking",
    b"000003Cooking MC's like a pound of bacon",
    b"000004Burning 'em, if you ain't quick and nimble",
    b"000005I go crazy when I hear a cymbal",
    b"000006And a high hat with a souped up tempo",
    b"000007I'm on a roll, it's time to go solo",
    b"000008ollin' in my five point oh",
    b"000009ith my rag-top down so my hair can blow",
];

/// Holds a key and encrypts one of ten fixed strings under a fresh IV. The
/// only thing it reveals about a ciphertext is whether its padding is valid.
///
/// The seed drives both the choice of plaintext and the IVs, so a given key
/// and seed always produce the same ciphertexts.
pub struct CbcPaddingOracle {
    key: [u8; BLOCK_SIZE],
    rng: Mt19937,
}

impl CbcPaddingOracle {
    pub const N_PLAINTEXTS: usize = PLAINTEXTS.len();

    pub fn new(key: [u8; BLOCK_SIZE], seed: u32) -> Self {
        Self {
            key,
            rng: Mt19937::new(seed),
        }
    }

    /// Encrypt the plaintext with the given index, returning `(iv, ciphertext)`.
    pub fn encrypt_plaintext(&mut self, index: usize) -> Option<([u8; BLOCK_SIZE], Vec<u8>)> {
        let plaintext = PLAINTEXTS.get(index)?;
        let iv = self.random_iv();
        Some((iv, encrypt_aes_128_cbc(plaintext, &self.key, &iv)))
    }

    pub fn encrypt_random_plaintext(&mut self) -> ([u8; BLOCK_SIZE], Vec<u8>) {
        let index = self.rng.generate_in_range(0, PLAINTEXTS.len() as u32 - 1) as usize;
        let plaintext = PLAINTEXTS[index];
        let iv = self.random_iv();
        (iv, encrypt_aes_128_cbc(plaintext, &self.key, &iv))
    }

    fn random_iv(&mut self) -> [u8; BLOCK_SIZE] {
        let mut iv = [0u8; BLOCK_SIZE];
        for chunk in iv.chunks_exact_mut(4) {
            chunk.copy_from_slice(&self.rng.generate().to_le_bytes());
        }
        iv
    }
}

impl ValidationOracle for CbcPaddingOracle {
    fn padding_valid(&self, ciphertext: &[u8], iv: &[u8; BLOCK_SIZE]) -> bool {
        decrypt_aes_128_cbc(ciphertext, &self.key, iv).is_ok()
    }
}

/// Decrypt a CBC ciphertext using nothing but a padding oracle.
///
/// The returned plaintext has its padding removed.
pub fn cbc_padding_oracle_attack<V>(
    ciphertext: &[u8],
    iv: &[u8; BLOCK_SIZE],
    oracle: &V,
) -> Result<Vec<u8>>
where
    V: ValidationOracle + Sync + ?Sized,
{
    let ciphertext_blocks = to_blocks(ciphertext)?;
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut previous_block = *iv;
    for (block_idx, target_block) in ciphertext_blocks.iter().enumerate() {
        let intermediate = recover_intermediate_block(target_block, iv, block_idx, oracle)?;
        plaintext.extend_from_slice(&xor_blocks(&intermediate, &previous_block));
        previous_block = *target_block;
    }
    pkcs7_unpad(&mut plaintext)?;
    Ok(plaintext)
}

/// Find D(target_block), one byte at a time from the end.
fn recover_intermediate_block<V>(
    target_block: &[u8; BLOCK_SIZE],
    iv: &[u8; BLOCK_SIZE],
    block_idx: usize,
    oracle: &V,
) -> Result<[u8; BLOCK_SIZE]>
where
    V: ValidationOracle + Sync + ?Sized,
{
    let mut intermediate = [0u8; BLOCK_SIZE];
    for padding_len in 1..=BLOCK_SIZE {
        let byte_idx = BLOCK_SIZE - padding_len;
        let pad = padding_len as u8;
        let mut probe = [0u8; BLOCK_SIZE];
        for k in (byte_idx + 1)..BLOCK_SIZE {
            probe[k] = intermediate[k] ^ pad;
        }

        let candidate = (0..=255u8)
            .into_par_iter()
            .find_first(|&candidate| {
                let mut probe = probe;
                probe[byte_idx] = candidate;
                if !probe_padding_valid(&probe, target_block, iv, oracle) {
                    return false;
                }
                if padding_len == 1 {
                    probe[byte_idx - 1] ^= 1;
                    return probe_padding_valid(&probe, target_block, iv, oracle);
                }
                true
            })
            .ok_or(Error::NoValidPaddingFound {
                block: block_idx,
                byte: byte_idx,
            })?;
        intermediate[byte_idx] = candidate ^ pad;
    }
    Ok(intermediate)
}

fn probe_padding_valid<V>(
    probe: &[u8; BLOCK_SIZE],
    target_block: &[u8; BLOCK_SIZE],
    iv: &[u8; BLOCK_SIZE],
    oracle: &V,
) -> bool
where
    V: ValidationOracle + ?Sized,
{
    let query = [probe.as_slice(), target_block.as_slice()].concat();
    oracle.padding_valid(&query, iv)
}
