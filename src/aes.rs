// AES-128 block primitive and ECB mode.
//
// The single-block permutation comes from the `aes` crate. Everything built
// on top of it (padding, chaining, counters) lives in this crate.
use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::{pkcs7_pad, pkcs7_unpad, Error, Result};

pub const BLOCK_SIZE: usize = 16;

pub struct AesCipher {
    cipher: Aes128,
}

impl AesCipher {
    pub fn new(key: &[u8; BLOCK_SIZE]) -> Self {
        Self {
            cipher: Aes128::new(GenericArray::from_slice(key)),
        }
    }

    pub fn encrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut buf = GenericArray::clone_from_slice(&block);
        self.cipher.encrypt_block(&mut buf);
        let mut out = [0u8; BLOCK_SIZE];
        out.copy_from_slice(&buf);
        out
    }

    pub fn decrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut buf = GenericArray::clone_from_slice(&block);
        self.cipher.decrypt_block(&mut buf);
        let mut out = [0u8; BLOCK_SIZE];
        out.copy_from_slice(&buf);
        out
    }
}

/// Split a buffer into AES blocks.
///
/// The buffer's length must be a multiple of the block size.
pub fn to_blocks(bytes: &[u8]) -> Result<Vec<[u8; BLOCK_SIZE]>> {
    if bytes.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidCiphertextLength {
            len: bytes.len(),
            block_size: BLOCK_SIZE,
        });
    }
    Ok(bytes
        .chunks_exact(BLOCK_SIZE)
        .map(|chunk| {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            block
        })
        .collect())
}

pub fn encrypt_aes_128_ecb(message: &[u8], key: &[u8; BLOCK_SIZE]) -> Vec<u8> {
    let cipher = AesCipher::new(key);
    let padded = pkcs7_pad(message, BLOCK_SIZE as u8);
    let mut ciphertext = Vec::with_capacity(padded.len());
    for block in padded.chunks_exact(BLOCK_SIZE) {
        let mut buf = [0u8; BLOCK_SIZE];
        buf.copy_from_slice(block);
        ciphertext.extend_from_slice(&cipher.encrypt_block(buf));
    }
    ciphertext
}

pub fn decrypt_aes_128_ecb(ciphertext: &[u8], key: &[u8; BLOCK_SIZE]) -> Result<Vec<u8>> {
    let cipher = AesCipher::new(key);
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for block in to_blocks(ciphertext)? {
        plaintext.extend_from_slice(&cipher.decrypt_block(block));
    }
    pkcs7_unpad(&mut plaintext)?;
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::random_bytes_with_seed;

    fn hex_block(s: &str) -> [u8; BLOCK_SIZE] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn aes_128_encrypt_block() {
        let cipher = AesCipher::new(b"Thats my Kung Fu");

        let ciphertext = cipher.encrypt_block(*b"Two One Nine Two");

        #[rustfmt::skip]
        let expected = [
            0x29, 0xC3, 0x50, 0x5F,
            0x57, 0x14, 0x20, 0xF6,
            0x40, 0x22, 0x99, 0xB3,
            0x1A, 0x02, 0xD7, 0x3A,
        ];
        assert_eq!(ciphertext, expected);
    }

    // NIST SP 800-38A, F.1.1 ECB-AES128.Encrypt
    #[rstest]
    #[case("6bc1bee22e409f96e93d7e117393172a", "3ad77bb40d7a3660a89ecaf32466ef97")]
    #[case("ae2d8a571e03ac9c9eb76fac45af8e51", "f5d3d58503b9699de785895a96fdbaaf")]
    #[case("30c81c46a35ce411e5fbc1191a0a52ef", "43b1cd7f598ece23881b00e3ed030688")]
    #[case("f69f2445df4f9b17ad2b417be66c3710", "7b0c785e27e8ad3f8223207104725dd4")]
    fn aes_128_block_matches_nist_vectors(#[case] plaintext: &str, #[case] ciphertext: &str) {
        let cipher = AesCipher::new(&hex_block("2b7e151628aed2a6abf7158809cf4f3c"));

        assert_eq!(
            cipher.encrypt_block(hex_block(plaintext)),
            hex_block(ciphertext)
        );
        assert_eq!(
            cipher.decrypt_block(hex_block(ciphertext)),
            hex_block(plaintext)
        );
    }

    #[test]
    fn ecb_pads_block_aligned_message_with_full_block() {
        let key = random_bytes_with_seed::<BLOCK_SIZE>(101);

        let ciphertext = encrypt_aes_128_ecb(b"YELLOW SUBMARINE", &key);

        assert_eq!(ciphertext.len(), 2 * BLOCK_SIZE);
        let padding_block = AesCipher::new(&key).encrypt_block([16u8; BLOCK_SIZE]);
        assert_eq!(ciphertext[BLOCK_SIZE..], padding_block);
    }

    #[rstest]
    #[case(b"")]
    #[case(b"a")]
    #[case(b"YELLOW SUBMARINE")]
    #[case(b"We all live on a yellow submarine, a yellow submarine")]
    fn ecb_decrypt_inverts_encrypt(#[case] message: &[u8]) {
        let key = random_bytes_with_seed::<BLOCK_SIZE>(7);

        let ciphertext = encrypt_aes_128_ecb(message, &key);
        let plaintext = decrypt_aes_128_ecb(&ciphertext, &key).unwrap();

        assert_eq!(plaintext, message);
    }

    #[test]
    fn ecb_encrypts_equal_blocks_to_equal_ciphertext() {
        let key = random_bytes_with_seed::<BLOCK_SIZE>(11);

        let ciphertext = encrypt_aes_128_ecb(&b"A".repeat(3 * BLOCK_SIZE), &key);

        let blocks = to_blocks(&ciphertext).unwrap();
        assert_eq!(blocks[0], blocks[1]);
        assert_eq!(blocks[1], blocks[2]);
        assert_ne!(blocks[2], blocks[3]);
    }

    #[test]
    fn ecb_decrypt_rejects_partial_block() {
        let key = random_bytes_with_seed::<BLOCK_SIZE>(11);

        let result = decrypt_aes_128_ecb(&[0u8; 17], &key);

        assert_eq!(
            result,
            Err(Error::InvalidCiphertextLength {
                len: 17,
                block_size: BLOCK_SIZE
            })
        );
    }
}
